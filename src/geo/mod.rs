pub mod point;

pub use point::GeoPoint;

use crate::error::ValidationError;

const EARTH_RADIUS_KM: f64 = 6_371.0;

pub fn to_rad(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Rounds to one decimal place, half away from zero.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = to_rad(a.lat);
    let lat2 = to_rad(b.lat);
    let delta_lat = to_rad(b.lat - a.lat);
    let delta_lng = to_rad(b.lng - a.lng);

    let sin_lat = (delta_lat / 2.0).sin();
    let sin_lng = (delta_lng / 2.0).sin();

    let haversine = sin_lat * sin_lat + lat1.cos() * lat2.cos() * sin_lng * sin_lng;
    let central_angle = 2.0 * haversine.sqrt().atan2((1.0 - haversine).sqrt());

    EARTH_RADIUS_KM * central_angle
}

/// Great-circle distance in kilometres, rounded to one decimal.
///
/// Inputs are not validated; out-of-range or non-finite coordinates
/// propagate into the result. Use [`distance_between`] at trust boundaries.
pub fn calculate_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let from = GeoPoint {
        lat: lat1,
        lng: lon1,
    };
    let to = GeoPoint {
        lat: lat2,
        lng: lon2,
    };
    round_to_tenth(haversine_km(&from, &to))
}

pub fn distance_between(from: &GeoPoint, to: &GeoPoint) -> Result<f64, ValidationError> {
    from.validate()?;
    to.validate()?;
    Ok(round_to_tenth(haversine_km(from, to)))
}

pub fn format_distance(distance_km: f64) -> String {
    format!("{:.1} km", round_to_tenth(distance_km))
}

#[cfg(test)]
mod tests {
    use super::{calculate_distance, distance_between, format_distance, haversine_km};
    use super::GeoPoint;

    #[test]
    fn zero_distance_for_same_point() {
        let p = GeoPoint {
            lat: 28.6139,
            lng: 77.2090,
        };
        assert!(haversine_km(&p, &p) < 1e-9);
        assert_eq!(calculate_distance(p.lat, p.lng, p.lat, p.lng), 0.0);
    }

    #[test]
    fn london_to_paris_is_around_343_km() {
        let distance = calculate_distance(51.5074, -0.1278, 48.8566, 2.3522);
        assert!((distance - 343.6).abs() < 0.05);
    }

    #[test]
    fn delhi_to_mumbai() {
        let distance = calculate_distance(28.6139, 77.2090, 19.0760, 72.8777);
        assert!((distance - 1148.1).abs() < 0.05);
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            (12.9716, 77.5946, 13.0827, 80.2707),
            (-33.8688, 151.2093, 51.5074, -0.1278),
            (0.0, 179.9, 0.0, -179.9),
        ];
        for (lat1, lon1, lat2, lon2) in pairs {
            assert_eq!(
                calculate_distance(lat1, lon1, lat2, lon2),
                calculate_distance(lat2, lon2, lat1, lon1)
            );
        }
    }

    #[test]
    fn result_has_one_decimal() {
        let distance = calculate_distance(12.9716, 77.5946, 12.9352, 77.6245);
        assert_eq!(distance, (distance * 10.0).round() / 10.0);
    }

    #[test]
    fn format_agrees_with_distance_rounding() {
        assert_eq!(format_distance(3.456), "3.5 km");
        assert_eq!(format_distance(0.25), "0.3 km");
        assert_eq!(format_distance(12.0), "12.0 km");
    }

    #[test]
    fn validated_distance_rejects_bad_points() {
        let ok = GeoPoint {
            lat: 10.0,
            lng: 10.0,
        };
        let bad = GeoPoint {
            lat: 95.0,
            lng: 10.0,
        };
        assert!(distance_between(&ok, &bad).is_err());
        assert_eq!(distance_between(&ok, &ok), Ok(0.0));
    }
}
