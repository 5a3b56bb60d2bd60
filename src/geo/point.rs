use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Result<Self, ValidationError> {
        let point = Self { lat, lng };
        point.validate()?;
        Ok(point)
    }

    /// Checks a point that arrived without going through [`GeoPoint::new`],
    /// e.g. one deserialised from a request body.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.lat.is_finite() {
            return Err(ValidationError::NotFinite {
                field: "lat",
                value: self.lat,
            });
        }
        if !self.lng.is_finite() {
            return Err(ValidationError::NotFinite {
                field: "lng",
                value: self.lng,
            });
        }
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(ValidationError::LatitudeOutOfRange(self.lat));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(ValidationError::LongitudeOutOfRange(self.lng));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::GeoPoint;
    use crate::error::ValidationError;

    #[test]
    fn accepts_range_edges() {
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range_latitude() {
        assert_eq!(
            GeoPoint::new(90.5, 0.0),
            Err(ValidationError::LatitudeOutOfRange(90.5))
        );
    }

    #[test]
    fn rejects_out_of_range_longitude() {
        assert_eq!(
            GeoPoint::new(0.0, -181.0),
            Err(ValidationError::LongitudeOutOfRange(-181.0))
        );
    }

    #[test]
    fn rejects_nan() {
        assert!(matches!(
            GeoPoint::new(f64::NAN, 0.0),
            Err(ValidationError::NotFinite { field: "lat", .. })
        ));
        assert!(matches!(
            GeoPoint::new(0.0, f64::INFINITY),
            Err(ValidationError::NotFinite { field: "lng", .. })
        ));
    }
}
