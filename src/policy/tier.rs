use serde::{Deserialize, Serialize};

use crate::error::PolicyError;

/// Upper edge of a distance band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "km", rename_all = "snake_case")]
pub enum TierBound {
    Below(f64),
    AtMost(f64),
    Unbounded,
}

impl TierBound {
    pub fn admits(&self, distance_km: f64) -> bool {
        match *self {
            TierBound::Below(limit) => distance_km < limit,
            TierBound::AtMost(limit) => distance_km <= limit,
            TierBound::Unbounded => true,
        }
    }

    fn limit(&self) -> Option<f64> {
        match *self {
            TierBound::Below(limit) | TierBound::AtMost(limit) => Some(limit),
            TierBound::Unbounded => None,
        }
    }
}

/// Checks that every band can match a non-negative distance, that bands are
/// listed nearest-first and that the table ends with an unbounded one.
pub(crate) fn validate_bounds(
    table: &'static str,
    bounds: impl ExactSizeIterator<Item = TierBound>,
) -> Result<(), PolicyError> {
    let len = bounds.len();
    if len == 0 {
        return Err(PolicyError::EmptyTable { table });
    }

    let mut previous: Option<TierBound> = None;
    for (index, bound) in bounds.enumerate() {
        let is_last = index + 1 == len;
        match (bound, is_last) {
            (TierBound::Unbounded, false) => {
                return Err(PolicyError::UnsortedTiers { table, index });
            }
            (TierBound::Below(_) | TierBound::AtMost(_), true) => {
                return Err(PolicyError::MissingOpenTier { table });
            }
            _ => {}
        }

        let admits_something = match bound {
            TierBound::Below(limit) => limit.is_finite() && limit > 0.0,
            TierBound::AtMost(limit) => limit.is_finite() && limit >= 0.0,
            TierBound::Unbounded => true,
        };
        if !admits_something {
            return Err(PolicyError::InvalidBound { table, index });
        }

        if let (Some(prev), Some(limit)) = (previous, bound.limit()) {
            let prev_limit = prev.limit().unwrap_or(f64::INFINITY);
            let widens = limit > prev_limit
                || (limit == prev_limit
                    && matches!(prev, TierBound::Below(_))
                    && matches!(bound, TierBound::AtMost(_)));
            if !widens {
                return Err(PolicyError::UnsortedTiers { table, index });
            }
        }
        previous = Some(bound);
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtaTier {
    pub upper: TierBound,
    pub label: String,
}

impl EtaTier {
    pub fn new(upper: TierBound, label: &str) -> Self {
        Self {
            upper,
            label: label.to_string(),
        }
    }
}

/// Distance bands mapped to a delivery-time label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtaTable {
    pub tiers: Vec<EtaTier>,
}

impl EtaTable {
    /// Listing banner: under 5 km, up to 10 km, beyond.
    pub fn banner() -> Self {
        Self {
            tiers: vec![
                EtaTier::new(TierBound::Below(5.0), "25-35 min"),
                EtaTier::new(TierBound::AtMost(10.0), "35-45 min"),
                EtaTier::new(TierBound::Unbounded, "60-75 min"),
            ],
        }
    }

    /// Checkout estimate, which also covers multi-day farm deliveries.
    pub fn checkout() -> Self {
        Self {
            tiers: vec![
                EtaTier::new(TierBound::AtMost(5.0), "30 min"),
                EtaTier::new(TierBound::AtMost(10.0), "60 min"),
                EtaTier::new(TierBound::AtMost(20.0), "1-2 days"),
                EtaTier::new(TierBound::Unbounded, "2-5 days"),
            ],
        }
    }

    pub fn label_for(&self, distance_km: f64) -> &str {
        self.tiers
            .iter()
            .find(|tier| tier.upper.admits(distance_km))
            .or_else(|| self.tiers.last())
            .map(|tier| tier.label.as_str())
            .unwrap_or("")
    }

    pub fn validate(&self, table: &'static str) -> Result<(), PolicyError> {
        validate_bounds(table, self.tiers.iter().map(|tier| tier.upper))?;

        if let Some(index) = self.tiers.iter().position(|t| t.label.trim().is_empty()) {
            return Err(PolicyError::EmptyLabel { table, index });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{EtaTable, EtaTier, TierBound};
    use crate::error::PolicyError;

    #[test]
    fn banner_edges() {
        let table = EtaTable::banner();
        assert_eq!(table.label_for(4.9), "25-35 min");
        assert_eq!(table.label_for(5.0), "35-45 min");
        assert_eq!(table.label_for(10.0), "35-45 min");
        assert_eq!(table.label_for(10.1), "60-75 min");
    }

    #[test]
    fn checkout_edges() {
        let table = EtaTable::checkout();
        assert_eq!(table.label_for(5.0), "30 min");
        assert_eq!(table.label_for(5.1), "60 min");
        assert_eq!(table.label_for(20.0), "1-2 days");
        assert_eq!(table.label_for(20.1), "2-5 days");
    }

    #[test]
    fn shipped_tables_are_valid() {
        assert_eq!(EtaTable::banner().validate("banner"), Ok(()));
        assert_eq!(EtaTable::checkout().validate("checkout"), Ok(()));
    }

    #[test]
    fn rejects_table_without_open_tier() {
        let table = EtaTable {
            tiers: vec![EtaTier::new(TierBound::AtMost(5.0), "soon")],
        };
        assert_eq!(
            table.validate("eta"),
            Err(PolicyError::MissingOpenTier { table: "eta" })
        );
    }

    #[test]
    fn rejects_unsorted_tiers() {
        let table = EtaTable {
            tiers: vec![
                EtaTier::new(TierBound::AtMost(10.0), "a"),
                EtaTier::new(TierBound::AtMost(5.0), "b"),
                EtaTier::new(TierBound::Unbounded, "c"),
            ],
        };
        assert_eq!(
            table.validate("eta"),
            Err(PolicyError::UnsortedTiers {
                table: "eta",
                index: 1
            })
        );
    }

    #[test]
    fn rejects_first_tier_that_matches_nothing() {
        for upper in [
            TierBound::AtMost(f64::NAN),
            TierBound::Below(-3.0),
            TierBound::Below(0.0),
            TierBound::AtMost(f64::INFINITY),
        ] {
            let table = EtaTable {
                tiers: vec![
                    EtaTier::new(upper, "never"),
                    EtaTier::new(TierBound::Unbounded, "always"),
                ],
            };
            assert_eq!(
                table.validate("eta"),
                Err(PolicyError::InvalidBound {
                    table: "eta",
                    index: 0
                }),
                "{upper:?}"
            );
        }
    }

    #[test]
    fn accepts_zero_distance_first_tier() {
        let table = EtaTable {
            tiers: vec![
                EtaTier::new(TierBound::AtMost(0.0), "pickup"),
                EtaTier::new(TierBound::Unbounded, "delivery"),
            ],
        };
        assert_eq!(table.validate("eta"), Ok(()));
        assert_eq!(table.label_for(0.0), "pickup");
    }

    #[test]
    fn bound_serializes_tagged() {
        let json = serde_json::to_value(TierBound::AtMost(5.0)).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "at_most", "km": 5.0 }));

        let open: TierBound =
            serde_json::from_value(serde_json::json!({ "kind": "unbounded" })).unwrap();
        assert_eq!(open, TierBound::Unbounded);
    }
}
