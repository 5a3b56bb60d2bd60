use serde::{Deserialize, Serialize};

use crate::error::PolicyError;
use crate::policy::tier::{validate_bounds, TierBound};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeTier {
    pub upper: TierBound,
    pub fee: f64,
    /// Order amount from which delivery in this band is free.
    pub free_from: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeePolicy {
    /// Order amount that waives the fee at any distance.
    pub high_value_waiver: Option<f64>,
    pub tiers: Vec<FeeTier>,
}

impl Default for FeePolicy {
    fn default() -> Self {
        Self {
            high_value_waiver: Some(5000.0),
            tiers: vec![
                FeeTier {
                    upper: TierBound::AtMost(5.0),
                    fee: 19.0,
                    free_from: Some(499.0),
                },
                FeeTier {
                    upper: TierBound::AtMost(10.0),
                    fee: 29.0,
                    free_from: Some(799.0),
                },
                FeeTier {
                    upper: TierBound::AtMost(20.0),
                    fee: 59.0,
                    free_from: Some(2000.0),
                },
                FeeTier {
                    upper: TierBound::Unbounded,
                    fee: 99.0,
                    free_from: None,
                },
            ],
        }
    }
}

impl FeePolicy {
    pub fn fee_for(&self, distance_km: f64, order_amount: f64) -> f64 {
        if self
            .high_value_waiver
            .is_some_and(|threshold| order_amount >= threshold)
        {
            return 0.0;
        }

        let Some(tier) = self
            .tiers
            .iter()
            .find(|tier| tier.upper.admits(distance_km))
            .or_else(|| self.tiers.last())
        else {
            return 0.0;
        };

        match tier.free_from {
            Some(threshold) if order_amount >= threshold => 0.0,
            _ => tier.fee,
        }
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        validate_bounds("fee", self.tiers.iter().map(|tier| tier.upper))?;

        for (index, tier) in self.tiers.iter().enumerate() {
            let threshold_ok = tier.free_from.is_none_or(|t| t.is_finite() && t >= 0.0);
            if !tier.fee.is_finite() || tier.fee < 0.0 || !threshold_ok {
                return Err(PolicyError::InvalidFee { index });
            }
        }

        if let Some(waiver) = self.high_value_waiver {
            if !waiver.is_finite() || waiver < 0.0 {
                return Err(PolicyError::InvalidFee {
                    index: self.tiers.len(),
                });
            }
        }
        Ok(())
    }
}
