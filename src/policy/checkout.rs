use serde::{Deserialize, Serialize};

use crate::error::PolicyError;

/// Surcharges added on top of the delivery fee at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutPolicy {
    pub small_order_threshold: f64,
    pub small_order_fee: f64,
    pub platform_fee_rate: f64,
}

impl Default for CheckoutPolicy {
    fn default() -> Self {
        Self {
            small_order_threshold: 100.0,
            small_order_fee: 10.0,
            platform_fee_rate: 0.05,
        }
    }
}

impl CheckoutPolicy {
    pub fn small_order_fee_for(&self, item_total: f64) -> f64 {
        if item_total < self.small_order_threshold {
            self.small_order_fee
        } else {
            0.0
        }
    }

    /// Rounded to whole currency units.
    pub fn platform_fee_for(&self, item_total: f64) -> f64 {
        (item_total * self.platform_fee_rate).round()
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        let values = [
            ("small_order_threshold", self.small_order_threshold),
            ("small_order_fee", self.small_order_fee),
            ("platform_fee_rate", self.platform_fee_rate),
        ];
        for (name, value) in values {
            if !value.is_finite() || value < 0.0 {
                return Err(PolicyError::InvalidCheckout(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if self.platform_fee_rate > 1.0 {
            return Err(PolicyError::InvalidCheckout(format!(
                "platform_fee_rate must be at most 1, got {}",
                self.platform_fee_rate
            )));
        }
        Ok(())
    }
}
