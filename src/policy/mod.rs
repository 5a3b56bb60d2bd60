//! Delivery-time and delivery-fee policy.
//!
//! All bands are data: the built-in [`DeliveryPolicy`] reproduces the
//! storefront's tables, and a deployment can replace it with a JSON file.

pub mod checkout;
pub mod fee;
pub mod tier;

use std::path::Path;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, PolicyError, ValidationError};
use crate::models::quote::{CheckoutSummary, DeliveryFeeQuote};

pub use checkout::CheckoutPolicy;
pub use fee::{FeePolicy, FeeTier};
pub use tier::{EtaTable, EtaTier, TierBound};

static BUILT_IN: LazyLock<DeliveryPolicy> = LazyLock::new(DeliveryPolicy::default);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryPolicy {
    pub banner_eta: EtaTable,
    pub checkout_eta: EtaTable,
    pub fee: FeePolicy,
    pub checkout: CheckoutPolicy,
}

impl Default for DeliveryPolicy {
    fn default() -> Self {
        Self {
            banner_eta: EtaTable::banner(),
            checkout_eta: EtaTable::checkout(),
            fee: FeePolicy::default(),
            checkout: CheckoutPolicy::default(),
        }
    }
}

impl DeliveryPolicy {
    pub fn built_in() -> &'static DeliveryPolicy {
        &BUILT_IN
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|err| {
            AppError::Internal(format!("failed to read policy {}: {err}", path.display()))
        })?;
        let policy: DeliveryPolicy = serde_json::from_str(&raw).map_err(|err| {
            AppError::Internal(format!("failed to parse policy {}: {err}", path.display()))
        })?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        self.banner_eta.validate("banner_eta")?;
        self.checkout_eta.validate("checkout_eta")?;
        self.fee.validate()?;
        self.checkout.validate()
    }

    pub fn delivery_time(&self, distance_km: f64) -> &str {
        self.banner_eta.label_for(distance_km)
    }

    pub fn expected_delivery_time(&self, distance_km: f64) -> &str {
        self.checkout_eta.label_for(distance_km)
    }

    pub fn delivery_fee(&self, distance_km: f64, order_amount: f64) -> f64 {
        self.fee.fee_for(distance_km, order_amount)
    }

    pub fn quote(
        &self,
        distance_km: f64,
        order_amount: f64,
    ) -> Result<DeliveryFeeQuote, ValidationError> {
        check_amount("distance_km", distance_km)?;
        check_amount("order_amount", order_amount)?;

        Ok(DeliveryFeeQuote {
            distance_km,
            order_amount,
            fee: self.delivery_fee(distance_km, order_amount),
            delivery_time: self.delivery_time(distance_km).to_string(),
            expected_delivery: self.expected_delivery_time(distance_km).to_string(),
        })
    }

    /// Prices a basket. An active delivery pass waives the delivery fee
    /// but not the small-order or platform fees.
    pub fn checkout_summary(
        &self,
        distance_km: f64,
        item_total: f64,
        has_delivery_pass: bool,
    ) -> Result<CheckoutSummary, ValidationError> {
        check_amount("distance_km", distance_km)?;
        check_amount("item_total", item_total)?;

        let delivery_fee = if has_delivery_pass {
            0.0
        } else {
            self.delivery_fee(distance_km, item_total)
        };
        let small_order_fee = self.checkout.small_order_fee_for(item_total);
        let platform_fee = self.checkout.platform_fee_for(item_total);

        Ok(CheckoutSummary {
            item_total,
            distance_km,
            delivery_fee,
            delivery_fee_waived_by_pass: has_delivery_pass,
            small_order_fee,
            platform_fee,
            total: item_total + delivery_fee + small_order_fee + platform_fee,
            expected_delivery: self.expected_delivery_time(distance_km).to_string(),
        })
    }
}

fn check_amount(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field, value });
    }
    if value < 0.0 {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(())
}

/// Listing banner estimate from the built-in policy.
pub fn delivery_time(distance_km: f64) -> &'static str {
    BUILT_IN.delivery_time(distance_km)
}

/// Checkout estimate from the built-in policy.
pub fn expected_delivery_time(distance_km: f64) -> &'static str {
    BUILT_IN.expected_delivery_time(distance_km)
}

pub fn delivery_fee(distance_km: f64, order_amount: f64) -> f64 {
    BUILT_IN.delivery_fee(distance_km, order_amount)
}
