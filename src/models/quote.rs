use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryFeeQuote {
    pub distance_km: f64,
    pub order_amount: f64,
    pub fee: f64,
    pub delivery_time: String,
    pub expected_delivery: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSummary {
    pub item_total: f64,
    pub distance_km: f64,
    pub delivery_fee: f64,
    pub delivery_fee_waived_by_pass: bool,
    pub small_order_fee: f64,
    pub platform_fee: f64,
    pub total: f64,
    pub expected_delivery: String,
}
