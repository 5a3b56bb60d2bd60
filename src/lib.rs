pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod geo;
pub mod models;
pub mod observability;
pub mod policy;
pub mod state;

pub use geo::{calculate_distance, format_distance, GeoPoint};
pub use models::order::OrderStatus;
pub use policy::{delivery_fee, delivery_time, expected_delivery_time, DeliveryPolicy};
