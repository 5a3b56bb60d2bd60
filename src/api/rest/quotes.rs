use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use serde::{Deserialize, Serialize};

use crate::api::rest::extract::ApiJson;
use crate::error::AppError;
use crate::geo::{distance_between, format_distance, GeoPoint};
use crate::models::quote::{CheckoutSummary, DeliveryFeeQuote};
use crate::policy::DeliveryPolicy;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/distance", post(distance))
        .route("/quotes", post(create_quote))
        .route("/checkout", post(checkout))
        .route("/policy", get(policy))
}

#[derive(Deserialize)]
pub struct DistanceRequest {
    pub from: GeoPoint,
    pub to: GeoPoint,
}

#[derive(Serialize)]
pub struct DistanceResponse {
    pub distance_km: f64,
    pub formatted: String,
}

/// Either a precomputed distance or both endpoints.
#[derive(Deserialize)]
pub struct QuoteRequest {
    pub distance_km: Option<f64>,
    pub from: Option<GeoPoint>,
    pub to: Option<GeoPoint>,
    pub order_amount: f64,
}

#[derive(Deserialize)]
pub struct CheckoutRequest {
    pub from: GeoPoint,
    pub to: GeoPoint,
    pub item_total: f64,
    #[serde(default)]
    pub has_delivery_pass: bool,
}

async fn distance(
    ApiJson(payload): ApiJson<DistanceRequest>,
) -> Result<Json<DistanceResponse>, AppError> {
    let distance_km = distance_between(&payload.from, &payload.to)?;

    Ok(Json(DistanceResponse {
        distance_km,
        formatted: format_distance(distance_km),
    }))
}

async fn create_quote(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<QuoteRequest>,
) -> Result<Json<DeliveryFeeQuote>, AppError> {
    let start = Instant::now();

    let distance_km = match (payload.distance_km, payload.from, payload.to) {
        (Some(distance_km), None, None) => distance_km,
        (None, Some(from), Some(to)) => distance_between(&from, &to)?,
        _ => {
            return Err(AppError::BadRequest(
                "provide either distance_km or both from and to".to_string(),
            ));
        }
    };

    let quote = state.policy.quote(distance_km, payload.order_amount)?;

    state
        .metrics
        .quotes_total
        .with_label_values(&[quote.expected_delivery.as_str()])
        .inc();
    state
        .metrics
        .quote_latency_seconds
        .with_label_values(&["quote"])
        .observe(start.elapsed().as_secs_f64());

    Ok(Json(quote))
}

async fn checkout(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<CheckoutRequest>,
) -> Result<Json<CheckoutSummary>, AppError> {
    let start = Instant::now();

    let distance_km = distance_between(&payload.from, &payload.to)?;
    let summary =
        state
            .policy
            .checkout_summary(distance_km, payload.item_total, payload.has_delivery_pass)?;

    state
        .metrics
        .quote_latency_seconds
        .with_label_values(&["checkout"])
        .observe(start.elapsed().as_secs_f64());

    Ok(Json(summary))
}

async fn policy(State(state): State<Arc<AppState>>) -> Json<DeliveryPolicy> {
    Json(state.policy.clone())
}
