use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::rest::extract::ApiJson;
use crate::engine::lifecycle::{place_order, transition_order, PlaceOrderRequest, TransitionRequest};
use crate::error::AppError;
use crate::models::notification::StatusNotification;
use crate::models::order::{Order, OrderStatus};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/orders", post(create_order).get(list_orders))
        .route("/orders/:id", get(get_order))
        .route("/orders/:id/status", post(update_status))
        .route("/orders/:id/notification", get(notification))
        .route("/statuses", get(list_statuses))
}

/// The status tag stays a string here so an unknown tag is reported as a
/// validation error rather than a body rejection.
#[derive(Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
    #[serde(default)]
    pub partner_id: Option<Uuid>,
    #[serde(default)]
    pub pin: Option<String>,
}

#[derive(Serialize)]
pub struct StatusInfo {
    pub status: OrderStatus,
    pub label: &'static str,
    pub short_label: &'static str,
    pub terminal: bool,
    pub progress_index: Option<usize>,
    pub next: &'static [OrderStatus],
}

async fn create_order(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<PlaceOrderRequest>,
) -> Result<Json<Order>, AppError> {
    let order = place_order(&state, payload)?;
    Ok(Json(order))
}

async fn list_orders(State(state): State<Arc<AppState>>) -> Json<Vec<Order>> {
    let mut orders: Vec<Order> = state
        .orders
        .iter()
        .map(|entry| entry.value().clone())
        .collect();
    orders.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

    Json(orders)
}

async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, AppError> {
    let order = state
        .orders
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("order {} not found", id)))?;

    Ok(Json(order.value().clone()))
}

async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    ApiJson(payload): ApiJson<StatusUpdateRequest>,
) -> Result<Json<Order>, AppError> {
    let request = TransitionRequest {
        status: payload.status.trim().parse::<OrderStatus>()?,
        partner_id: payload.partner_id,
        pin: payload.pin,
    };
    let order = transition_order(&state, id, request)?;
    Ok(Json(order))
}

async fn notification(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<StatusNotification>, AppError> {
    let order = state
        .orders
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("order {} not found", id)))?;

    StatusNotification::for_status(order.status, &order.seller_name)
        .map(Json)
        .ok_or_else(|| {
            AppError::NotFound(format!("no notification for status {}", order.status))
        })
}

async fn list_statuses() -> Json<Vec<StatusInfo>> {
    let statuses = OrderStatus::ALL
        .into_iter()
        .map(|status| StatusInfo {
            status,
            label: status.label(),
            short_label: status.short_label(),
            terminal: status.is_terminal(),
            progress_index: status.progress_index(),
            next: status.allowed_next(),
        })
        .collect();

    Json(statuses)
}
