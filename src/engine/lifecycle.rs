use chrono::Utc;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::engine::pin::{generate_pin, verify_pin};
use crate::error::AppError;
use crate::geo::{distance_between, GeoPoint};
use crate::models::order::{Order, OrderStatus, StatusChange};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    pub seller_name: String,
    pub pickup: GeoPoint,
    pub dropoff: GeoPoint,
    pub item_total: f64,
    #[serde(default)]
    pub has_delivery_pass: bool,
}

#[derive(Debug)]
pub struct TransitionRequest {
    pub status: OrderStatus,
    pub partner_id: Option<Uuid>,
    pub pin: Option<String>,
}

impl TransitionRequest {
    pub fn to(status: OrderStatus) -> Self {
        Self {
            status,
            partner_id: None,
            pin: None,
        }
    }
}

pub fn place_order(state: &AppState, request: PlaceOrderRequest) -> Result<Order, AppError> {
    if request.seller_name.trim().is_empty() {
        return Err(AppError::BadRequest("seller_name cannot be empty".to_string()));
    }

    let distance_km = distance_between(&request.pickup, &request.dropoff)?;
    let summary =
        state
            .policy
            .checkout_summary(distance_km, request.item_total, request.has_delivery_pass)?;

    let now = Utc::now();
    let order = Order {
        id: Uuid::new_v4(),
        seller_name: request.seller_name,
        pickup: request.pickup,
        dropoff: request.dropoff,
        summary,
        status: OrderStatus::Pending,
        delivery_partner: None,
        pickup_pin: None,
        delivery_pin: generate_pin(),
        history: Vec::new(),
        created_at: now,
        updated_at: now,
    };

    state.orders.insert(order.id, order.clone());
    state.metrics.record_status_move(None, OrderStatus::Pending);

    info!(
        order_id = %order.id,
        distance_km,
        total = order.summary.total,
        "order placed"
    );

    Ok(order)
}

/// Moves an order along the lifecycle, rejecting edges the transition
/// table does not allow.
pub fn transition_order(
    state: &AppState,
    order_id: Uuid,
    request: TransitionRequest,
) -> Result<Order, AppError> {
    let outcome = {
        let mut entry = state
            .orders
            .get_mut(&order_id)
            .ok_or_else(|| AppError::NotFound(format!("order {} not found", order_id)))?;

        apply_transition(&mut entry, &request).map(|change| (change, entry.clone()))
    };

    match outcome {
        Ok((Some(change), order)) => {
            state
                .metrics
                .status_transitions_total
                .with_label_values(&["applied"])
                .inc();
            state.metrics.record_status_move(Some(change.from), change.to);

            info!(
                order_id = %order_id,
                from = %change.from,
                to = %change.to,
                "order status changed"
            );
            let _ = state.status_events_tx.send(change);
            Ok(order)
        }
        Ok((None, order)) => {
            state
                .metrics
                .status_transitions_total
                .with_label_values(&["noop"])
                .inc();
            Ok(order)
        }
        Err(err) => {
            state
                .metrics
                .status_transitions_total
                .with_label_values(&["rejected"])
                .inc();
            warn!(order_id = %order_id, to = %request.status, error = %err, "status change rejected");
            Err(err)
        }
    }
}

/// Returns `None` when the order already sits in a settled state the
/// request asks for again.
pub fn apply_transition(
    order: &mut Order,
    request: &TransitionRequest,
) -> Result<Option<StatusChange>, AppError> {
    let from = order.status;
    let to = request.status;

    if from == to && to == OrderStatus::Refunded {
        return Ok(None);
    }

    if !from.can_transition_to(to) {
        return Err(AppError::Conflict(format!(
            "order {} cannot move from {from} to {to}",
            order.id
        )));
    }

    match to {
        OrderStatus::Packed => {
            order.pickup_pin = Some(generate_pin());
        }
        OrderStatus::Assigned => {
            let partner = request.partner_id.ok_or_else(|| {
                AppError::BadRequest("assigning an order requires partner_id".to_string())
            })?;
            order.delivery_partner = Some(partner);
        }
        OrderStatus::PickedUp => {
            verify_pin(order.pickup_pin.as_deref(), request.pin.as_deref(), "pickup")?;
        }
        OrderStatus::Delivered => {
            verify_pin(Some(&order.delivery_pin), request.pin.as_deref(), "delivery")?;
        }
        _ => {}
    }

    let change = StatusChange {
        order_id: order.id,
        from,
        to,
        at: Utc::now(),
    };
    order.status = to;
    order.updated_at = change.at;
    order.history.push(change.clone());

    Ok(Some(change))
}
