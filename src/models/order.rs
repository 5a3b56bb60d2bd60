use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::geo::GeoPoint;
use crate::models::quote::CheckoutSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Accepted,
    Preparing,
    Packed,
    Assigned,
    GoingForPickup,
    PickedUp,
    GoingForDelivery,
    Delivered,
    Rejected,
    Refunded,
    Cancelled,
}

/// Fulfilment order used for tracking progress.
const FULFILMENT_SEQUENCE: [OrderStatus; 9] = [
    OrderStatus::Pending,
    OrderStatus::Accepted,
    OrderStatus::Preparing,
    OrderStatus::Packed,
    OrderStatus::Assigned,
    OrderStatus::GoingForPickup,
    OrderStatus::PickedUp,
    OrderStatus::GoingForDelivery,
    OrderStatus::Delivered,
];

impl OrderStatus {
    pub const ALL: [OrderStatus; 12] = [
        OrderStatus::Pending,
        OrderStatus::Accepted,
        OrderStatus::Preparing,
        OrderStatus::Packed,
        OrderStatus::Assigned,
        OrderStatus::GoingForPickup,
        OrderStatus::PickedUp,
        OrderStatus::GoingForDelivery,
        OrderStatus::Delivered,
        OrderStatus::Rejected,
        OrderStatus::Refunded,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Accepted => "accepted",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Packed => "packed",
            OrderStatus::Assigned => "assigned",
            OrderStatus::GoingForPickup => "going_for_pickup",
            OrderStatus::PickedUp => "picked_up",
            OrderStatus::GoingForDelivery => "going_for_delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Rejected => "rejected",
            OrderStatus::Refunded => "refunded",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Order Placed",
            OrderStatus::Accepted => "Accepted",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Packed => "Packed",
            OrderStatus::Assigned => "Assigned",
            OrderStatus::GoingForPickup => "Going for Pickup",
            OrderStatus::PickedUp => "Picked Up",
            OrderStatus::GoingForDelivery => "Out for Delivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Rejected => "Rejected",
            OrderStatus::Refunded => "Refunded",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Compact label for the floating tracking chip.
    pub fn short_label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Placed",
            OrderStatus::GoingForPickup => "Pickup",
            OrderStatus::PickedUp => "Picked",
            OrderStatus::GoingForDelivery => "On Way",
            other => other.label(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Delivered
                | OrderStatus::Rejected
                | OrderStatus::Refunded
                | OrderStatus::Cancelled
        )
    }

    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }

    pub fn progress_index(&self) -> Option<usize> {
        FULFILMENT_SEQUENCE.iter().position(|status| status == self)
    }

    /// Statuses this one may move to. Rejected and cancelled orders end
    /// fulfilment but can still be settled by a refund.
    pub fn allowed_next(&self) -> &'static [OrderStatus] {
        use OrderStatus::*;

        match self {
            Pending => &[Accepted, Rejected, Cancelled],
            Accepted => &[Preparing, Cancelled],
            Preparing => &[Packed],
            Packed => &[Assigned],
            Assigned => &[GoingForPickup],
            GoingForPickup => &[PickedUp],
            PickedUp => &[GoingForDelivery],
            GoingForDelivery => &[Delivered],
            Rejected | Cancelled => &[Refunded],
            Delivered | Refunded => &[],
        }
    }

    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        self.allowed_next().contains(&next)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == raw)
            .ok_or_else(|| ValidationError::UnknownStatus(raw.to_string()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusChange {
    pub order_id: Uuid,
    pub from: OrderStatus,
    pub to: OrderStatus,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub seller_name: String,
    pub pickup: GeoPoint,
    pub dropoff: GeoPoint,
    pub summary: CheckoutSummary,
    pub status: OrderStatus,
    pub delivery_partner: Option<Uuid>,
    pub pickup_pin: Option<String>,
    pub delivery_pin: String,
    pub history: Vec<StatusChange>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// When the order entered `status`, if it ever did.
    pub fn reached_at(&self, status: OrderStatus) -> Option<DateTime<Utc>> {
        if status == OrderStatus::Pending {
            return Some(self.created_at);
        }
        self.history
            .iter()
            .find(|change| change.to == status)
            .map(|change| change.at)
    }
}
