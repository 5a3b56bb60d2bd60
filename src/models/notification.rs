use serde::Serialize;

use crate::models::order::OrderStatus;

/// Customer-facing copy for a status change. Delivery of the
/// notification is left to the client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusNotification {
    pub title: String,
    pub body: String,
    pub tag: String,
    pub require_interaction: bool,
}

impl StatusNotification {
    pub fn for_status(status: OrderStatus, seller_name: &str) -> Option<Self> {
        let (title, body) = match status {
            OrderStatus::Accepted => (
                "Order Accepted!",
                format!("{seller_name} has accepted your order and will start preparing soon."),
            ),
            OrderStatus::Preparing => (
                "Preparing Your Order",
                format!("{seller_name} is now preparing your order."),
            ),
            OrderStatus::Packed => (
                "Order Packed!",
                format!("Your order from {seller_name} is packed and ready for pickup."),
            ),
            OrderStatus::Assigned => (
                "Delivery Partner Assigned",
                "A delivery partner has been assigned to pick up your order.".to_string(),
            ),
            OrderStatus::GoingForPickup => (
                "Partner On The Way",
                format!("Your delivery partner is heading to {seller_name} to pick up your order."),
            ),
            OrderStatus::PickedUp => (
                "Order Picked Up!",
                format!("Your order has been picked up from {seller_name}."),
            ),
            OrderStatus::GoingForDelivery => (
                "Out for Delivery!",
                "Your order is on its way! Get ready to receive it.".to_string(),
            ),
            OrderStatus::Delivered => (
                "Order Delivered!",
                format!("Enjoy your order from {seller_name}! Don't forget to rate your experience."),
            ),
            _ => return None,
        };

        Some(Self {
            title: title.to_string(),
            body,
            tag: format!("order-status-{status}"),
            require_interaction: status == OrderStatus::Delivered,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::StatusNotification;
    use crate::models::order::OrderStatus;

    #[test]
    fn delivered_requires_interaction() {
        let note = StatusNotification::for_status(OrderStatus::Delivered, "Green Farm").unwrap();
        assert!(note.require_interaction);
        assert_eq!(note.tag, "order-status-delivered");
        assert!(note.body.contains("Green Farm"));
    }

    #[test]
    fn progress_updates_do_not_require_interaction() {
        let note = StatusNotification::for_status(OrderStatus::PickedUp, "Green Farm").unwrap();
        assert!(!note.require_interaction);
        assert_eq!(note.tag, "order-status-picked_up");
    }

    #[test]
    fn placement_and_settlement_have_no_copy() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Rejected,
            OrderStatus::Refunded,
            OrderStatus::Cancelled,
        ] {
            assert!(StatusNotification::for_status(status, "x").is_none());
        }
    }
}
