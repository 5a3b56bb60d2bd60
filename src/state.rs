use dashmap::DashMap;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::models::order::{Order, StatusChange};
use crate::observability::metrics::Metrics;
use crate::policy::DeliveryPolicy;

pub struct AppState {
    pub policy: DeliveryPolicy,
    pub orders: DashMap<Uuid, Order>,
    pub status_events_tx: broadcast::Sender<StatusChange>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(policy: DeliveryPolicy, event_buffer_size: usize) -> Self {
        let (status_events_tx, _unused_rx) = broadcast::channel(event_buffer_size);

        Self {
            policy,
            orders: DashMap::new(),
            status_events_tx,
            metrics: Metrics::new(),
        }
    }
}
