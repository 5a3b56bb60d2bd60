use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGaugeVec, Opts, Registry, TextEncoder,
};

use crate::models::order::OrderStatus;

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub quotes_total: IntCounterVec,
    pub quote_latency_seconds: HistogramVec,
    pub status_transitions_total: IntCounterVec,
    pub orders_by_status: IntGaugeVec,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let quotes_total = IntCounterVec::new(
            Opts::new("quotes_total", "Delivery quotes served by checkout estimate"),
            &["eta"],
        )
        .expect("valid quotes_total metric");

        let quote_latency_seconds = HistogramVec::new(
            HistogramOpts::new(
                "quote_latency_seconds",
                "Latency of quote and checkout pricing in seconds",
            ),
            &["kind"],
        )
        .expect("valid quote_latency_seconds metric");

        let status_transitions_total = IntCounterVec::new(
            Opts::new(
                "status_transitions_total",
                "Order status transitions by outcome",
            ),
            &["outcome"],
        )
        .expect("valid status_transitions_total metric");

        let orders_by_status = IntGaugeVec::new(
            Opts::new("orders_by_status", "Orders currently in each status"),
            &["status"],
        )
        .expect("valid orders_by_status metric");

        registry
            .register(Box::new(quotes_total.clone()))
            .expect("register quotes_total");
        registry
            .register(Box::new(quote_latency_seconds.clone()))
            .expect("register quote_latency_seconds");
        registry
            .register(Box::new(status_transitions_total.clone()))
            .expect("register status_transitions_total");
        registry
            .register(Box::new(orders_by_status.clone()))
            .expect("register orders_by_status");

        for status in OrderStatus::ALL {
            orders_by_status.with_label_values(&[status.as_str()]).set(0);
        }

        Self {
            registry,
            quotes_total,
            quote_latency_seconds,
            status_transitions_total,
            orders_by_status,
        }
    }

    pub fn record_status_move(&self, from: Option<OrderStatus>, to: OrderStatus) {
        if let Some(from) = from {
            self.orders_by_status
                .with_label_values(&[from.as_str()])
                .dec();
        }
        self.orders_by_status.with_label_values(&[to.as_str()]).inc();
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
