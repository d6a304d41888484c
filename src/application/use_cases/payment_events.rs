use crate::{
    application::services::MetricsService,
    domain::payment_events::{PaymentEvent, PaymentEventKind},
    infrastructure::adapters::MonitoringAdapter,
};
use std::sync::Arc;
use tracing::info;

/// Use case for recording payment widget callbacks
pub struct RecordPaymentEventUseCase {
    metrics_service: Arc<MetricsService>,
    monitoring: Arc<MonitoringAdapter>,
}

impl RecordPaymentEventUseCase {
    /// Create a new use case
    pub fn new(metrics_service: Arc<MetricsService>, monitoring: Arc<MonitoringAdapter>) -> Self {
        Self {
            metrics_service,
            monitoring,
        }
    }

    /// Log and count a lifecycle event. Settlement is owned by the widget.
    pub fn execute(&self, event: &PaymentEvent, request_id: &str, client_ip: &str) {
        let kind = event.event.as_str();
        match event.event {
            PaymentEventKind::Started => info!(
                request_id = %request_id,
                client_ip = %client_ip,
                payment = %event.payment,
                "Payment started"
            ),
            PaymentEventKind::Completed => info!(
                request_id = %request_id,
                client_ip = %client_ip,
                payment = %event.payment,
                "Payment completed"
            ),
        }

        self.metrics_service.record_payment_event(kind);
        self.monitoring.record_payment_event(kind);
    }

    /// Count a request turned away by the rate limiter
    pub fn record_rate_limited(&self) {
        self.metrics_service.record_rate_limited_request();
        self.monitoring.record_rate_limited_request();
    }
}
