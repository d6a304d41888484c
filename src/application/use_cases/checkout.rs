use crate::{
    application::services::{CheckoutService, MetricsService},
    domain::checkout::{CheckoutRequest, CheckoutState},
    infrastructure::adapters::MonitoringAdapter,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Use case for preparing a checkout page
pub struct PrepareCheckoutUseCase {
    checkout_service: Arc<CheckoutService>,
    metrics_service: Arc<MetricsService>,
    monitoring: Arc<MonitoringAdapter>,
}

impl PrepareCheckoutUseCase {
    /// Create a new use case
    pub fn new(
        checkout_service: Arc<CheckoutService>,
        metrics_service: Arc<MetricsService>,
        monitoring: Arc<MonitoringAdapter>,
    ) -> Self {
        Self {
            checkout_service,
            metrics_service,
            monitoring,
        }
    }

    /// Execute checkout preparation, waiting at most `wait` for name resolution
    pub async fn execute(&self, request: &CheckoutRequest, wait: Duration) -> CheckoutState {
        let started = Instant::now();
        let state = self.checkout_service.prepare(request, wait).await;

        self.metrics_service.record_checkout(state.label());
        self.metrics_service.record_response_time(started.elapsed().as_millis() as u64);
        self.monitoring.record_checkout(state.label());

        state
    }

    /// Count a request turned away by the rate limiter
    pub fn record_rate_limited(&self) {
        self.metrics_service.record_rate_limited_request();
        self.monitoring.record_rate_limited_request();
    }
}
