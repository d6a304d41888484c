//! Use cases - Application business operations

pub mod checkout;
pub mod health_check;
pub mod payment_events;

pub use checkout::PrepareCheckoutUseCase;
pub use health_check::HealthCheckUseCase;
pub use payment_events::RecordPaymentEventUseCase;

use crate::application::services::MetricsService;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Use case for getting application metrics
pub struct GetMetricsUseCase {
    metrics_service: Arc<MetricsService>,
}

impl GetMetricsUseCase {
    /// Create a new use case
    pub fn new(metrics_service: Arc<MetricsService>) -> Self {
        Self { metrics_service }
    }

    /// Execute the use case
    pub fn execute(&self) -> Value {
        debug!("Getting application metrics");
        self.metrics_service.get_metrics()
    }
}
