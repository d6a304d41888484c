//! HTTP routes module
//!
//! This module contains all HTTP route configurations.

pub mod builder;
pub mod checkout;
pub mod health;
pub mod metrics;
pub mod payment_events;

// Re-export commonly used types
pub use builder::RouteBuilder;
pub use checkout::CheckoutRoutes;
pub use health::HealthRoutes;
pub use metrics::MetricsRoutes;
pub use payment_events::PaymentEventRoutes;
