//! HTTP handlers module
//!
//! This module contains the endpoint handlers behind each route.

pub mod checkout;
pub mod health;
pub mod metrics;
pub mod payment_events;

pub use checkout::{handle_checkout_page, handle_checkout_state};
pub use health::handle_health_request;
pub use metrics::{handle_metrics_request, handle_prometheus_request};
pub use payment_events::handle_payment_event;
