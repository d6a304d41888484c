//! Application services - Orchestration of domain logic

pub mod checkout_service;
pub mod metrics_service;
pub mod resolution_service;
pub mod resolution_session;

pub use checkout_service::CheckoutService;
pub use metrics_service::MetricsService;
pub use resolution_service::NameResolutionService;
pub use resolution_session::ResolutionSession;
