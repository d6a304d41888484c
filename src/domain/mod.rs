//! Domain layer - Checkout rules and models
//!
//! Request parsing, page states, themes, networks, payment targets and the
//! name resolution model. Nothing here touches HTTP, RPC or caches.

pub mod checkout;
pub mod ens;
pub mod health;
pub mod networks;
pub mod payment_events;
pub mod resolution;
pub mod target;
pub mod theme;

pub use checkout::{is_name_like, CheckoutRequest, CheckoutState};
pub use health::{HealthResponse, HealthStatus};
pub use payment_events::{PaymentEvent, PaymentEventKind};
pub use resolution::{LookupOutcome, NameResolver, ResolutionState};
pub use target::{derive_target, AmountMode, PaymentTarget};
pub use theme::{ColorScheme, ImageSource, Theme};
