//! Payment widget lifecycle events

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifecycle callback reported by the payment widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentEventKind {
    Started,
    Completed,
}

impl PaymentEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentEventKind::Started => "started",
            PaymentEventKind::Completed => "completed",
        }
    }
}

/// Event posted by the checkout page. `payment` is the widget's opaque payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentEvent {
    pub event: PaymentEventKind,
    #[serde(default)]
    pub payment: Value,
}
