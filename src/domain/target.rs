//! Payment target derivation

use crate::domain::checkout::CheckoutRequest;
use crate::domain::networks::{is_supported, stable_token_address};
use serde::Serialize;

/// How much the payer is asked for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AmountMode {
    /// The payer picks the amount in the widget
    #[default]
    Open,
}

impl AmountMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AmountMode::Open => "open",
        }
    }
}

/// Everything the payment widget needs to settle a purchase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTarget {
    pub destination_address: String,
    pub destination_network: u64,
    pub destination_token_address: String,
    pub intent_label: String,
    pub amount_mode: AmountMode,
    /// `false` when the token address is the zero placeholder
    pub token_supported: bool,
}

/// Intent text shown by the widget
pub fn intent_label(product: &str) -> String {
    format!("Purchase {}", product)
}

/// Build the payment target for a request whose recipient is `resolved_address`.
///
/// Never fails: unknown networks get the zero token address.
pub fn derive_target(request: &CheckoutRequest, resolved_address: &str) -> PaymentTarget {
    let chain = request.chain();
    PaymentTarget {
        destination_address: resolved_address.to_string(),
        destination_network: chain,
        destination_token_address: stable_token_address(chain).to_string(),
        intent_label: intent_label(request.product.as_deref().unwrap_or_default()),
        amount_mode: AmountMode::Open,
        token_supported: is_supported(chain),
    }
}
