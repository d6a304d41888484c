//! Checkout request parameters and page states

use crate::domain::networks::DEFAULT_CHAIN_ID;
use crate::domain::target::PaymentTarget;
use crate::domain::theme::{ImageSource, Theme};
use serde::Serialize;
use std::collections::HashMap;

/// Suffixes that mark a recipient as a name even without further context
pub const NAME_SUFFIXES: [&str; 3] = [".eth", ".xyz", ".com"];

/// Query keys a checkout link cannot do without
pub const REQUIRED_KEYS: [&str; 2] = ["a", "n"];

/// Parameters of a checkout link.
///
/// | key | field |
/// |---|---|
/// | `a` | recipient address or name |
/// | `c` | destination chain id |
/// | `n` | product label |
/// | `m`, `color` | theme |
/// | `img`, `image` | product image |
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub recipient: Option<String>,
    pub chain_id: Option<u64>,
    pub product: Option<String>,
    pub theme: Theme,
    pub image: Option<String>,
}

impl CheckoutRequest {
    /// Parse a raw (still percent-encoded) query string
    pub fn parse(query: &str) -> Self {
        Self::from_pairs(url::form_urlencoded::parse(query.as_bytes()).into_owned())
    }

    /// Build from decoded key/value pairs. Later duplicates win; unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let params: HashMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        let value = |key: &str| -> Option<String> {
            params
                .get(key)
                .filter(|v| !v.trim().is_empty())
                .cloned()
        };

        let theme = value("m")
            .or_else(|| value("color"))
            .map(|m| Theme::from_param(&m))
            .unwrap_or_default();

        Self {
            recipient: value("a").map(|a| a.trim().to_string()),
            chain_id: value("c").and_then(|c| parse_chain_id(&c)),
            product: value("n"),
            theme,
            image: value("img").or_else(|| value("image")),
        }
    }

    /// Required keys that are absent or empty
    pub fn missing_parameters(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.recipient.is_none() {
            missing.push(REQUIRED_KEYS[0]);
        }
        if self.product.is_none() {
            missing.push(REQUIRED_KEYS[1]);
        }
        missing
    }

    pub fn is_valid(&self) -> bool {
        self.recipient.is_some() && self.product.is_some()
    }

    /// Destination network, falling back to Celo
    pub fn chain(&self) -> u64 {
        self.chain_id.unwrap_or(DEFAULT_CHAIN_ID)
    }

    pub fn image_source(&self) -> ImageSource {
        ImageSource::select(self.image.as_deref(), self.theme)
    }
}

/// Leading decimal digits of a chain id, after optional whitespace and `+`.
///
/// `8453abc` and `8453.0` read as 8453. Chain ids are unsigned, so a leading `-`
/// yields `None` like any other non-digit.
fn parse_chain_id(raw: &str) -> Option<u64> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    unsigned[..end].parse().ok()
}

/// Whether a recipient should go through name resolution.
///
/// Heuristic: anything with a dot, or one of the well-known suffixes.
pub fn is_name_like(recipient: &str) -> bool {
    recipient.contains('.') || NAME_SUFFIXES.iter().any(|suffix| recipient.ends_with(suffix))
}

/// What the checkout page shows for a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CheckoutState {
    /// `a` or `n` missing; the page shows usage help
    MissingParameters { missing: Vec<String> },
    /// No stable token on the destination network (fail-closed mode)
    UnsupportedNetwork {
        #[serde(rename = "chainId")]
        chain_id: u64,
    },
    /// The recipient name has not resolved yet
    Resolving { name: String },
    /// The recipient name did not resolve
    NameResolutionFailed { recipient: String },
    /// Payment target ready for the widget
    Ready(PaymentTarget),
}

impl CheckoutState {
    /// Stable label used in logs and metrics
    pub fn label(&self) -> &'static str {
        match self {
            CheckoutState::MissingParameters { .. } => "missing_parameters",
            CheckoutState::UnsupportedNetwork { .. } => "unsupported_network",
            CheckoutState::Resolving { .. } => "resolving",
            CheckoutState::NameResolutionFailed { .. } => "name_resolution_failed",
            CheckoutState::Ready(_) => "ready",
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, CheckoutState::Ready(_))
    }

    pub fn target(&self) -> Option<&PaymentTarget> {
        match self {
            CheckoutState::Ready(target) => Some(target),
            _ => None,
        }
    }
}
