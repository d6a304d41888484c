//! Checkout service - turns a parsed request into a page state

use crate::{
    application::services::{NameResolutionService, ResolutionSession},
    domain::{
        checkout::{is_name_like, CheckoutRequest, CheckoutState},
        ens::normalize_name,
        networks::is_supported,
        resolution::ResolutionState,
        target::derive_target,
    },
};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Composes parameter validation, recipient resolution and target derivation
pub struct CheckoutService {
    resolution: Arc<NameResolutionService>,
    reject_unsupported_networks: bool,
}

impl CheckoutService {
    /// Create a new checkout service
    pub fn new(resolution: Arc<NameResolutionService>, reject_unsupported_networks: bool) -> Self {
        Self {
            resolution,
            reject_unsupported_networks,
        }
    }

    /// Work out what the checkout page shows for `request`.
    ///
    /// Waits at most `wait` for a name lookup; when it has not settled by then the
    /// result is `Resolving` and the lookup keeps running in the background.
    pub async fn prepare(&self, request: &CheckoutRequest, wait: Duration) -> CheckoutState {
        let missing = request.missing_parameters();
        if !missing.is_empty() {
            return CheckoutState::MissingParameters {
                missing: missing.into_iter().map(str::to_string).collect(),
            };
        }
        let Some(recipient) = request.recipient.as_deref() else {
            return CheckoutState::MissingParameters { missing: vec!["a".to_string()] };
        };

        let chain = request.chain();
        if self.reject_unsupported_networks && !is_supported(chain) {
            return CheckoutState::UnsupportedNetwork { chain_id: chain };
        }

        let state = self.resolve_recipient(recipient, wait).await;
        match state {
            ResolutionState::Resolved(address) => CheckoutState::Ready(derive_target(request, &address)),
            ResolutionState::Failed => CheckoutState::NameResolutionFailed {
                recipient: recipient.to_string(),
            },
            ResolutionState::Resolving | ResolutionState::Unresolved => CheckoutState::Resolving {
                name: normalize_name(recipient).unwrap_or_else(|| recipient.to_string()),
            },
        }
    }

    async fn resolve_recipient(&self, recipient: &str, wait: Duration) -> ResolutionState {
        // Memo hits settle without a session round-trip, so polling clients see
        // the result as soon as it lands.
        if is_name_like(recipient) {
            if let Some(name) = normalize_name(recipient) {
                if let Some(outcome) = self.resolution.cached(&name).await {
                    debug!(name = %name, outcome = outcome.label(), "Resolution memo hit");
                    return outcome.into_state();
                }
            }
        }

        let session = ResolutionSession::new(self.resolution.clone());
        let initial = session.submit(recipient);
        if initial.is_settled() || wait.is_zero() {
            return initial;
        }
        session.wait_settled(wait).await
    }
}
