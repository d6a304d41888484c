//! Recipient name resolution model

use crate::shared::error::AppResult;
use async_trait::async_trait;
use serde::Serialize;

/// Lifecycle of the recipient lookup for the current input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "address", rename_all = "snake_case")]
pub enum ResolutionState {
    /// No lookup started for the current input
    Unresolved,
    Resolving,
    Resolved(String),
    Failed,
}

impl ResolutionState {
    /// `Resolved` and `Failed` are final for a given input
    pub fn is_settled(&self) -> bool {
        matches!(self, ResolutionState::Resolved(_) | ResolutionState::Failed)
    }

    pub fn address(&self) -> Option<&str> {
        match self {
            ResolutionState::Resolved(address) => Some(address),
            _ => None,
        }
    }
}

/// Settled result of one lookup, shared by every caller joined to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(String),
    /// The registry has no resolver or no address for the name
    NotFound,
    /// Transport error or timeout
    Failed(String),
}

impl LookupOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            LookupOutcome::Found(_) => "found",
            LookupOutcome::NotFound => "not_found",
            LookupOutcome::Failed(_) => "failed",
        }
    }

    pub fn into_state(self) -> ResolutionState {
        match self {
            LookupOutcome::Found(address) => ResolutionState::Resolved(address),
            LookupOutcome::NotFound | LookupOutcome::Failed(_) => ResolutionState::Failed,
        }
    }
}

/// Maps a normalized name to an account address
#[async_trait]
pub trait NameResolver: Send + Sync {
    /// `Ok(None)` when the name has no address
    async fn resolve(&self, name: &str) -> AppResult<Option<String>>;

    /// Whether the backing service is reachable and serving the right network
    async fn is_available(&self) -> bool {
        true
    }
}
