//! Per-render resolution session
//!
//! Tracks the [`ResolutionState`] of the recipient currently shown. Each
//! [`submit`](ResolutionSession::submit) supersedes the previous input: its
//! waiter is aborted and a generation check keeps late results out.

use crate::{
    application::services::NameResolutionService,
    domain::{checkout::is_name_like, ens::normalize_name, resolution::ResolutionState},
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

pub struct ResolutionSession {
    service: Arc<NameResolutionService>,
    generation: Arc<AtomicU64>,
    state: Arc<watch::Sender<ResolutionState>>,
    waiter: Mutex<Option<JoinHandle<()>>>,
}

impl ResolutionSession {
    pub fn new(service: Arc<NameResolutionService>) -> Self {
        let (state, _) = watch::channel(ResolutionState::Unresolved);
        Self {
            service,
            generation: Arc::new(AtomicU64::new(0)),
            state: Arc::new(state),
            waiter: Mutex::new(None),
        }
    }

    /// Start resolving `recipient`, replacing whatever was submitted before.
    ///
    /// Literal recipients settle immediately. Names publish `Resolving` and join
    /// the shared lookup for their normalized form; names that cannot be
    /// normalized fail without a lookup.
    pub fn submit(&self, recipient: &str) -> ResolutionState {
        if let Some(previous) = self.waiter.lock().unwrap_or_else(|e| e.into_inner()).take() {
            previous.abort();
        }

        let normalized = if is_name_like(recipient) {
            Some(normalize_name(recipient))
        } else {
            None
        };

        let initial = match &normalized {
            None => ResolutionState::Resolved(recipient.to_string()),
            Some(None) => ResolutionState::Failed,
            Some(Some(_)) => ResolutionState::Resolving,
        };

        let mut generation = 0;
        self.state.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = initial.clone();
        });

        if let Some(Some(name)) = normalized {
            let lookup = self.service.lookup(&name);
            let current = self.generation.clone();
            let state = self.state.clone();

            let waiter = tokio::spawn(async move {
                let settled = lookup.await.into_state();
                let applied = state.send_if_modified(|value| {
                    if current.load(Ordering::SeqCst) != generation {
                        return false;
                    }
                    *value = settled.clone();
                    true
                });
                if !applied {
                    debug!(name = %name, "Discarding result for superseded input");
                }
            });
            *self.waiter.lock().unwrap_or_else(|e| e.into_inner()) = Some(waiter);
        }

        initial
    }

    /// Current state
    pub fn state(&self) -> ResolutionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ResolutionState> {
        self.state.subscribe()
    }

    /// Wait until the current input settles, or `timeout` elapses.
    ///
    /// Returns the state at that point, which is still `Resolving` on timeout.
    pub async fn wait_settled(&self, timeout: Duration) -> ResolutionState {
        let mut receiver = self.subscribe();
        let settled = match tokio::time::timeout(timeout, receiver.wait_for(ResolutionState::is_settled)).await {
            Ok(Ok(state)) => state.clone(),
            _ => self.state(),
        };
        settled
    }
}

impl Drop for ResolutionSession {
    fn drop(&mut self) {
        if let Some(waiter) = self.waiter.lock().unwrap_or_else(|e| e.into_inner()).take() {
            waiter.abort();
        }
    }
}
