//! Name resolution service
//!
//! Single-flight, memoized, time-bounded lookups on top of a [`NameResolver`].

use crate::{
    domain::resolution::{LookupOutcome, NameResolver},
    infrastructure::adapters::{MonitoringAdapter, ResolutionCache},
};
use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// A lookup any number of callers can await
pub type SharedLookup = Shared<BoxFuture<'static, LookupOutcome>>;

type InFlight = Arc<Mutex<HashMap<String, SharedLookup>>>;

/// Resolves normalized names, sharing in-flight lookups and memoizing outcomes
pub struct NameResolutionService {
    resolver: Arc<dyn NameResolver>,
    cache: Arc<ResolutionCache>,
    in_flight: InFlight,
    timeout: Duration,
    monitoring: Arc<MonitoringAdapter>,
}

impl NameResolutionService {
    /// Create a new resolution service
    pub fn new(
        resolver: Arc<dyn NameResolver>,
        cache: Arc<ResolutionCache>,
        timeout: Duration,
        monitoring: Arc<MonitoringAdapter>,
    ) -> Self {
        Self {
            resolver,
            cache,
            in_flight: Arc::new(Mutex::new(HashMap::new())),
            timeout,
            monitoring,
        }
    }

    /// Backing resolver, for health checks
    pub fn resolver(&self) -> Arc<dyn NameResolver> {
        self.resolver.clone()
    }

    /// Memoized outcome for `name`, without starting a lookup
    pub async fn cached(&self, name: &str) -> Option<LookupOutcome> {
        self.cache.get(name).await
    }

    /// Resolve `name`, reusing the memo or an in-flight lookup when possible
    pub async fn resolve(&self, name: &str) -> LookupOutcome {
        if let Some(outcome) = self.cache.get(name).await {
            return outcome;
        }
        self.lookup(name).await
    }

    /// Join the in-flight lookup for `name`, starting one if there is none.
    ///
    /// The lookup runs on its own task; dropping the returned future does not
    /// cancel it.
    pub fn lookup(&self, name: &str) -> SharedLookup {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(existing) = in_flight.get(name) {
            return existing.clone();
        }

        let task = tokio::spawn(run_lookup(
            name.to_string(),
            self.resolver.clone(),
            self.cache.clone(),
            self.in_flight.clone(),
            self.timeout,
            self.monitoring.clone(),
        ));

        let shared = task
            .map(|joined| {
                joined.unwrap_or_else(|e| LookupOutcome::Failed(format!("lookup task failed: {}", e)))
            })
            .boxed()
            .shared();
        in_flight.insert(name.to_string(), shared.clone());
        shared
    }

    /// Number of lookups currently running
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

async fn run_lookup(
    name: String,
    resolver: Arc<dyn NameResolver>,
    cache: Arc<ResolutionCache>,
    in_flight: InFlight,
    timeout: Duration,
    monitoring: Arc<MonitoringAdapter>,
) -> LookupOutcome {
    // A lookup that settled between the caller's memo check and now
    let outcome = match cache.get(&name).await {
        Some(outcome) => outcome,
        None => {
            let started = Instant::now();
            let outcome = match tokio::time::timeout(timeout, resolver.resolve(&name)).await {
                Ok(Ok(Some(address))) => LookupOutcome::Found(address),
                Ok(Ok(None)) => LookupOutcome::NotFound,
                Ok(Err(e)) => {
                    warn!(name = %name, error = %e, "ENS lookup failed");
                    LookupOutcome::Failed(e.to_string())
                }
                Err(_) => {
                    warn!(name = %name, timeout_ms = timeout.as_millis() as u64, "ENS lookup timed out");
                    LookupOutcome::Failed("lookup timed out".to_string())
                }
            };

            let elapsed = started.elapsed();
            monitoring.record_lookup(outcome.label(), elapsed);
            info!(
                name = %name,
                outcome = outcome.label(),
                duration_ms = elapsed.as_millis() as u64,
                "ENS lookup settled"
            );
            cache.put(&name, &outcome).await;
            outcome
        }
    };

    in_flight.lock().unwrap_or_else(|e| e.into_inner()).remove(&name);
    outcome
}
