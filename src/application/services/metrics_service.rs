//! Metrics service for collecting application metrics

use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};

/// JSON counters behind `/metrics`
pub struct MetricsService {
    total_requests: AtomicU64,
    ready_pages: AtomicU64,
    missing_parameters: AtomicU64,
    resolving_pages: AtomicU64,
    failed_resolutions: AtomicU64,
    unsupported_networks: AtomicU64,
    rate_limited_requests: AtomicU64,
    payments_started: AtomicU64,
    payments_completed: AtomicU64,
    total_response_time: AtomicU64,
    response_count: AtomicU64,
    start_time: std::time::Instant,
}

impl MetricsService {
    /// Create a new metrics service
    pub fn new() -> Self {
        Self {
            total_requests: AtomicU64::new(0),
            ready_pages: AtomicU64::new(0),
            missing_parameters: AtomicU64::new(0),
            resolving_pages: AtomicU64::new(0),
            failed_resolutions: AtomicU64::new(0),
            unsupported_networks: AtomicU64::new(0),
            rate_limited_requests: AtomicU64::new(0),
            payments_started: AtomicU64::new(0),
            payments_completed: AtomicU64::new(0),
            total_response_time: AtomicU64::new(0),
            response_count: AtomicU64::new(0),
            start_time: std::time::Instant::now(),
        }
    }

    /// Record a checkout request by the label of the state it produced
    pub fn record_checkout(&self, state: &str) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);

        let counter = match state {
            "ready" => &self.ready_pages,
            "missing_parameters" => &self.missing_parameters,
            "resolving" => &self.resolving_pages,
            "name_resolution_failed" => &self.failed_resolutions,
            "unsupported_network" => &self.unsupported_networks,
            _ => return,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a rate limited request
    pub fn record_rate_limited_request(&self) {
        self.rate_limited_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a payment widget event
    pub fn record_payment_event(&self, event: &str) {
        match event {
            "started" => self.payments_started.fetch_add(1, Ordering::Relaxed),
            "completed" => self.payments_completed.fetch_add(1, Ordering::Relaxed),
            _ => return,
        };
    }

    /// Record response time
    pub fn record_response_time(&self, duration_ms: u64) {
        self.total_response_time.fetch_add(duration_ms, Ordering::Relaxed);
        self.response_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics
    pub fn get_metrics(&self) -> Value {
        let total_response_time = self.total_response_time.load(Ordering::Relaxed);
        let response_count = self.response_count.load(Ordering::Relaxed);

        let avg_response_time_ms = if response_count > 0 {
            total_response_time as f64 / response_count as f64
        } else {
            0.0
        };

        serde_json::json!({
            "total_requests": self.total_requests.load(Ordering::Relaxed),
            "checkout_states": {
                "ready": self.ready_pages.load(Ordering::Relaxed),
                "missing_parameters": self.missing_parameters.load(Ordering::Relaxed),
                "resolving": self.resolving_pages.load(Ordering::Relaxed),
                "name_resolution_failed": self.failed_resolutions.load(Ordering::Relaxed),
                "unsupported_network": self.unsupported_networks.load(Ordering::Relaxed),
            },
            "payment_events": {
                "started": self.payments_started.load(Ordering::Relaxed),
                "completed": self.payments_completed.load(Ordering::Relaxed),
            },
            "rate_limited_requests": self.rate_limited_requests.load(Ordering::Relaxed),
            "avg_response_time_ms": avg_response_time_ms,
            "uptime_seconds": self.start_time.elapsed().as_secs(),
        })
    }
}

impl Default for MetricsService {
    fn default() -> Self {
        Self::new()
    }
}
