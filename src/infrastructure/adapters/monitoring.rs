//! Monitoring adapter for metrics and observability
//!
//! This adapter owns the Prometheus registry for checkout, lookup and
//! payment-event metrics.

use crate::shared::error::{AppError, AppResult};
use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry};
use std::time::Duration;

/// Adapter for monitoring and metrics services
pub struct MonitoringAdapter {
    prometheus_registry: Registry,
    checkout_requests: IntCounterVec,
    ens_lookups: IntCounterVec,
    ens_lookup_duration: Histogram,
    payment_events: IntCounterVec,
    rate_limited_requests: IntCounter,
}

impl MonitoringAdapter {
    /// Create a new monitoring adapter
    pub fn new() -> AppResult<Self> {
        let registry = Registry::new();

        let checkout_requests = IntCounterVec::new(
            Opts::new("checkout_requests_total", "Checkout requests by resulting page state"),
            &["state"],
        )
        .map_err(metrics_error)?;

        let ens_lookups = IntCounterVec::new(
            Opts::new("ens_lookups_total", "ENS lookups by outcome"),
            &["outcome"],
        )
        .map_err(metrics_error)?;

        let ens_lookup_duration = Histogram::with_opts(
            HistogramOpts::new("ens_lookup_duration_seconds", "ENS lookup duration in seconds")
                .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        )
        .map_err(metrics_error)?;

        let payment_events = IntCounterVec::new(
            Opts::new("payment_events_total", "Payment widget lifecycle events"),
            &["event"],
        )
        .map_err(metrics_error)?;

        let rate_limited_requests = IntCounter::new(
            "rate_limited_requests_total",
            "Requests rejected by the rate limiter",
        )
        .map_err(metrics_error)?;

        // Register metrics with registry
        registry.register(Box::new(checkout_requests.clone())).map_err(metrics_error)?;
        registry.register(Box::new(ens_lookups.clone())).map_err(metrics_error)?;
        registry.register(Box::new(ens_lookup_duration.clone())).map_err(metrics_error)?;
        registry.register(Box::new(payment_events.clone())).map_err(metrics_error)?;
        registry.register(Box::new(rate_limited_requests.clone())).map_err(metrics_error)?;

        Ok(Self {
            prometheus_registry: registry,
            checkout_requests,
            ens_lookups,
            ens_lookup_duration,
            payment_events,
            rate_limited_requests,
        })
    }

    /// Count a checkout request by the state it rendered
    pub fn record_checkout(&self, state: &str) {
        self.checkout_requests.with_label_values(&[state]).inc();
    }

    /// Record a settled lookup
    pub fn record_lookup(&self, outcome: &str, duration: Duration) {
        self.ens_lookups.with_label_values(&[outcome]).inc();
        self.ens_lookup_duration.observe(duration.as_secs_f64());
    }

    /// Count a widget lifecycle event
    pub fn record_payment_event(&self, event: &str) {
        self.payment_events.with_label_values(&[event]).inc();
    }

    /// Record rate limited request
    pub fn record_rate_limited_request(&self) {
        self.rate_limited_requests.inc();
    }

    /// Get Prometheus metrics in text format
    pub fn get_prometheus_metrics(&self) -> AppResult<String> {
        let mut buffer = Vec::new();
        let encoder = prometheus::TextEncoder::new();
        encoder
            .encode(&self.prometheus_registry.gather(), &mut buffer)
            .map_err(metrics_error)?;
        String::from_utf8(buffer)
            .map_err(|e| AppError::Internal(format!("Metrics are not valid UTF-8: {}", e)))
    }
}

fn metrics_error(e: prometheus::Error) -> AppError {
    AppError::Internal(format!("Metrics error: {}", e))
}
