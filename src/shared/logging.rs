//! Logging utilities module
//!
//! This module provides centralized logging functionality and utilities.

use tracing::{info, warn};

/// Logging utilities for the application
pub struct LoggingUtils;

impl LoggingUtils {
    /// Initialize logging with the specified configuration.
    ///
    /// `RUST_LOG` takes precedence over `level`. `format` is either `json` or `text`;
    /// with `structured` set, JSON output flattens event fields into the top-level object.
    pub fn initialize(level: &str, format: &str, structured: bool) -> crate::Result<()> {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level));

        let builder = fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false);

        let result = if format.eq_ignore_ascii_case("json") {
            let subscriber = builder
                .json()
                .flatten_event(structured)
                .with_current_span(structured)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
        } else {
            tracing::subscriber::set_global_default(builder.finish())
        };

        result.map_err(|e| {
            crate::shared::error::AppError::Internal(format!("Failed to initialize logging: {}", e))
        })
    }

    /// Log an incoming checkout request
    pub fn log_request(request_id: &str, route: &str, client_ip: &str, query: &str) {
        info!(
            request_id = %request_id,
            route = %route,
            client_ip = %client_ip,
            query = %query,
            "Processing checkout request"
        );
    }

    /// Log the state a checkout request settled in
    pub fn log_outcome(request_id: &str, route: &str, state: &str, duration_ms: u64) {
        info!(
            request_id = %request_id,
            route = %route,
            state = %state,
            duration_ms = %duration_ms,
            "Checkout request completed"
        );
    }

    /// Log rate limiting events
    pub fn log_rate_limit(client_ip: &str, route: &str) {
        warn!(
            client_ip = %client_ip,
            route = %route,
            "Rate limit exceeded"
        );
    }

    /// Generate a unique request ID
    pub fn generate_request_id() -> String {
        format!("req_{}", uuid::Uuid::new_v4().simple())
    }
}
