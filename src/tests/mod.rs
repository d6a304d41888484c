//! Test suite for the checkout server
//!
//! - Shared mocks and service wiring (`common`)
//! - End-to-end request scenarios through the full route tree (`integration`)

pub mod common;
pub mod integration;

/// Test configuration and utilities
pub mod config {
    use crate::config::AppConfig;
    use std::sync::Once;

    static INIT: Once = Once::new();

    /// Initialize test environment
    pub fn init() {
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt()
                .with_env_filter("debug")
                .with_test_writer()
                .try_init();
        });
    }

    /// Create test configuration
    pub fn test_config() -> AppConfig {
        let mut config = AppConfig::default();

        // Configure for testing
        config.cache.enabled = false;
        config.rate_limit.enabled = false;
        config.security.enable_request_logging = false;
        config.checkout.render_wait_ms = 500;
        config.security.trusted_proxy_headers = vec!["X-Forwarded-For".to_string()];

        config
    }

    /// Create production-like test configuration
    pub fn production_test_config() -> AppConfig {
        let mut config = test_config();
        config.rate_limit.enabled = true;
        config.security.enable_request_logging = true;
        config
    }
}

/// Test result types
pub type TestResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_initialization() {
        config::init();
        let test_config = config::test_config();
        assert!(!test_config.cache.enabled);
        assert!(!test_config.rate_limit.enabled);
        assert!(test_config.validate_config().is_ok());
    }

    #[test]
    fn test_production_config() {
        let prod_config = config::production_test_config();
        assert!(prod_config.rate_limit.enabled);
        assert!(crate::config::ConfigValidator::validate_config(&prod_config).is_ok());
    }
}
