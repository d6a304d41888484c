//! Configuration validation module
//!
//! This module provides additional validation logic for configuration
//! beyond the basic validator crate validation.

use crate::config::app_config::{EnsConfig, LoggingConfig, RateLimitConfig, WidgetConfig};
use crate::config::AppConfig;
use crate::shared::error::AppError;
use regex::Regex;

/// Configuration validator for additional validation logic
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the complete configuration
    pub fn validate_config(config: &AppConfig) -> crate::Result<()> {
        Self::validate_ens_config(&config.ens)?;
        Self::validate_widget_config(&config.widget)?;
        Self::validate_rate_limit_config(&config.rate_limit)?;
        Self::validate_logging_config(&config.logging)?;

        Ok(())
    }

    /// Validate the ENS RPC endpoint and registry
    fn validate_ens_config(ens: &EnsConfig) -> crate::Result<()> {
        Self::validate_rpc_url(&ens.rpc_url)?;

        let hex_address = Regex::new(r"^0x[0-9a-fA-F]{40}$")
            .map_err(|e| AppError::Internal(format!("Invalid address pattern: {}", e)))?;
        if !hex_address.is_match(&ens.registry_address) {
            return Err(AppError::Validation(format!(
                "ENS registry address is not a 20-byte hex address: {}",
                ens.registry_address
            )));
        }

        Ok(())
    }

    /// Validate ENS RPC URL
    fn validate_rpc_url(url: &str) -> crate::Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(AppError::Validation(
                "ENS RPC URL must start with http:// or https://".to_string()
            ));
        }

        if url.contains("localhost") || url.contains("127.0.0.1") {
            // Allow localhost for development
            Ok(())
        } else if !url.starts_with("https://") {
            Err(AppError::Validation(
                "Remote ENS RPC URL must use HTTPS".to_string()
            ))
        } else {
            Ok(())
        }
    }

    /// Settings that leave the server running but the pay button inert
    pub fn widget_warnings(widget: &WidgetConfig) -> Vec<&'static str> {
        let mut warnings = Vec::new();
        if widget.app_id.trim().is_empty() {
            warnings.push("widget.app_id is empty - the payment widget will reject checkout sessions");
        }
        if widget.script_url.as_deref().map_or(true, |url| url.trim().is_empty()) {
            warnings.push(
                "widget.script_url is not set - pages cannot load the payment widget and PURCHASE NOW does nothing",
            );
        }
        warnings
    }

    /// Validate widget settings
    fn validate_widget_config(widget: &WidgetConfig) -> crate::Result<()> {
        for warning in Self::widget_warnings(widget) {
            tracing::warn!("{}", warning);
        }

        if let Some(script_url) = &widget.script_url {
            if !script_url.starts_with("https://") && !script_url.starts_with('/') {
                return Err(AppError::Validation(format!(
                    "Widget script must be served over HTTPS or from this origin: {}",
                    script_url
                )));
            }
        }

        Ok(())
    }

    /// Validate rate limiting configuration
    fn validate_rate_limit_config(rate_limit: &RateLimitConfig) -> crate::Result<()> {
        if rate_limit.enabled && rate_limit.burst_size > rate_limit.requests_per_minute {
            return Err(AppError::Validation(
                "Burst size cannot be greater than requests per minute".to_string()
            ));
        }

        Ok(())
    }

    /// Validate logging configuration
    fn validate_logging_config(logging: &LoggingConfig) -> crate::Result<()> {
        match logging.format.to_ascii_lowercase().as_str() {
            "json" | "text" => Ok(()),
            other => Err(AppError::Validation(format!("Invalid log format: {}", other))),
        }
    }
}
