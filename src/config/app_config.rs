//! Application configuration structures
//!
//! This module contains the main configuration structures for the application.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use validator::Validate;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ServerConfig {
    /// Server address to bind to
    pub bind_address: IpAddr,

    /// Server port
    #[validate(range(min = 1, max = 65535))]
    pub port: u16,

    /// Maximum request body size in bytes
    #[validate(range(min = 1024, max = 1048576))] // 1KB to 1MB
    pub max_request_size: usize,
}

/// ENS resolution configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct EnsConfig {
    /// JSON-RPC endpoint serving Ethereum mainnet
    #[validate(url)]
    pub rpc_url: String,

    /// ENS registry contract address
    #[validate(length(equal = 42))]
    pub registry_address: String,

    /// Upper bound for a single lookup, retries included
    #[validate(range(min = 1, max = 60))]
    pub timeout_seconds: u64,

    /// Retries on transport failures
    #[validate(range(min = 0, max = 5))]
    pub max_retries: u32,

    /// How long a failed lookup stays failed before a new lookup may be issued
    #[validate(range(min = 1, max = 3600))]
    pub negative_ttl_seconds: u64,
}

/// Checkout page behaviour
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CheckoutConfig {
    /// How long the page route waits for a lookup before rendering the resolving view
    #[validate(range(min = 0, max = 60000))]
    pub render_wait_ms: u64,

    /// Refresh interval of the resolving view
    #[validate(range(min = 1, max = 60))]
    pub refresh_interval_seconds: u64,

    /// Render an error view for networks without a stable-token mapping instead of
    /// handing the zero address to the widget
    pub reject_unsupported_networks: bool,
}

/// Payment widget hand-off configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct WidgetConfig {
    /// Widget application id
    pub app_id: String,

    /// Pay API base URL handed to the widget
    #[validate(url)]
    pub pay_api_url: String,

    /// Optional script that mounts the widget on the page
    pub script_url: Option<String>,

    /// Target of the "powered by" footer link
    #[validate(url)]
    pub footer_url: String,

    /// Close the widget after a successful payment
    pub close_on_success: bool,

    /// Reset the widget after a successful payment
    pub reset_on_success: bool,
}

/// Security configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SecurityConfig {
    /// Enable request logging
    pub enable_request_logging: bool,

    /// Enable security headers
    pub enable_security_headers: bool,

    /// Content-Security-Policy sent with every response
    #[validate(length(min = 1))]
    pub content_security_policy: String,

    /// Proxy headers that carry the client address; empty means the socket peer is used
    pub trusted_proxy_headers: Vec<String>,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Requests per minute per IP
    #[validate(range(min = 1, max = 10000))]
    pub requests_per_minute: u32,

    /// Burst size
    #[validate(range(min = 1, max = 1000))]
    pub burst_size: u32,

    /// Enable rate limiting
    pub enabled: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    #[validate(length(min = 1))]
    pub level: String,

    /// Log format
    #[validate(length(min = 1))]
    pub format: String,

    /// Enable structured logging
    pub structured: bool,
}

/// Resolution cache configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CacheConfig {
    /// Share resolved names through Redis
    pub enabled: bool,

    /// Redis connection URL
    #[validate(url)]
    pub redis_url: String,

    /// TTL of a successful resolution in seconds
    #[validate(range(min = 1, max = 86400))] // 1 second to 24 hours
    pub default_ttl: u64,

    /// Maximum entries kept in the in-memory memo
    #[validate(range(min = 16, max = 1000000))]
    pub max_entries: usize,
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// ENS resolution configuration
    pub ens: EnsConfig,

    /// Checkout page configuration
    pub checkout: CheckoutConfig,

    /// Payment widget configuration
    pub widget: WidgetConfig,

    /// Security configuration
    pub security: SecurityConfig,

    /// Rate limiting configuration
    pub rate_limit: RateLimitConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Cache configuration
    pub cache: CacheConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            max_request_size: 64 * 1024,
        }
    }
}

impl Default for EnsConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://eth.llamarpc.com".to_string(),
            registry_address: crate::domain::ens::ENS_REGISTRY_ADDRESS.to_string(),
            timeout_seconds: 10,
            max_retries: 2,
            negative_ttl_seconds: 30,
        }
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            render_wait_ms: 3000,
            refresh_interval_seconds: 2,
            reject_unsupported_networks: false,
        }
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            pay_api_url: "https://pay-api.daimo.xyz/".to_string(),
            script_url: None,
            footer_url: "https://pay.daimo.com".to_string(),
            close_on_success: true,
            reset_on_success: true,
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enable_request_logging: true,
            enable_security_headers: true,
            content_security_policy: "default-src 'self'; img-src 'self' https: data:; \
                script-src 'self' 'unsafe-inline' https:; style-src 'self' 'unsafe-inline'; \
                connect-src 'self' https: wss:; frame-src https:"
                .to_string(),
            trusted_proxy_headers: Vec::new(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_minute: 600,
            burst_size: 60,
            enabled: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "json".to_string(),
            structured: true,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            redis_url: "redis://127.0.0.1:6379".to_string(),
            default_ttl: 300, // 5 minutes
            max_entries: 10_000,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            ens: EnsConfig::default(),
            checkout: CheckoutConfig::default(),
            widget: WidgetConfig::default(),
            security: SecurityConfig::default(),
            rate_limit: RateLimitConfig::default(),
            logging: LoggingConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from an optional `Conf` file and environment variables.
    ///
    /// Every key is optional; unset keys fall back to the `Default` values.
    pub fn load() -> crate::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("Conf").required(false))
            .add_source(
                config::Environment::with_prefix("SMART_CHECKOUT")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("security.trusted_proxy_headers")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| crate::shared::error::AppError::Config(format!("Failed to build configuration: {}", e)))?;

        let config: AppConfig = config.try_deserialize()
            .map_err(|e| crate::shared::error::AppError::Config(format!("Failed to deserialize configuration: {}", e)))?;

        config.validate_config()
            .map_err(|e| crate::shared::error::AppError::Validation(format!("Configuration validation failed: {}", e)))?;
        crate::config::ConfigValidator::validate_config(&config)?;

        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate_config(&self) -> Result<(), validator::ValidationErrors> {
        self.server.validate()?;
        self.ens.validate()?;
        self.checkout.validate()?;
        self.widget.validate()?;
        self.security.validate()?;
        self.rate_limit.validate()?;
        self.logging.validate()?;
        self.cache.validate()?;

        Ok(())
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.bind_address, self.server.port)
    }
}
