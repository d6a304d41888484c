//! HTTP server implementation for reverse proxy deployment
//!
//! This module wires adapters, services and use cases into the warp routes.
//! TLS and compression are expected to be handled by the reverse proxy.

use crate::{
    application::{
        services::{CheckoutService, MetricsService, NameResolutionService},
        use_cases::{GetMetricsUseCase, HealthCheckUseCase, PrepareCheckoutUseCase, RecordPaymentEventUseCase},
    },
    config::AppConfig,
    domain::resolution::NameResolver,
    infrastructure::{
        adapters::{EnsRpcAdapter, MonitoringAdapter, ResolutionCache},
        http::routes::{builder::RouteDependencies, RouteBuilder},
    },
    middleware::{RateLimitMiddleware, SecurityHeadersMiddleware},
    shared::error::{AppError, AppResult},
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};
use warp::{Filter, Reply};

/// HTTP server implementation optimized for reverse proxy deployment
pub struct HttpServer {
    config: AppConfig,
    deps: RouteDependencies,
}

impl HttpServer {
    /// Create a new HTTP server resolving names against the configured ENS RPC endpoint
    pub async fn new(config: AppConfig) -> AppResult<Self> {
        let resolver: Arc<dyn NameResolver> = Arc::new(EnsRpcAdapter::new(&config.ens)?);
        let cache = Arc::new(ResolutionCache::new(&config.cache, config.ens.negative_ttl_seconds).await?);

        info!(
            rpc_url = %config.ens.rpc_url,
            shared_cache = cache.is_shared(),
            "ENS resolver initialized"
        );

        Self::assemble(config, resolver, cache)
    }

    /// Create a server around an existing resolver with a process-local memo
    pub fn with_resolver(config: AppConfig, resolver: Arc<dyn NameResolver>) -> AppResult<Self> {
        let cache = Arc::new(ResolutionCache::in_memory(
            Duration::from_secs(config.cache.default_ttl),
            Duration::from_secs(config.ens.negative_ttl_seconds),
            config.cache.max_entries,
        ));
        Self::assemble(config, resolver, cache)
    }

    fn assemble(
        config: AppConfig,
        resolver: Arc<dyn NameResolver>,
        cache: Arc<ResolutionCache>,
    ) -> AppResult<Self> {
        // Initialize infrastructure layer
        let monitoring = Arc::new(MonitoringAdapter::new()?);

        // Initialize application layer
        let resolution = Arc::new(NameResolutionService::new(
            resolver.clone(),
            cache,
            Duration::from_secs(config.ens.timeout_seconds),
            monitoring.clone(),
        ));
        let checkout_service = Arc::new(CheckoutService::new(
            resolution,
            config.checkout.reject_unsupported_networks,
        ));
        let metrics_service = Arc::new(MetricsService::new());

        // Initialize use cases
        let deps = RouteDependencies {
            checkout_use_case: Arc::new(PrepareCheckoutUseCase::new(
                checkout_service,
                metrics_service.clone(),
                monitoring.clone(),
            )),
            payment_event_use_case: Arc::new(RecordPaymentEventUseCase::new(
                metrics_service.clone(),
                monitoring.clone(),
            )),
            health_use_case: Arc::new(HealthCheckUseCase::new(Some(resolver))),
            metrics_use_case: Arc::new(GetMetricsUseCase::new(metrics_service)),
            monitoring,
            rate_limit_middleware: Arc::new(RateLimitMiddleware::new(&config.rate_limit)),
            security_headers: Arc::new(SecurityHeadersMiddleware::new(&config.security)),
        };

        Ok(Self { config, deps })
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run the HTTP server until the process is stopped
    #[instrument(skip(self))]
    pub async fn run(self) -> AppResult<()> {
        let addr: std::net::SocketAddr = self
            .config
            .server_address()
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid server address: {}", e)))?;

        let routes = self.create_routes();

        info!(%addr, "Starting checkout server (reverse proxy mode)");
        warp::serve(routes).run(addr).await;

        Ok(())
    }

    /// Create the application routes
    pub fn create_routes(&self) -> impl Filter<Extract = impl Reply, Error = warp::Rejection> + Clone {
        RouteBuilder::build_routes(self.config.clone(), self.deps.clone())
    }
}
