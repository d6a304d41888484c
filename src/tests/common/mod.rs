//! Common test utilities and mock implementations
//!
//! This module provides shared utilities and mocks used across all test modules.

pub mod ens_node;

use crate::{
    application::{
        services::{CheckoutService, MetricsService, NameResolutionService},
        use_cases::{GetMetricsUseCase, HealthCheckUseCase, PrepareCheckoutUseCase, RecordPaymentEventUseCase},
    },
    config::AppConfig,
    domain::resolution::NameResolver,
    infrastructure::{
        adapters::{MonitoringAdapter, ResolutionCache},
        http::routes::builder::RouteDependencies,
    },
    middleware::{RateLimitMiddleware, SecurityHeadersMiddleware},
    shared::error::{AppError, AppResult},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Create test configuration
pub fn create_test_config() -> AppConfig {
    crate::tests::config::test_config()
}

/// Scriptable name resolver that counts the lookups it receives
#[derive(Clone, Default)]
pub struct MockResolver {
    answers: HashMap<String, String>,
    errors: HashMap<String, String>,
    delay: Option<Duration>,
    unavailable: bool,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockResolver {
    /// Resolver that knows no names
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `name` to `address`
    pub fn with_answer(mut self, name: &str, address: &str) -> Self {
        self.answers.insert(name.to_string(), address.to_string());
        self
    }

    /// Fail lookups of `name` with an RPC error
    pub fn with_error(mut self, name: &str, message: &str) -> Self {
        self.errors.insert(name.to_string(), message.to_string());
        self
    }

    /// Sleep before answering every lookup
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Report the endpoint as unreachable to health checks
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    /// Total lookups received
    pub fn calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Lookups received for `name`
    pub fn calls_for(&self, name: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|n| n.as_str() == name).count()
    }
}

#[async_trait]
impl NameResolver for MockResolver {
    async fn resolve(&self, name: &str) -> AppResult<Option<String>> {
        self.calls.lock().unwrap().push(name.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = self.errors.get(name) {
            return Err(AppError::Rpc(message.clone()));
        }
        Ok(self.answers.get(name).cloned())
    }

    async fn is_available(&self) -> bool {
        !self.unavailable
    }
}

/// Application services wired the way the server wires them, over a mock resolver
pub struct TestServices {
    pub resolver: MockResolver,
    pub resolution: Arc<NameResolutionService>,
    pub checkout_use_case: Arc<PrepareCheckoutUseCase>,
    pub payment_event_use_case: Arc<RecordPaymentEventUseCase>,
    pub health_use_case: Arc<HealthCheckUseCase>,
    pub metrics_use_case: Arc<GetMetricsUseCase>,
    pub monitoring: Arc<MonitoringAdapter>,
    pub rate_limit_middleware: Arc<RateLimitMiddleware>,
    pub security_headers: Arc<SecurityHeadersMiddleware>,
}

impl TestServices {
    pub fn new(config: &AppConfig, resolver: MockResolver) -> Self {
        let monitoring = Arc::new(MonitoringAdapter::new().unwrap());
        let cache = Arc::new(ResolutionCache::in_memory(
            Duration::from_secs(config.cache.default_ttl),
            Duration::from_secs(config.ens.negative_ttl_seconds),
            config.cache.max_entries,
        ));
        let resolution = Arc::new(NameResolutionService::new(
            Arc::new(resolver.clone()),
            cache,
            Duration::from_secs(config.ens.timeout_seconds),
            monitoring.clone(),
        ));
        let checkout_service = Arc::new(CheckoutService::new(
            resolution.clone(),
            config.checkout.reject_unsupported_networks,
        ));
        let metrics_service = Arc::new(MetricsService::new());

        Self {
            checkout_use_case: Arc::new(PrepareCheckoutUseCase::new(
                checkout_service,
                metrics_service.clone(),
                monitoring.clone(),
            )),
            payment_event_use_case: Arc::new(RecordPaymentEventUseCase::new(
                metrics_service.clone(),
                monitoring.clone(),
            )),
            health_use_case: Arc::new(HealthCheckUseCase::new(Some(Arc::new(resolver.clone())))),
            metrics_use_case: Arc::new(GetMetricsUseCase::new(metrics_service)),
            monitoring,
            rate_limit_middleware: Arc::new(RateLimitMiddleware::new(&config.rate_limit)),
            security_headers: Arc::new(SecurityHeadersMiddleware::new(&config.security)),
            resolution,
            resolver,
        }
    }

    pub fn route_dependencies(&self) -> RouteDependencies {
        RouteDependencies {
            checkout_use_case: self.checkout_use_case.clone(),
            payment_event_use_case: self.payment_event_use_case.clone(),
            health_use_case: self.health_use_case.clone(),
            metrics_use_case: self.metrics_use_case.clone(),
            monitoring: self.monitoring.clone(),
            rate_limit_middleware: self.rate_limit_middleware.clone(),
            security_headers: self.security_headers.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_resolver_counts_calls() {
        let resolver = MockResolver::new()
            .with_answer("merchant.eth", "0xabc")
            .with_error("broken.eth", "execution reverted");

        assert_eq!(resolver.resolve("merchant.eth").await.unwrap(), Some("0xabc".to_string()));
        assert_eq!(resolver.resolve("nobody.eth").await.unwrap(), None);
        assert!(resolver.resolve("broken.eth").await.is_err());
        assert_eq!(resolver.calls(), 3);
        assert_eq!(resolver.calls_for("merchant.eth"), 1);
        assert!(resolver.is_available().await);
        assert!(!resolver.clone().unavailable().is_available().await);
    }
}
