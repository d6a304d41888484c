//! HTTP utilities - Common helper functions
//!
//! This module contains utility functions used across the HTTP infrastructure
//! for client identification, route injection, and other common operations.

use crate::application::use_cases::{
    GetMetricsUseCase, HealthCheckUseCase, PrepareCheckoutUseCase, RecordPaymentEventUseCase,
};
use crate::config::AppConfig;
use crate::infrastructure::adapters::MonitoringAdapter;
use crate::middleware::{RateLimitMiddleware, SecurityHeadersMiddleware};
use std::net::SocketAddr;
use std::sync::Arc;
use warp::http::HeaderMap;
use warp::Filter;

/// Client key used when neither a trusted header nor the socket identifies the caller
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Identify the client.
///
/// Trusted proxy headers are consulted first; `X-Forwarded-For` style lists yield
/// their first (originating) entry and values that are not IP addresses are ignored.
/// Without a usable header the peer address of the connection is used. Headers
/// that are not listed in `security.trusted_proxy_headers` are never read.
pub fn extract_client_ip(headers: &HeaderMap, remote: Option<SocketAddr>, config: &AppConfig) -> String {
    config
        .security
        .trusted_proxy_headers
        .iter()
        .filter_map(|name| headers.get(name.as_str()))
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(',').next())
        .map(str::trim)
        .find_map(|candidate| candidate.parse::<std::net::IpAddr>().ok())
        .or_else(|| remote.map(|addr| addr.ip()))
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

/// `Host` header followed by the request path, as the page was addressed
pub fn page_location(headers: &HeaderMap, path: &str) -> String {
    let host = headers
        .get(warp::http::header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("localhost");
    format!("{}{}", host, path)
}

/// Raw query string, empty when the request has none
pub fn raw_query() -> impl Filter<Extract = (String,), Error = std::convert::Infallible> + Clone {
    warp::query::raw()
        .or(warp::any().map(String::new))
        .unify()
}

/// Helper function to inject the checkout use case into route
pub fn with_checkout_use_case(
    checkout_use_case: Arc<PrepareCheckoutUseCase>,
) -> impl Filter<Extract = (Arc<PrepareCheckoutUseCase>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || checkout_use_case.clone())
}

/// Helper function to inject the payment event use case into route
pub fn with_payment_event_use_case(
    payment_event_use_case: Arc<RecordPaymentEventUseCase>,
) -> impl Filter<Extract = (Arc<RecordPaymentEventUseCase>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || payment_event_use_case.clone())
}

/// Helper function to inject health use case into route
pub fn with_health_use_case(
    health_use_case: Arc<HealthCheckUseCase>,
) -> impl Filter<Extract = (Arc<HealthCheckUseCase>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || health_use_case.clone())
}

/// Helper function to inject metrics use case into route
pub fn with_metrics_use_case(
    metrics_use_case: Arc<GetMetricsUseCase>,
) -> impl Filter<Extract = (Arc<GetMetricsUseCase>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || metrics_use_case.clone())
}

/// Helper function to inject the Prometheus adapter into route
pub fn with_monitoring(
    monitoring: Arc<MonitoringAdapter>,
) -> impl Filter<Extract = (Arc<MonitoringAdapter>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || monitoring.clone())
}

/// Helper function to inject configuration into route
pub fn with_config(
    config: AppConfig,
) -> impl Filter<Extract = (AppConfig,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || config.clone())
}

/// Helper function to inject rate limiting middleware into route
pub fn with_rate_limit_middleware(
    rate_limit_middleware: Arc<RateLimitMiddleware>,
) -> impl Filter<Extract = (Arc<RateLimitMiddleware>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || rate_limit_middleware.clone())
}

/// Helper function to inject security headers middleware into route
pub fn with_security_headers(
    security_headers: Arc<SecurityHeadersMiddleware>,
) -> impl Filter<Extract = (Arc<SecurityHeadersMiddleware>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || security_headers.clone())
}
