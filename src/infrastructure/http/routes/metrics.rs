//! Metrics routes module
//!
//! This module contains metrics and Prometheus route configurations.

use crate::{
    application::use_cases::GetMetricsUseCase,
    infrastructure::{
        adapters::MonitoringAdapter,
        http::{
            handlers::{handle_metrics_request, handle_prometheus_request},
            utils::{with_metrics_use_case, with_monitoring, with_security_headers},
        },
    },
    middleware::SecurityHeadersMiddleware,
};
use std::sync::Arc;
use warp::Filter;

/// Metrics routes configuration
pub struct MetricsRoutes;

impl MetricsRoutes {
    /// Create the metrics endpoint route
    pub fn create_metrics_route(
        metrics_use_case: Arc<GetMetricsUseCase>,
        security_headers: Arc<SecurityHeadersMiddleware>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        warp::path!("metrics")
            .and(warp::get())
            .and(with_metrics_use_case(metrics_use_case))
            .and(with_security_headers(security_headers))
            .and_then(handle_metrics_request)
    }

    /// Create the Prometheus metrics endpoint route
    pub fn create_prometheus_route(
        monitoring: Arc<MonitoringAdapter>,
        security_headers: Arc<SecurityHeadersMiddleware>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        warp::path!("metrics" / "prometheus")
            .and(warp::get())
            .and(with_monitoring(monitoring))
            .and(with_security_headers(security_headers))
            .and_then(handle_prometheus_request)
    }
}
