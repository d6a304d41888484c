//! Route builder module
//!
//! This module contains the main route builder that orchestrates the creation
//! of all application routes.

use crate::{
    application::use_cases::{
        GetMetricsUseCase, HealthCheckUseCase, PrepareCheckoutUseCase, RecordPaymentEventUseCase,
    },
    config::AppConfig,
    infrastructure::{
        adapters::MonitoringAdapter,
        http::routes::{CheckoutRoutes, HealthRoutes, MetricsRoutes, PaymentEventRoutes},
    },
    middleware::{RateLimitMiddleware, SecurityHeadersMiddleware},
};
use std::sync::Arc;
use warp::Filter;

/// Everything the routes need, built once at startup
#[derive(Clone)]
pub struct RouteDependencies {
    pub checkout_use_case: Arc<PrepareCheckoutUseCase>,
    pub payment_event_use_case: Arc<RecordPaymentEventUseCase>,
    pub health_use_case: Arc<HealthCheckUseCase>,
    pub metrics_use_case: Arc<GetMetricsUseCase>,
    pub monitoring: Arc<MonitoringAdapter>,
    pub rate_limit_middleware: Arc<RateLimitMiddleware>,
    pub security_headers: Arc<SecurityHeadersMiddleware>,
}

/// Route builder that orchestrates the creation of all application routes
pub struct RouteBuilder;

impl RouteBuilder {
    /// Build all application routes
    pub fn build_routes(
        config: AppConfig,
        deps: RouteDependencies,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let page_route = CheckoutRoutes::create_page_route(
            config.clone(),
            deps.checkout_use_case.clone(),
            deps.rate_limit_middleware.clone(),
            deps.security_headers.clone(),
        );

        let state_route = CheckoutRoutes::create_state_route(
            config.clone(),
            deps.checkout_use_case,
            deps.rate_limit_middleware.clone(),
            deps.security_headers.clone(),
        );

        let payment_event_route = PaymentEventRoutes::create_payment_event_route(
            config,
            deps.payment_event_use_case,
            deps.rate_limit_middleware,
            deps.security_headers.clone(),
        );

        let health_route = HealthRoutes::create_health_route(deps.health_use_case, deps.security_headers.clone());

        let metrics_route = MetricsRoutes::create_metrics_route(deps.metrics_use_case, deps.security_headers.clone());

        let prometheus_route = MetricsRoutes::create_prometheus_route(deps.monitoring, deps.security_headers);

        // Combine all routes
        page_route
            .or(state_route)
            .or(payment_event_route)
            .or(health_route)
            .or(metrics_route)
            .or(prometheus_route)
    }
}
