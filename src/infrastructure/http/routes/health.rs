//! Health routes module
//!
//! This module contains health check route configurations.

use crate::{
    application::use_cases::HealthCheckUseCase,
    infrastructure::http::{
        handlers::handle_health_request,
        utils::{with_health_use_case, with_security_headers},
    },
    middleware::SecurityHeadersMiddleware,
};
use std::sync::Arc;
use warp::Filter;

/// Health routes configuration
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the health check endpoint route
    pub fn create_health_route(
        health_use_case: Arc<HealthCheckUseCase>,
        security_headers: Arc<SecurityHeadersMiddleware>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        warp::path!("health")
            .and(warp::get())
            .and(with_health_use_case(health_use_case))
            .and(with_security_headers(security_headers))
            .and_then(handle_health_request)
    }
}
