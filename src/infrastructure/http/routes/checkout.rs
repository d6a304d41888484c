//! Checkout routes module
//!
//! The checkout page and the JSON state endpoint polled by clients.

use crate::{
    application::use_cases::PrepareCheckoutUseCase,
    config::AppConfig,
    infrastructure::http::{
        handlers::{handle_checkout_page, handle_checkout_state},
        utils::{raw_query, with_checkout_use_case, with_config, with_rate_limit_middleware, with_security_headers},
    },
    middleware::{RateLimitMiddleware, SecurityHeadersMiddleware},
};
use std::sync::Arc;
use warp::Filter;

/// Checkout routes configuration
pub struct CheckoutRoutes;

impl CheckoutRoutes {
    /// Create the `GET /` checkout page route
    pub fn create_page_route(
        config: AppConfig,
        checkout_use_case: Arc<PrepareCheckoutUseCase>,
        rate_limit_middleware: Arc<RateLimitMiddleware>,
        security_headers: Arc<SecurityHeadersMiddleware>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        warp::path::end()
            .and(warp::get())
            .and(raw_query())
            .and(warp::header::headers_cloned())
            .and(warp::addr::remote())
            .and(with_checkout_use_case(checkout_use_case))
            .and(with_rate_limit_middleware(rate_limit_middleware))
            .and(with_security_headers(security_headers))
            .and(with_config(config))
            .and_then(handle_checkout_page)
    }

    /// Create the `GET /api/checkout` state route
    pub fn create_state_route(
        config: AppConfig,
        checkout_use_case: Arc<PrepareCheckoutUseCase>,
        rate_limit_middleware: Arc<RateLimitMiddleware>,
        security_headers: Arc<SecurityHeadersMiddleware>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        warp::path!("api" / "checkout")
            .and(warp::get())
            .and(raw_query())
            .and(warp::header::headers_cloned())
            .and(warp::addr::remote())
            .and(with_checkout_use_case(checkout_use_case))
            .and(with_rate_limit_middleware(rate_limit_middleware))
            .and(with_security_headers(security_headers))
            .and(with_config(config))
            .and_then(handle_checkout_state)
    }
}
