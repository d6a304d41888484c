//! Payment event routes module
//!
//! This module contains the route the checkout page posts widget callbacks to.

use crate::{
    application::use_cases::RecordPaymentEventUseCase,
    config::AppConfig,
    infrastructure::http::{
        handlers::handle_payment_event,
        utils::{with_config, with_payment_event_use_case, with_rate_limit_middleware, with_security_headers},
    },
    middleware::{RateLimitMiddleware, SecurityHeadersMiddleware},
};
use std::sync::Arc;
use warp::Filter;

/// Payment event routes configuration
pub struct PaymentEventRoutes;

impl PaymentEventRoutes {
    /// Create the `POST /api/payments/events` route
    pub fn create_payment_event_route(
        config: AppConfig,
        payment_event_use_case: Arc<RecordPaymentEventUseCase>,
        rate_limit_middleware: Arc<RateLimitMiddleware>,
        security_headers: Arc<SecurityHeadersMiddleware>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        warp::path!("api" / "payments" / "events")
            .and(warp::post())
            .and(warp::body::content_length_limit(config.server.max_request_size as u64))
            .and(warp::body::json())
            .and(warp::header::headers_cloned())
            .and(warp::addr::remote())
            .and(with_payment_event_use_case(payment_event_use_case))
            .and(with_rate_limit_middleware(rate_limit_middleware))
            .and(with_security_headers(security_headers))
            .and(with_config(config))
            .and_then(handle_payment_event)
    }
}
