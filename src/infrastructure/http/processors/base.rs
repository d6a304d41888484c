//! Base request processor module
//!
//! This module contains the base request processing patterns that are common
//! across all checkout handlers.

use crate::{
    config::AppConfig,
    infrastructure::http::{
        models::RequestContext,
        responses::ResponseFormatter,
        utils::extract_client_ip,
    },
    middleware::{RateLimitMiddleware, SecurityHeadersMiddleware},
    shared::logging::LoggingUtils,
};
use std::net::SocketAddr;
use warp::http::HeaderMap;
use warp::reply::Response;
use warp::Reply;

/// Base request processor that handles common processing patterns
pub struct BaseRequestProcessor;

impl BaseRequestProcessor {
    /// Identify the client, create request context, and log request
    pub fn setup_request_context(
        route: &'static str,
        headers: &HeaderMap,
        remote: Option<SocketAddr>,
        query: &str,
        config: &AppConfig,
    ) -> RequestContext {
        let context = RequestContext::new(extract_client_ip(headers, remote, config), route);

        if config.security.enable_request_logging {
            LoggingUtils::log_request(&context.request_id, route, &context.client_ip, query);
        }

        context
    }

    /// Check rate limit and return the 429 response if the client's budget is spent.
    ///
    /// `on_limited` runs once per rejected request so callers can count it.
    pub fn check_rate_limit(
        context: &RequestContext,
        rate_limit_middleware: &RateLimitMiddleware,
        security_headers: &SecurityHeadersMiddleware,
        on_limited: impl FnOnce(),
    ) -> Result<(), Response> {
        if rate_limit_middleware.check(&context.client_ip) {
            return Ok(());
        }

        LoggingUtils::log_rate_limit(&context.client_ip, context.route);
        on_limited();

        Err(security_headers.apply(ResponseFormatter::rate_limited().into_response()))
    }

    /// Log how a checkout request ended
    pub fn finish(context: &RequestContext, state: &str, config: &AppConfig) {
        if config.security.enable_request_logging {
            LoggingUtils::log_outcome(&context.request_id, context.route, state, context.elapsed_ms());
        }
    }
}
