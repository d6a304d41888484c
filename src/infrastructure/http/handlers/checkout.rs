//! Checkout handler module
//!
//! Serves the checkout page and its JSON state.

use crate::{
    application::use_cases::PrepareCheckoutUseCase,
    config::AppConfig,
    domain::checkout::CheckoutRequest,
    infrastructure::http::{
        models::CheckoutResponse,
        processors::BaseRequestProcessor,
        responses::ResponseFormatter,
        utils::page_location,
        view::{render_page, PageContext},
    },
    middleware::{RateLimitMiddleware, SecurityHeadersMiddleware},
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::error;
use warp::http::{HeaderMap, StatusCode};
use warp::Reply;

/// Handle `GET /`: render the checkout page, waiting briefly for name resolution
pub async fn handle_checkout_page(
    query: String,
    headers: HeaderMap,
    remote: Option<SocketAddr>,
    checkout_use_case: Arc<PrepareCheckoutUseCase>,
    rate_limit_middleware: Arc<RateLimitMiddleware>,
    security_headers: Arc<SecurityHeadersMiddleware>,
    config: AppConfig,
) -> Result<impl Reply, warp::reject::Rejection> {
    let context = BaseRequestProcessor::setup_request_context("checkout_page", &headers, remote, &query, &config);

    if let Err(response) = BaseRequestProcessor::check_rate_limit(
        &context,
        &rate_limit_middleware,
        &security_headers,
        || checkout_use_case.record_rate_limited(),
    ) {
        return Ok(response);
    }

    let request = CheckoutRequest::parse(&query);
    let wait = Duration::from_millis(config.checkout.render_wait_ms);
    let state = checkout_use_case.execute(&request, wait).await;
    BaseRequestProcessor::finish(&context, state.label(), &config);

    let page = render_page(&PageContext {
        request: &request,
        state: &state,
        widget: &config.widget,
        refresh_interval_seconds: config.checkout.refresh_interval_seconds,
        page_location: page_location(&headers, "/"),
    });

    let response = match page {
        Ok(body) => ResponseFormatter::html(body, StatusCode::OK),
        Err(e) => {
            error!(request_id = %context.request_id, error = %e, "Failed to render checkout page");
            ResponseFormatter::from_app_error(&e).into_response()
        }
    };

    Ok(security_headers.apply(response))
}

/// Handle `GET /api/checkout`: report the current state without waiting on lookups
pub async fn handle_checkout_state(
    query: String,
    headers: HeaderMap,
    remote: Option<SocketAddr>,
    checkout_use_case: Arc<PrepareCheckoutUseCase>,
    rate_limit_middleware: Arc<RateLimitMiddleware>,
    security_headers: Arc<SecurityHeadersMiddleware>,
    config: AppConfig,
) -> Result<impl Reply, warp::reject::Rejection> {
    let context = BaseRequestProcessor::setup_request_context("checkout_state", &headers, remote, &query, &config);

    if let Err(response) = BaseRequestProcessor::check_rate_limit(
        &context,
        &rate_limit_middleware,
        &security_headers,
        || checkout_use_case.record_rate_limited(),
    ) {
        return Ok(response);
    }

    let request = CheckoutRequest::parse(&query);
    let state = checkout_use_case.execute(&request, Duration::ZERO).await;
    BaseRequestProcessor::finish(&context, state.label(), &config);

    let body = CheckoutResponse::new(context.request_id.clone(), &request, state, &config.widget);
    let response = ResponseFormatter::json_with_status(&body, StatusCode::OK).into_response();

    Ok(security_headers.apply(response))
}
