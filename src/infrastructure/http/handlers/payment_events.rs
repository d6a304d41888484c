//! Payment event handler module
//!
//! Receives the widget's lifecycle callbacks relayed by the checkout page.

use crate::{
    application::use_cases::RecordPaymentEventUseCase,
    config::AppConfig,
    domain::payment_events::PaymentEvent,
    infrastructure::http::{processors::BaseRequestProcessor, responses::ResponseFormatter},
    middleware::{RateLimitMiddleware, SecurityHeadersMiddleware},
};
use std::net::SocketAddr;
use std::sync::Arc;
use warp::http::HeaderMap;
use warp::Reply;

/// Handle `POST /api/payments/events`
pub async fn handle_payment_event(
    event: PaymentEvent,
    headers: HeaderMap,
    remote: Option<SocketAddr>,
    payment_event_use_case: Arc<RecordPaymentEventUseCase>,
    rate_limit_middleware: Arc<RateLimitMiddleware>,
    security_headers: Arc<SecurityHeadersMiddleware>,
    config: AppConfig,
) -> Result<impl Reply, warp::reject::Rejection> {
    let context = BaseRequestProcessor::setup_request_context(
        "payment_events",
        &headers,
        remote,
        event.event.as_str(),
        &config,
    );

    if let Err(response) = BaseRequestProcessor::check_rate_limit(
        &context,
        &rate_limit_middleware,
        &security_headers,
        || payment_event_use_case.record_rate_limited(),
    ) {
        return Ok(response);
    }

    payment_event_use_case.execute(&event, &context.request_id, &context.client_ip);

    let response = ResponseFormatter::accepted(&context.request_id).into_response();
    Ok(security_headers.apply(response))
}
