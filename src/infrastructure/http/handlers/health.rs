//! Health check handler module
//!
//! This module contains the health check endpoint handler for monitoring system status.

use crate::{
    application::use_cases::HealthCheckUseCase,
    infrastructure::http::responses::ResponseFormatter,
    middleware::SecurityHeadersMiddleware,
};
use std::sync::Arc;
use warp::http::StatusCode;
use warp::Reply;

/// Handle health check requests
pub async fn handle_health_request(
    health_use_case: Arc<HealthCheckUseCase>,
    security_headers: Arc<SecurityHeadersMiddleware>,
) -> Result<impl Reply, warp::reject::Rejection> {
    let response = match health_use_case.execute().await {
        Ok(health) => {
            let status = StatusCode::from_u16(health.http_status_code())
                .unwrap_or(StatusCode::SERVICE_UNAVAILABLE);
            ResponseFormatter::json_with_status(&health, status).into_response()
        }
        Err(e) => ResponseFormatter::from_app_error(&e).into_response(),
    };

    Ok(security_headers.apply(response))
}
