//! Metrics handler module
//!
//! This module contains the metrics and Prometheus endpoint handlers for monitoring.

use crate::{
    application::use_cases::GetMetricsUseCase,
    infrastructure::{adapters::MonitoringAdapter, http::responses::ResponseFormatter},
    middleware::SecurityHeadersMiddleware,
};
use std::sync::Arc;
use warp::http::StatusCode;
use warp::Reply;

/// Handle metrics requests
pub async fn handle_metrics_request(
    metrics_use_case: Arc<GetMetricsUseCase>,
    security_headers: Arc<SecurityHeadersMiddleware>,
) -> Result<impl Reply, warp::reject::Rejection> {
    let metrics_data = metrics_use_case.execute();
    let response = ResponseFormatter::json_with_status(&metrics_data, StatusCode::OK).into_response();

    Ok(security_headers.apply(response))
}

/// Handle Prometheus metrics requests
pub async fn handle_prometheus_request(
    monitoring: Arc<MonitoringAdapter>,
    security_headers: Arc<SecurityHeadersMiddleware>,
) -> Result<impl Reply, warp::reject::Rejection> {
    let response = match monitoring.get_prometheus_metrics() {
        Ok(metrics) => ResponseFormatter::prometheus(metrics),
        Err(e) => ResponseFormatter::from_app_error(&e).into_response(),
    };

    Ok(security_headers.apply(response))
}
