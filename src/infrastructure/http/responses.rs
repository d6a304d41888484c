//! HTTP responses module
//!
//! This module contains HTTP response formatting and utilities.

use crate::shared::error::AppError;
use serde::Serialize;
use warp::http::{header, HeaderValue, StatusCode};
use warp::reply::{Json, Response, WithStatus};
use warp::Reply;

/// Response formatter for HTTP responses
pub struct ResponseFormatter;

impl ResponseFormatter {
    /// Format an HTML page
    pub fn html(body: String, status: StatusCode) -> Response {
        let mut response = warp::reply::with_status(warp::reply::html(body), status).into_response();
        response
            .headers_mut()
            .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
        response
    }

    /// Format a JSON body with status code
    pub fn json_with_status<T: Serialize>(body: &T, status: StatusCode) -> WithStatus<Json> {
        warp::reply::with_status(warp::reply::json(body), status)
    }

    /// Format an application error as a JSON error body
    pub fn from_app_error(error: &AppError) -> WithStatus<Json> {
        Self::json_with_status(&error.to_json(), error.http_status_code())
    }

    /// Rejection for a client over its request budget
    pub fn rate_limited() -> WithStatus<Json> {
        Self::from_app_error(&AppError::RateLimit)
    }

    /// Acknowledge a fire-and-forget submission
    pub fn accepted(request_id: &str) -> WithStatus<Json> {
        Self::json_with_status(
            &serde_json::json!({ "status": "accepted", "requestId": request_id }),
            StatusCode::ACCEPTED,
        )
    }

    /// Format the Prometheus text exposition
    pub fn prometheus(body: String) -> Response {
        let mut response = warp::reply::with_status(body, StatusCode::OK).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; version=0.0.4; charset=utf-8"),
        );
        response
    }
}
