use crate::config::app_config::SecurityConfig;
use warp::http::{header, HeaderValue};
use warp::reply::Response;

/// Adds browser hardening headers to outgoing responses
#[derive(Debug, Clone)]
pub struct SecurityHeadersMiddleware {
    enabled: bool,
    content_security_policy: Option<HeaderValue>,
}

impl SecurityHeadersMiddleware {
    /// Create security headers middleware based on configuration
    pub fn new(config: &SecurityConfig) -> Self {
        Self {
            enabled: config.enable_security_headers,
            content_security_policy: HeaderValue::from_str(&config.content_security_policy).ok(),
        }
    }

    /// Apply the headers to `response`
    pub fn apply(&self, mut response: Response) -> Response {
        if !self.enabled {
            return response;
        }

        let headers = response.headers_mut();
        headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
        headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
        headers.insert(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        );
        if let Some(policy) = &self.content_security_policy {
            headers.insert(header::CONTENT_SECURITY_POLICY, policy.clone());
        }
        response
    }
}
