//! HTTP models - Infrastructure concerns
//!
//! This module contains models that are specific to infrastructure concerns
//! like HTTP responses, the widget hand-off payload and request tracking.

use crate::{
    config::app_config::WidgetConfig,
    domain::{
        checkout::{CheckoutRequest, CheckoutState},
        target::{AmountMode, PaymentTarget},
        theme::{ColorScheme, ImageSource, Theme},
    },
    shared::logging::LoggingUtils,
};
use serde::Serialize;

/// Configuration handed to the payment widget on the ready page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetPayload {
    pub app_id: String,
    pub pay_api_url: String,
    pub to_chain: u64,
    pub to_address: String,
    pub to_token: String,
    pub intent: String,
    pub amount_mode: AmountMode,
    pub close_on_success: bool,
    pub reset_on_success: bool,
}

impl WidgetPayload {
    /// Build the hand-off payload for a ready target
    pub fn new(target: &PaymentTarget, widget: &WidgetConfig) -> Self {
        Self {
            app_id: widget.app_id.clone(),
            pay_api_url: widget.pay_api_url.clone(),
            to_chain: target.destination_network,
            to_address: target.destination_address.clone(),
            to_token: target.destination_token_address.clone(),
            intent: target.intent_label.clone(),
            amount_mode: target.amount_mode,
            close_on_success: widget.close_on_success,
            reset_on_success: widget.reset_on_success,
        }
    }
}

/// JSON view of a checkout page (`GET /api/checkout`)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub request_id: String,
    #[serde(flatten)]
    pub state: CheckoutState,
    pub theme: Theme,
    pub colors: &'static ColorScheme,
    pub image: ImageSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub widget: Option<WidgetPayload>,
}

impl CheckoutResponse {
    pub fn new(
        request_id: String,
        request: &CheckoutRequest,
        state: CheckoutState,
        widget: &WidgetConfig,
    ) -> Self {
        let payload = state.target().map(|target| WidgetPayload::new(target, widget));
        Self {
            request_id,
            state,
            theme: request.theme,
            colors: request.theme.colors(),
            image: request.image_source(),
            widget: payload,
        }
    }
}

/// HTTP request context for tracking and logging (infrastructure concern)
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique request ID
    pub request_id: String,

    /// Client IP address
    pub client_ip: String,

    /// Route the request arrived on
    pub route: &'static str,

    /// Request timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl RequestContext {
    /// Create a new request context
    pub fn new(client_ip: String, route: &'static str) -> Self {
        Self {
            request_id: LoggingUtils::generate_request_id(),
            client_ip,
            route,
            timestamp: chrono::Utc::now(),
        }
    }

    /// Milliseconds since the request arrived
    pub fn elapsed_ms(&self) -> u64 {
        (chrono::Utc::now() - self.timestamp).num_milliseconds().max(0) as u64
    }
}
