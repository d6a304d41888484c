//! HTTP infrastructure module
//!
//! This module contains HTTP-related concerns including models, page rendering,
//! server implementation, routes, utilities, responses, handlers, and processors.

pub mod handlers;
pub mod models;
pub mod processors;
pub mod responses;
pub mod routes;
pub mod server;
pub mod utils;
pub mod view;

pub use models::{CheckoutResponse, RequestContext, WidgetPayload};
pub use processors::BaseRequestProcessor;
pub use responses::ResponseFormatter;
pub use server::HttpServer;
pub use view::{render_page, PageContext};
