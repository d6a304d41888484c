//! Smart Checkout - server-rendered stablecoin checkout pages
//!
//! Turns URL query parameters into a payment page: the recipient (an address or an
//! ENS name) is resolved over Ethereum JSON-RPC, a USDC target is derived for the
//! chosen network, and the page hands that target to the hosted payment widget.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod middleware;
pub mod shared;

#[cfg(test)]
mod tests;

pub use config::AppConfig;
pub use infrastructure::http::HttpServer;
pub use shared::error::{AppError, AppResult};

/// Application result type
pub type Result<T> = std::result::Result<T, shared::error::AppError>;
