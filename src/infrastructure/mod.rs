//! Infrastructure layer - External concerns and adapters
//!
//! This module contains infrastructure concerns including the ENS RPC adapter,
//! the resolution memo, metrics, and HTTP handling.

pub mod adapters;
pub mod http;

// Re-export main adapters
pub use adapters::{EnsRpcAdapter, MonitoringAdapter, ResolutionCache};
