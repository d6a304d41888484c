//! HTTP request processors module
//!
//! This module contains common request processing patterns that are shared
//! across different endpoint handlers.

pub mod base;

pub use base::BaseRequestProcessor;
