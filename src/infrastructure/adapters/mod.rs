//! Infrastructure adapters - External service integrations
//!
//! This module contains adapters for external services: the ENS JSON-RPC
//! endpoint, the resolution cache (Redis with in-memory fallback) and the
//! Prometheus registry.

pub mod cache;
pub mod ens_rpc;
pub mod monitoring;

pub use cache::ResolutionCache;
pub use ens_rpc::EnsRpcAdapter;
pub use monitoring::MonitoringAdapter;
