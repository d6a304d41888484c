use crate::{
    domain::{
        health::*,
        resolution::NameResolver,
    },
    shared::error::AppResult,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;

/// Health check use case
pub struct HealthCheckUseCase {
    resolver: Option<Arc<dyn NameResolver>>,
    started_at: Instant,
}

impl HealthCheckUseCase {
    /// Create a new health check use case
    pub fn new(resolver: Option<Arc<dyn NameResolver>>) -> Self {
        Self {
            resolver,
            started_at: Instant::now(),
        }
    }

    /// Execute health check including ENS endpoint reachability
    pub async fn execute(&self) -> AppResult<HealthResponse> {
        let mut status = HealthStatus::Healthy;
        let mut details = json!({
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "version": env!("CARGO_PKG_VERSION"),
            "uptime": self.get_uptime(),
        });

        if let Some(resolver) = &self.resolver {
            let available = resolver.is_available().await;
            details["ens"] = json!({
                "available": available,
                "status": if available { "connected" } else { "disconnected" }
            });

            if !available {
                status = HealthStatus::Degraded;
                details["warnings"] = json!([
                    "ENS RPC endpoint is currently unavailable",
                    "Name recipients will fail to resolve; address recipients are unaffected"
                ]);
            }
        } else {
            details["ens"] = json!({
                "available": false,
                "status": "no_resolver",
            });
            status = HealthStatus::Degraded;
        }

        Ok(HealthResponse::new(status, details))
    }

    /// Process uptime
    fn get_uptime(&self) -> String {
        let uptime = self.started_at.elapsed().as_secs();
        let days = uptime / 86400;
        let hours = (uptime % 86400) / 3600;
        let minutes = (uptime % 3600) / 60;
        format!("{}d {}h {}m", days, hours, minutes)
    }
}
