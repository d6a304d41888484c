use crate::config::app_config::RateLimitConfig;
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;
use tracing::debug;

/// Per-client request budget keyed by client IP
pub struct RateLimitMiddleware {
    limiter: Option<DefaultKeyedRateLimiter<String>>,
}

impl RateLimitMiddleware {
    /// Create rate limiting middleware based on configuration
    pub fn new(config: &RateLimitConfig) -> Self {
        if !config.enabled {
            return Self { limiter: None };
        }

        let Some(rate) = NonZeroU32::new(config.requests_per_minute) else {
            debug!("Rate limiting configured with zero requests per minute, disabling");
            return Self { limiter: None };
        };
        let burst = NonZeroU32::new(config.burst_size).unwrap_or(rate);

        Self {
            limiter: Some(RateLimiter::keyed(Quota::per_minute(rate).allow_burst(burst))),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.limiter.is_some()
    }

    /// Take one request from `client_ip`'s budget. Returns false when the budget is spent.
    pub fn check(&self, client_ip: &str) -> bool {
        match &self.limiter {
            Some(limiter) => {
                let allowed = limiter.check_key(&client_ip.to_string()).is_ok();
                if limiter.len() > 10_000 {
                    limiter.retain_recent();
                }
                allowed
            }
            None => true,
        }
    }
}
