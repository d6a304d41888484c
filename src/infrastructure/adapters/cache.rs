//! Resolution cache adapter
//!
//! Memoizes settled lookups keyed by normalized name. The in-memory memo is
//! always on; Redis additionally shares successful resolutions between
//! instances when enabled.

use crate::{
    config::app_config::CacheConfig,
    domain::resolution::LookupOutcome,
    shared::error::{AppError, AppResult},
};
use redis::{aio::ConnectionManager, Client};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

const REDIS_KEY_PREFIX: &str = "smart_checkout:ens:";

#[derive(Debug, Clone)]
struct MemoEntry {
    outcome: LookupOutcome,
    expires_at: Instant,
}

/// Cache of settled name lookups
pub struct ResolutionCache {
    /// Redis connection manager
    redis_manager: Option<ConnectionManager>,
    /// Process-local memo
    memory_cache: Arc<RwLock<HashMap<String, MemoEntry>>>,
    positive_ttl: Duration,
    negative_ttl: Duration,
    max_entries: usize,
}

impl ResolutionCache {
    /// Create a new resolution cache, connecting to Redis when enabled
    pub async fn new(config: &CacheConfig, negative_ttl_seconds: u64) -> AppResult<Self> {
        let redis_manager = if config.enabled {
            match Self::create_redis_manager(&config.redis_url).await {
                Ok(manager) => {
                    info!("Redis cache connection established successfully");
                    Some(manager)
                }
                Err(e) => {
                    warn!("Failed to connect to Redis cache: {}. Using in-memory memo only.", e);
                    info!("Or disable sharing by setting cache.enabled = false in configuration");
                    None
                }
            }
        } else {
            info!("Redis caching is disabled in configuration");
            None
        };

        let mut cache = Self::in_memory(
            Duration::from_secs(config.default_ttl),
            Duration::from_secs(negative_ttl_seconds),
            config.max_entries,
        );
        cache.redis_manager = redis_manager;
        Ok(cache)
    }

    /// Memo-only cache
    pub fn in_memory(positive_ttl: Duration, negative_ttl: Duration, max_entries: usize) -> Self {
        Self {
            redis_manager: None,
            memory_cache: Arc::new(RwLock::new(HashMap::new())),
            positive_ttl,
            negative_ttl,
            max_entries: max_entries.max(1),
        }
    }

    /// Create Redis connection manager
    async fn create_redis_manager(redis_url: &str) -> AppResult<ConnectionManager> {
        let client = Client::open(redis_url)
            .map_err(|e| AppError::Cache(format!("Failed to create Redis client: {}", e)))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| AppError::Cache(format!("Failed to create Redis connection manager: {}", e)))?;

        Ok(manager)
    }

    /// Whether Redis sharing is active
    pub fn is_shared(&self) -> bool {
        self.redis_manager.is_some()
    }

    /// Look up a settled outcome for `name`
    pub async fn get(&self, name: &str) -> Option<LookupOutcome> {
        if let Some(outcome) = self.get_from_memory(name).await {
            return Some(outcome);
        }

        if let Some(ref manager) = self.redis_manager {
            match Self::get_from_redis(manager, name).await {
                Ok(Some(address)) => {
                    debug!("Redis cache hit for name: {}", name);
                    let outcome = LookupOutcome::Found(address);
                    self.set_in_memory(name, &outcome).await;
                    return Some(outcome);
                }
                Ok(None) => debug!("Redis cache miss for name: {}", name),
                Err(e) => warn!("Redis cache error: {}. Falling back to memory cache.", e),
            }
        }

        None
    }

    /// Remember a settled outcome for `name`
    pub async fn put(&self, name: &str, outcome: &LookupOutcome) {
        self.set_in_memory(name, outcome).await;

        if let (Some(manager), LookupOutcome::Found(address)) = (&self.redis_manager, outcome) {
            if let Err(e) = Self::set_in_redis(manager, name, address, self.positive_ttl).await {
                warn!("Redis cache error: {}. Outcome kept in memory only.", e);
            }
        }
    }

    /// Number of live memo entries
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.memory_cache
            .read()
            .await
            .values()
            .filter(|entry| entry.expires_at > now)
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn get_from_memory(&self, name: &str) -> Option<LookupOutcome> {
        let cache = self.memory_cache.read().await;
        match cache.get(name) {
            Some(entry) if entry.expires_at > Instant::now() => {
                debug!("Memory cache hit for name: {}", name);
                Some(entry.outcome.clone())
            }
            Some(_) => {
                debug!("Memory cache entry expired for name: {}", name);
                None
            }
            None => None,
        }
    }

    async fn set_in_memory(&self, name: &str, outcome: &LookupOutcome) {
        let ttl = match outcome {
            LookupOutcome::Found(_) => self.positive_ttl,
            LookupOutcome::NotFound | LookupOutcome::Failed(_) => self.negative_ttl,
        };
        let now = Instant::now();

        let mut cache = self.memory_cache.write().await;
        if cache.len() >= self.max_entries && !cache.contains_key(name) {
            cache.retain(|_, entry| entry.expires_at > now);
            if cache.len() >= self.max_entries {
                let oldest = cache
                    .iter()
                    .min_by_key(|(_, entry)| entry.expires_at)
                    .map(|(key, _)| key.clone());
                if let Some(key) = oldest {
                    cache.remove(&key);
                }
            }
        }

        cache.insert(
            name.to_string(),
            MemoEntry {
                outcome: outcome.clone(),
                expires_at: now + ttl,
            },
        );
    }

    async fn get_from_redis(manager: &ConnectionManager, name: &str) -> AppResult<Option<String>> {
        let mut conn = manager.clone();
        let address: Option<String> = redis::cmd("GET")
            .arg(format!("{}{}", REDIS_KEY_PREFIX, name))
            .query_async(&mut conn)
            .await?;
        Ok(address)
    }

    async fn set_in_redis(
        manager: &ConnectionManager,
        name: &str,
        address: &str,
        ttl: Duration,
    ) -> AppResult<()> {
        let mut conn = manager.clone();
        let _: () = redis::cmd("SETEX")
            .arg(format!("{}{}", REDIS_KEY_PREFIX, name))
            .arg(ttl.as_secs().max(1))
            .arg(address)
            .query_async(&mut conn)
            .await?;
        Ok(())
    }
}
