//! Read-through cache backend
//!
//! Values are JSON strings stored under keys derived by
//! [`musicapp_core::cache_keys`]. Every failure here (miss, connection error,
//! decode error) is logged and reported as a miss, so callers always fall back
//! to the database.

use crate::config::RedisSettings;
use dashmap::DashMap;
use deadpool_redis::Pool;
use redis::AsyncCommands;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A locally cached entry with TTL support
#[derive(Clone, Debug)]
pub struct CachedEntry {
    pub value: String,
    pub cached_at: Instant,
    pub ttl: Duration,
}

impl CachedEntry {
    pub fn new(value: String, ttl: Duration) -> Self {
        Self {
            value,
            cached_at: Instant::now(),
            ttl,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.cached_at.elapsed() > self.ttl
    }
}

/// Process-local store
///
/// `versions` counts invalidations per key. A fill started before an
/// invalidation must not land after it; see [`CacheBackend::set_if_current`].
#[derive(Debug, Default)]
pub struct LocalCache {
    entries: DashMap<String, CachedEntry>,
    versions: DashMap<String, u64>,
    writes: AtomicU64,
}

impl LocalCache {
    /// Drop every expired entry
    fn sweep_expired(&self) {
        self.entries.retain(|_, entry| !entry.is_expired());
    }

    fn insert(&self, key: &str, value: String, ttl: Duration) {
        self.entries
            .insert(key.to_string(), CachedEntry::new(value, ttl));

        // Expired entries are otherwise only dropped when read again
        let writes = self.writes.fetch_add(1, Ordering::Relaxed) + 1;
        if writes % SWEEP_EVERY_WRITES == 0 {
            self.sweep_expired();
        }
    }
}

/// Local writes between two sweeps of expired entries
const SWEEP_EVERY_WRITES: u64 = 128;

/// Stores `ARGV[1]` under `KEYS[1]` for `ARGV[3]` seconds unless the
/// version counter `KEYS[2]` moved away from `ARGV[2]`
const SET_IF_CURRENT_SCRIPT: &str = r"
local current = redis.call('GET', KEYS[2]) or '0'
if current == ARGV[2] then
  redis.call('SET', KEYS[1], ARGV[1], 'EX', ARGV[3])
  return 1
end
return 0
";

fn version_key(key: &str) -> String {
    format!("{key}:version")
}

/// Cache backend shared by handlers and data services.
///
/// - **Local**: process-local map, used when Redis is disabled and in tests
/// - **Redis**: shared across instances
///
/// Unlike a fire-and-forget cache, `delete` completes before it returns so an
/// invalidation is visible before the write's response is sent. Each delete
/// also bumps the key's version, which read-through fills check before they
/// store a value loaded from the database.
#[derive(Clone)]
pub enum CacheBackend {
    Local(Arc<LocalCache>),
    Redis(Pool),
}

impl CacheBackend {
    pub fn new_local() -> Self {
        CacheBackend::Local(Arc::new(LocalCache::default()))
    }

    pub fn new_redis(pool: Pool) -> Self {
        CacheBackend::Redis(pool)
    }

    /// Get a raw value; `None` on miss or on any backend failure
    pub async fn get(&self, key: &str) -> Option<String> {
        match self {
            CacheBackend::Local(local) => {
                let hit = local
                    .entries
                    .get(key)
                    .filter(|entry| !entry.is_expired())
                    .map(|entry| entry.value.clone());

                if hit.is_none() {
                    local.entries.remove_if(key, |_, entry| entry.is_expired());
                }
                hit
            }
            CacheBackend::Redis(pool) => match pool.get().await {
                Ok(mut conn) => match conn.get::<_, Option<String>>(key).await {
                    Ok(value) => value,
                    Err(e) => {
                        tracing::warn!(key = %key, error = %e, "Redis GET error");
                        None
                    }
                },
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to get Redis connection");
                    None
                }
            },
        }
    }

    /// Store a raw value with expiry
    pub async fn set(&self, key: &str, value: String, ttl: Duration) {
        match self {
            CacheBackend::Local(local) => local.insert(key, value, ttl),
            CacheBackend::Redis(pool) => match pool.get().await {
                Ok(mut conn) => {
                    if let Err(e) = conn
                        .set_ex::<_, _, ()>(key, value, ttl.as_secs().max(1))
                        .await
                    {
                        tracing::warn!(key = %key, error = %e, "Redis SET error");
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to get Redis connection");
                }
            },
        }
    }

    /// Current invalidation count of `key`; `None` when it cannot be read
    pub async fn version(&self, key: &str) -> Option<u64> {
        match self {
            CacheBackend::Local(local) => Some(local.versions.get(key).map_or(0, |v| *v)),
            CacheBackend::Redis(pool) => match pool.get().await {
                Ok(mut conn) => match conn.get::<_, Option<u64>>(version_key(key)).await {
                    Ok(version) => Some(version.unwrap_or(0)),
                    Err(e) => {
                        tracing::warn!(key = %key, error = %e, "Redis version GET error");
                        None
                    }
                },
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to get Redis connection");
                    None
                }
            },
        }
    }

    /// Store a value only if `key` was not invalidated since `version` was
    /// read. Returns whether the value was stored.
    pub async fn set_if_current(&self, key: &str, value: String, ttl: Duration, version: u64) -> bool {
        match self {
            CacheBackend::Local(local) => {
                // The read guard blocks a concurrent delete until the insert is done
                let current = local.versions.get(key);
                let unchanged = current.as_ref().map_or(0, |v| **v) == version;
                if unchanged {
                    local.insert(key, value, ttl);
                }
                drop(current);
                unchanged
            }
            CacheBackend::Redis(pool) => match pool.get().await {
                Ok(mut conn) => {
                    let script = redis::Script::new(SET_IF_CURRENT_SCRIPT);
                    let stored = script
                        .key(key)
                        .key(version_key(key))
                        .arg(value)
                        .arg(version)
                        .arg(ttl.as_secs().max(1))
                        .invoke_async::<i64>(&mut conn)
                        .await;
                    match stored {
                        Ok(stored) => stored == 1,
                        Err(e) => {
                            tracing::warn!(key = %key, error = %e, "Redis conditional SET error");
                            false
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to get Redis connection");
                    false
                }
            },
        }
    }

    /// Remove an entry and bump its version
    pub async fn delete(&self, key: &str) {
        match self {
            CacheBackend::Local(local) => {
                let mut version = local.versions.entry(key.to_string()).or_insert(0);
                *version += 1;
                local.entries.remove(key);
                drop(version);
                tracing::debug!(key = %key, "cache invalidated");
            }
            CacheBackend::Redis(pool) => match pool.get().await {
                Ok(mut conn) => {
                    let result = redis::pipe()
                        .atomic()
                        .del(key)
                        .ignore()
                        .incr(version_key(key), 1)
                        .ignore()
                        .query_async::<()>(&mut conn)
                        .await;
                    match result {
                        Ok(()) => tracing::debug!(key = %key, "cache invalidated"),
                        Err(e) => tracing::warn!(key = %key, error = %e, "Redis DEL error"),
                    }
                }
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Failed to get Redis connection");
                }
            },
        }
    }

    /// Get and deserialize a value; an undecodable entry counts as a miss
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get(key).await?;
        match serde_json::from_str(&raw) {
            Ok(value) => {
                tracing::debug!(key = %key, "cache hit");
                Some(value)
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Discarding undecodable cache entry");
                None
            }
        }
    }

    /// Serialize and store a value loaded while `key` was at `version`
    pub async fn set_json_if_current<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
        version: u64,
    ) {
        match serde_json::to_string(value) {
            Ok(raw) => {
                if !self.set_if_current(key, raw, ttl, version).await {
                    tracing::debug!(key = %key, "cache fill skipped, key invalidated during load");
                }
            }
            Err(e) => tracing::warn!(key = %key, error = %e, "Failed to serialize cache entry"),
        }
    }

    pub fn mode(&self) -> &'static str {
        match self {
            CacheBackend::Local(_) => "local",
            CacheBackend::Redis(_) => "redis",
        }
    }
}

/// Build a Redis pool from settings
pub fn create_redis_pool(settings: &RedisSettings) -> Result<Pool, deadpool_redis::CreatePoolError> {
    let mut redis_config = deadpool_redis::Config::from_url(&settings.url);
    let pool_config = redis_config
        .pool
        .get_or_insert_with(|| deadpool_redis::PoolConfig::new(settings.pool_size));
    pool_config.max_size = settings.pool_size;
    pool_config.timeouts.wait = Some(Duration::from_millis(settings.timeout_ms));
    pool_config.timeouts.create = Some(Duration::from_millis(settings.timeout_ms));
    pool_config.timeouts.recycle = Some(Duration::from_millis(settings.timeout_ms));
    redis_config.create_pool(Some(deadpool_redis::Runtime::Tokio1))
}

/// Create the cache backend, falling back to local memory when Redis is
/// disabled or unreachable
pub async fn create_cache_backend(settings: &RedisSettings) -> CacheBackend {
    if !settings.enabled {
        tracing::info!("Redis disabled, using local cache only");
        return CacheBackend::new_local();
    }

    tracing::info!(url = %settings.url, "Connecting to Redis");

    let pool = match create_redis_pool(settings) {
        Ok(pool) => pool,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to create Redis pool. Falling back to local cache.");
            return CacheBackend::new_local();
        }
    };

    match pool.get().await {
        Ok(_) => {
            tracing::info!("Connected to Redis");
            CacheBackend::new_redis(pool)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Redis unreachable. Falling back to local cache.");
            CacheBackend::new_local()
        }
    }
}
