//! Key/value stores backing the prediction cache.

use super::cache::Cache;
use super::clock::Clock;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use redis::{aio::ConnectionManager, RedisResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Redis key prefix for cached prediction payloads.
const KEY_PREFIX: &str = "goalcast:";

/// A string store with per-key expiry.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()>;
}

/// In-process store. Lost on restart.
pub struct MemoryStore {
    entries: Cache<String>,
}

impl MemoryStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Cache::with_clock(Duration::from_secs(300), clock),
        }
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key))
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
        self.entries.set_with_ttl(key.to_string(), value, ttl);
        Ok(())
    }
}

/// Redis-backed store.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Connect to Redis at the given URL.
    pub async fn connect(redis_url: &str) -> RedisResult<Self> {
        let client = redis::Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }

    fn key(key: &str) -> String {
        format!("{}{}", KEY_PREFIX, key)
    }
}

#[async_trait]
impl CacheStore for RedisStore {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = redis::cmd("GET")
            .arg(Self::key(key))
            .query_async(&mut conn)
            .await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
        let seconds = ttl.as_secs().max(1);
        let mut conn = self.conn.clone();
        redis::cmd("SET")
            .arg(Self::key(key))
            .arg(value)
            .arg("EX")
            .arg(seconds)
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(|e| AppError::Cache(format!("SET {} failed: {}", key, e)))
    }
}

/// Pick the store for this process: Redis when configured and reachable, memory otherwise.
pub async fn open_store(redis_url: Option<&str>, clock: Arc<dyn Clock>) -> Arc<dyn CacheStore> {
    if let Some(url) = redis_url {
        match RedisStore::connect(url).await {
            Ok(store) => {
                info!("Prediction cache connected to Redis");
                return Arc::new(store);
            }
            Err(e) => {
                warn!(
                    "Failed to connect to Redis: {}. Using in-process prediction cache.",
                    e
                );
            }
        }
    }
    Arc::new(MemoryStore::new(clock))
}
