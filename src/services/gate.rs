//! Time-boxed cache in front of the prediction pipeline.

use super::clock::{add_duration, Clock};
use super::store::CacheStore;
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// A value served through the gate.
#[derive(Debug, Clone, PartialEq)]
pub struct Cached<T> {
    pub value: T,
    /// True when served from the store without recomputing.
    pub cached: bool,
    /// When callers should expect fresh data.
    pub next_update: DateTime<Utc>,
}

/// Read-through cache over a [`CacheStore`].
///
/// Concurrent misses on the same key may both compute; the last write wins.
/// Store failures never fail a request: reads degrade to a miss and writes are
/// dropped with a warning.
#[derive(Clone)]
pub struct PredictionCacheGate {
    store: Arc<dyn CacheStore>,
    clock: Arc<dyn Clock>,
}

impl PredictionCacheGate {
    pub fn new(store: Arc<dyn CacheStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub async fn get_or_compute<T, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        compute: F,
    ) -> Result<Cached<T>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        match self.store.get(key).await {
            Ok(Some(payload)) => match serde_json::from_str::<T>(&payload) {
                Ok(value) => {
                    debug!("Cache hit for {} ({})", key, self.store.name());
                    return Ok(Cached {
                        value,
                        cached: true,
                        next_update: add_duration(self.clock.now(), ttl),
                    });
                }
                Err(e) => warn!("Discarding undecodable cache entry {}: {}", key, e),
            },
            Ok(None) => debug!("Cache miss for {}", key),
            Err(e) => warn!("Cache read failed for {}: {}. Computing fresh.", key, e),
        }

        let value = compute().await?;

        match serde_json::to_string(&value) {
            Ok(payload) => {
                if let Err(e) = self.store.set(key, payload, ttl).await {
                    warn!("Cache write failed for {}: {}", key, e);
                }
            }
            Err(e) => warn!("Failed to serialize {} for caching: {}", key, e),
        }

        Ok(Cached {
            value,
            cached: false,
            next_update: add_duration(self.clock.now(), ttl),
        })
    }
}
