//! In-process cache backed by moka.

use super::CacheInterface;
use async_trait::async_trait;
use moka::future::Cache;
use moka::ops::compute::Op;
use petsocial_config::CacheConfig;
use petsocial_core::PetsocialResult;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug)]
struct Entry {
    json: String,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Per-process cache for single-instance deployments.
///
/// Each entry carries its own deadline so per-key TTLs work; expired
/// entries are dropped when read. Capacity is bounded by entry count.
#[derive(Clone)]
pub struct MemoryCacheService {
    cache: Cache<String, Arc<Entry>>,
}

impl MemoryCacheService {
    /// Create a cache holding at most `max_entries` keys.
    #[must_use]
    pub fn new(max_entries: u64) -> Self {
        Self {
            cache: Cache::builder().max_capacity(max_entries).build(),
        }
    }

    /// Create a cache sized from configuration.
    #[must_use]
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.memory_max_entries)
    }

    /// Drops the entry under `key` only if it is still expired, so a value
    /// written after the expired read survives.
    async fn evict_if_expired(&self, key: &str) {
        self.cache
            .entry_by_ref(key)
            .and_compute_with(|current| {
                let op = match current {
                    Some(entry) if entry.value().is_expired() => Op::Remove,
                    _ => Op::Nop,
                };
                std::future::ready(op)
            })
            .await;
    }
}

#[async_trait]
impl CacheInterface for MemoryCacheService {
    async fn get_raw(&self, key: &str) -> PetsocialResult<Option<String>> {
        match self.cache.get(key).await {
            Some(entry) if entry.is_expired() => {
                debug!("Entry for key '{}' expired", key);
                self.evict_if_expired(key).await;
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.json.clone())),
            None => Ok(None),
        }
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> PetsocialResult<()> {
        let entry = Entry {
            json: value.to_string(),
            expires_at: Instant::now() + ttl,
        };
        self.cache.insert(key.to_string(), Arc::new(entry)).await;
        Ok(())
    }

    async fn remove(&self, key: &str) -> PetsocialResult<bool> {
        let removed = self.cache.remove(key).await;
        Ok(matches!(removed, Some(entry) if !entry.is_expired()))
    }

    async fn ping(&self) -> PetsocialResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

impl std::fmt::Debug for MemoryCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCacheService")
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}
