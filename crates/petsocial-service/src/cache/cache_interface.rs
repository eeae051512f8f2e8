//! Cache interface trait for abstracted caching operations.

use async_trait::async_trait;
use petsocial_core::PetsocialResult;
use shaku::Interface;
use std::time::Duration;
use tracing::{debug, warn};

/// Cache interface for storing and retrieving cached data.
///
/// Uses JSON strings for type-erased storage to maintain dyn-compatibility.
#[async_trait]
pub trait CacheInterface: Interface + Send + Sync {
    /// Get a raw JSON value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> PetsocialResult<Option<String>>;

    /// Set a raw JSON value in the cache with a TTL, replacing any
    /// existing value.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> PetsocialResult<()>;

    /// Remove a value from the cache.
    ///
    /// Returns `true` if the key existed. Removing an absent key is not an
    /// error.
    async fn remove(&self, key: &str) -> PetsocialResult<bool>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> PetsocialResult<()>;

    /// Short backend name used in logs and metrics.
    fn backend_name(&self) -> &'static str;
}

/// Extension trait with typed methods for convenience.
///
/// Reads are fail-soft: a backend error or a value that no longer
/// deserializes is logged and reported as a miss.
#[async_trait]
pub trait CacheExt: CacheInterface {
    /// Get a typed value from the cache, treating any failure as a miss.
    async fn get<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> Option<T> {
        let backend = self.backend_name();
        let json = match self.get_raw(key).await {
            Ok(Some(json)) => json,
            Ok(None) => {
                debug!("Cache miss for key '{}'", key);
                metrics::counter!("lookup_cache_misses_total", "backend" => backend).increment(1);
                return None;
            }
            Err(e) => {
                warn!("Cache read failed for key '{}', treating as miss: {}", key, e);
                metrics::counter!("lookup_cache_errors_total", "backend" => backend, "op" => "get")
                    .increment(1);
                return None;
            }
        };

        match serde_json::from_str(&json) {
            Ok(value) => {
                debug!("Cache hit for key '{}'", key);
                metrics::counter!("lookup_cache_hits_total", "backend" => backend).increment(1);
                Some(value)
            }
            Err(e) => {
                warn!("Cached value for key '{}' did not deserialize, treating as miss: {}", key, e);
                metrics::counter!("lookup_cache_errors_total", "backend" => backend, "op" => "decode")
                    .increment(1);
                None
            }
        }
    }

    /// Set a typed value in the cache.
    async fn set<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> PetsocialResult<()> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json, ttl).await
    }
}

// Blanket implementation for all CacheInterface implementations
impl<T: CacheInterface + ?Sized> CacheExt for T {}
