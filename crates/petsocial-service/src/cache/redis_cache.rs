//! Redis-based cache implementation.

use super::CacheInterface;
use async_trait::async_trait;
use deadpool_redis::{Config, Pool, PoolConfig, Runtime, Timeouts};
use petsocial_config::CacheConfig;
use petsocial_core::{PetsocialError, PetsocialResult};
use redis::AsyncCommands;
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Redis-based cache service shared by every API instance.
#[derive(Component)]
#[shaku(interface = CacheInterface)]
pub struct RedisCacheService {
    /// Redis connection pool. `None` until one is configured, in which case
    /// every call fails and reads degrade to misses.
    pool: Option<Arc<Pool>>,
}

impl RedisCacheService {
    /// Create a new Redis cache service over an existing pool.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool: Some(pool) }
    }

    /// Create a service with no pool.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self { pool: None }
    }

    /// Build a connection pool from configuration.
    ///
    /// No connection is opened here; an unreachable server shows up as
    /// failed cache calls, not as a startup error.
    pub fn create_pool(config: &CacheConfig) -> PetsocialResult<Arc<Pool>> {
        let timeout = Some(config.connect_timeout());
        let mut pool_config = PoolConfig::new(config.pool_size as usize);
        pool_config.timeouts = Timeouts {
            wait: timeout,
            create: timeout,
            recycle: timeout,
        };

        let mut redis_config = Config::from_url(&config.redis_url);
        redis_config.pool = Some(pool_config);

        let pool = redis_config
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| PetsocialError::Cache(format!("Failed to create Redis pool: {}", e)))?;

        info!("Redis cache pool created (max {} connections)", config.pool_size);
        Ok(Arc::new(pool))
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> PetsocialResult<deadpool_redis::Connection> {
        match &self.pool {
            Some(pool) => pool.get().await.map_err(|e| {
                PetsocialError::Cache(format!("Failed to get Redis connection: {}", e))
            }),
            None => Err(PetsocialError::Cache("Redis pool is not configured".to_string())),
        }
    }
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    async fn get_raw(&self, key: &str) -> PetsocialResult<Option<String>> {
        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn.get(key).await.map_err(|e| {
            PetsocialError::Cache(format!("Failed to get key '{}': {}", key, e))
        })?;

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> PetsocialResult<()> {
        let mut conn = self.get_conn().await?;
        let ttl_secs = ttl.as_secs().max(1);

        conn.set_ex::<_, _, ()>(key, value, ttl_secs).await.map_err(|e| {
            PetsocialError::Cache(format!("Failed to set key '{}': {}", key, e))
        })?;

        debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
        Ok(())
    }

    async fn remove(&self, key: &str) -> PetsocialResult<bool> {
        let mut conn = self.get_conn().await?;
        let deleted: i64 = conn.del(key).await.map_err(|e| {
            PetsocialError::Cache(format!("Failed to delete key '{}': {}", key, e))
        })?;

        debug!("Removed key '{}': {}", key, deleted > 0);
        Ok(deleted > 0)
    }

    async fn ping(&self) -> PetsocialResult<()> {
        let mut conn = self.get_conn().await?;
        redis::cmd("PING")
            .query_async::<()>(&mut *conn)
            .await
            .map_err(|e| PetsocialError::Cache(format!("Redis ping failed: {}", e)))
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}

impl std::fmt::Debug for RedisCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheService")
            .field("configured", &self.pool.is_some())
            .finish()
    }
}
