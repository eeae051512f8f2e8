//! Readiness probes for the store and the cache.

use crate::cache::CacheInterface;
use async_trait::async_trait;
use petsocial_core::{HealthCheck, HealthStatus};
use petsocial_repository::LookupRepository;
use std::sync::Arc;

/// Probes the lookup store.
pub struct DatabaseHealthCheck {
    repository: Arc<dyn LookupRepository>,
}

impl DatabaseHealthCheck {
    #[must_use]
    pub fn new(repository: Arc<dyn LookupRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl HealthCheck for DatabaseHealthCheck {
    fn name(&self) -> &str {
        "database"
    }

    async fn check(&self) -> HealthStatus {
        match self.repository.health_check().await {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Unhealthy(e.to_string()),
        }
    }
}

/// Probes the cache backend.
///
/// An unreachable cache only makes reads slower, so it reports
/// `Degraded` and never `Unhealthy`.
pub struct CacheHealthCheck {
    cache: Arc<dyn CacheInterface>,
}

impl CacheHealthCheck {
    #[must_use]
    pub fn new(cache: Arc<dyn CacheInterface>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl HealthCheck for CacheHealthCheck {
    fn name(&self) -> &str {
        "cache"
    }

    async fn check(&self) -> HealthStatus {
        match self.cache.ping().await {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Degraded(format!("{} cache unreachable: {}", self.cache.backend_name(), e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCacheService;
    use crate::test_support::{CountingCache, UnavailableRepository};
    use petsocial_repository::InMemoryLookupRepository;

    #[tokio::test]
    async fn test_cache_outage_is_degraded_not_unhealthy() {
        let check = CacheHealthCheck::new(Arc::new(CountingCache::failing()));
        let status = check.check().await;
        assert!(matches!(status, HealthStatus::Degraded(_)));

        let check = CacheHealthCheck::new(Arc::new(MemoryCacheService::new(10)));
        assert!(check.check().await.is_healthy());
    }

    #[tokio::test]
    async fn test_database_probe() {
        let healthy = DatabaseHealthCheck::new(Arc::new(InMemoryLookupRepository::new()));
        assert!(healthy.check().await.is_healthy());

        let down = DatabaseHealthCheck::new(Arc::new(UnavailableRepository));
        assert!(down.check().await.is_unhealthy());
    }
}
