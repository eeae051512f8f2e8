//! Dependency injection modules using Shaku.
//!
//! Two modules share every component except the store:
//! - `MySqlModule`: MySQL-backed lookup repository
//! - `InMemoryModule`: seeded in-memory repository for local runs
//!
//! Both register the Redis cache component. When `cache.use_redis` is off
//! it is overridden with the in-process moka cache, so the backend is fixed
//! for the life of the process.

use parking_lot::RwLock;
use petsocial_config::AppConfig;
use petsocial_core::{module, HasComponent, HealthCheck, PetsocialResult};
use petsocial_repository::{
    DatabasePool, DatabasePoolInterface, DatabasePoolParameters, InMemoryLookupRepository,
    InMemoryLookupRepositoryParameters, LookupRepository, LookupTables, MySqlLookupRepository,
};
use petsocial_rest::AppState;
use petsocial_service::{
    AdminService, AdminServiceImpl, CacheHealthCheck, CacheInterface, CacheTtl,
    DatabaseHealthCheck, LookupCacheInvalidator, LookupService, LookupServiceImpl,
    LookupServiceImplParameters, MemoryCacheService, RedisCacheService,
    RedisCacheServiceParameters,
};
use shaku::{Module, ModuleBuilder};
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use tracing::info;

module! {
    pub MySqlModule {
        components = [
            DatabasePool,
            MySqlLookupRepository,
            RedisCacheService,
            LookupCacheInvalidator,
            LookupServiceImpl,
            AdminServiceImpl,
        ],
        providers = [],
    }
}

module! {
    pub InMemoryModule {
        components = [
            InMemoryLookupRepository,
            RedisCacheService,
            LookupCacheInvalidator,
            LookupServiceImpl,
            AdminServiceImpl,
        ],
        providers = [],
    }
}

/// The module chosen at startup.
pub enum AppModule {
    MySql(Arc<MySqlModule>),
    InMemory(Arc<InMemoryModule>),
}

impl AppModule {
    /// Builds the application state served by the router.
    #[must_use]
    pub fn app_state(&self) -> AppState {
        match self {
            Self::MySql(module) => app_state(module.as_ref()),
            Self::InMemory(module) => app_state(module.as_ref()),
        }
    }

    /// Resolves the cache backend.
    #[must_use]
    pub fn cache(&self) -> Arc<dyn CacheInterface> {
        match self {
            Self::MySql(module) => module.resolve(),
            Self::InMemory(module) => module.resolve(),
        }
    }
}

/// Resolves services and readiness probes from any module.
pub fn app_state<M>(module: &M) -> AppState
where
    M: Module
        + HasComponent<dyn LookupService>
        + HasComponent<dyn AdminService>
        + HasComponent<dyn LookupRepository>
        + HasComponent<dyn CacheInterface>,
{
    let repository: Arc<dyn LookupRepository> = module.resolve();
    let cache: Arc<dyn CacheInterface> = module.resolve();
    let health_checks: Vec<Arc<dyn HealthCheck>> = vec![
        Arc::new(DatabaseHealthCheck::new(repository)),
        Arc::new(CacheHealthCheck::new(cache)),
    ];
    AppState::from_module(module, health_checks)
}

/// Builds the module for the configured store and cache backend.
pub async fn build_module(config: &AppConfig) -> PetsocialResult<AppModule> {
    if config.database.in_memory {
        info!("Using in-memory lookup store");
        let builder = InMemoryModule::builder()
            .with_component_parameters::<InMemoryLookupRepository>(InMemoryLookupRepositoryParameters {
                tables: RwLock::new(LookupTables::with_defaults()),
                queries: AtomicUsize::new(0),
            });
        let module = configure_cache(builder, config)?.build();
        return Ok(AppModule::InMemory(Arc::new(module)));
    }

    let pool = DatabasePool::connect(&config.database).await?;
    if config.database.run_migrations {
        pool.run_migrations().await?;
    }

    let builder = MySqlModule::builder().with_component_parameters::<DatabasePool>(
        DatabasePoolParameters {
            pool: pool.inner().clone(),
        },
    );
    let module = configure_cache(builder, config)?.build();
    Ok(AppModule::MySql(Arc::new(module)))
}

/// Applies the cache backend and TTL to a module builder.
fn configure_cache<M>(builder: ModuleBuilder<M>, config: &AppConfig) -> PetsocialResult<ModuleBuilder<M>>
where
    M: Module
        + HasComponent<dyn CacheInterface>
        + HasComponent<dyn LookupRepository>
        + HasComponent<dyn LookupService>,
{
    let builder = builder.with_component_parameters::<LookupServiceImpl>(LookupServiceImplParameters {
        ttl: CacheTtl(config.cache.ttl()),
    });

    if config.cache.use_redis {
        info!("Using Redis lookup cache at {}", config.cache.redis_url);
        let pool = RedisCacheService::create_pool(&config.cache)?;
        return Ok(builder.with_component_parameters::<RedisCacheService>(
            RedisCacheServiceParameters { pool: Some(pool) },
        ));
    }

    info!(
        "Using in-process lookup cache (max {} entries)",
        config.cache.memory_max_entries
    );
    let memory: Box<dyn CacheInterface> = Box::new(MemoryCacheService::from_config(&config.cache));
    Ok(builder.with_component_override::<dyn CacheInterface>(memory))
}

#[cfg(test)]
mod tests {
    use super::*;
    use petsocial_service::{NamedLookupRequest, PetTypeRequest};

    fn in_memory_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.database.in_memory = true;
        config
    }

    #[tokio::test]
    async fn test_in_memory_module_uses_memory_cache_by_default() {
        let module = build_module(&in_memory_config()).await.unwrap();
        assert!(matches!(module, AppModule::InMemory(_)));
        assert_eq!(module.cache().backend_name(), "memory");
    }

    #[tokio::test]
    async fn test_redis_switch_selects_redis_backend() {
        let mut config = in_memory_config();
        config.cache.use_redis = true;

        let module = build_module(&config).await.unwrap();
        assert_eq!(module.cache().backend_name(), "redis");
    }

    #[tokio::test]
    async fn test_wired_services_share_cache_and_store() {
        let module = build_module(&in_memory_config()).await.unwrap();
        let state = module.app_state();

        let before = state.lookup_service.get_pet_types().await.unwrap();
        assert_eq!(before.len(), 1);

        state
            .admin_service
            .create_pet_type(PetTypeRequest {
                name: "Dog".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        state
            .admin_service
            .create_color(NamedLookupRequest {
                name: "Black".to_string(),
                sort_order: 0,
            })
            .await
            .unwrap();

        let after = state.lookup_service.get_pet_types().await.unwrap();
        assert_eq!(after.len(), 2);
        assert_eq!(state.health_checks.len(), 2);
    }
}
