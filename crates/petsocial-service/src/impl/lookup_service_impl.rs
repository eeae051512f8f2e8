//! Cache-aside lookup service.

use crate::cache::{cache_keys, CacheExt, CacheInterface, LOOKUP_TTL};
use crate::dto::{BreedDto, ColorDto, FoodDto, PetTypeDto, UserTypeDto};
use crate::lookup_service::LookupService;
use async_trait::async_trait;
use petsocial_core::{PetTypeId, PetsocialResult};
use petsocial_repository::LookupRepository;
use serde::{de::DeserializeOwned, Serialize};
use shaku::Component;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Lifetime applied to every cached lookup list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtl(pub Duration);

impl Default for CacheTtl {
    fn default() -> Self {
        Self(LOOKUP_TTL)
    }
}

/// Lookup service backed by the repository and the cache.
#[derive(Component)]
#[shaku(interface = LookupService)]
pub struct LookupServiceImpl {
    #[shaku(inject)]
    repository: Arc<dyn LookupRepository>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
    ttl: CacheTtl,
}

impl LookupServiceImpl {
    /// Creates a lookup service with the default TTL.
    #[must_use]
    pub fn new(repository: Arc<dyn LookupRepository>, cache: Arc<dyn CacheInterface>) -> Self {
        Self {
            repository,
            cache,
            ttl: CacheTtl::default(),
        }
    }

    /// Serves `key` from the cache, or runs `load` and caches its result.
    ///
    /// `load` is only polled on a miss. A failed cache write is logged and
    /// the fresh result is still returned.
    async fn read_through<T, F>(&self, key: &str, load: F) -> PetsocialResult<Vec<T>>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: Future<Output = PetsocialResult<Vec<T>>> + Send,
    {
        if let Some(cached) = self.cache.get::<Vec<T>>(key).await {
            return Ok(cached);
        }

        let fresh = load.await?;
        debug!(key, rows = fresh.len(), "Loaded lookup list from store");

        if let Err(e) = self.cache.set(key, &fresh, self.ttl.0).await {
            warn!(key, "Failed to cache lookup list: {}", e);
            metrics::counter!(
                "lookup_cache_errors_total",
                "backend" => self.cache.backend_name(),
                "op" => "set"
            )
            .increment(1);
        }

        Ok(fresh)
    }
}

#[async_trait]
impl LookupService for LookupServiceImpl {
    async fn get_pet_types(&self) -> PetsocialResult<Vec<PetTypeDto>> {
        self.read_through(cache_keys::PET_TYPES, async {
            let rows = self.repository.list_pet_types().await?;
            Ok(rows.into_iter().map(PetTypeDto::from).collect())
        })
        .await
    }

    async fn get_breeds(&self, pet_type_id: PetTypeId) -> PetsocialResult<Vec<BreedDto>> {
        let key = cache_keys::breeds(pet_type_id);
        self.read_through(&key, async {
            let rows = self.repository.list_breeds(Some(pet_type_id)).await?;
            Ok(rows.into_iter().map(BreedDto::from).collect())
        })
        .await
    }

    async fn get_colors(&self) -> PetsocialResult<Vec<ColorDto>> {
        self.read_through(cache_keys::COLORS, async {
            let rows = self.repository.list_colors().await?;
            Ok(rows.into_iter().map(ColorDto::from).collect())
        })
        .await
    }

    async fn get_foods(&self) -> PetsocialResult<Vec<FoodDto>> {
        self.read_through(cache_keys::FOODS, async {
            let rows = self.repository.list_foods().await?;
            Ok(rows.into_iter().map(FoodDto::from).collect())
        })
        .await
    }

    async fn get_user_types(&self) -> PetsocialResult<Vec<UserTypeDto>> {
        self.read_through(cache_keys::USER_TYPES, async {
            let rows = self.repository.list_user_types().await?;
            Ok(rows.into_iter().map(UserTypeDto::from).collect())
        })
        .await
    }
}

impl std::fmt::Debug for LookupServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupServiceImpl")
            .field("ttl", &self.ttl.0)
            .finish_non_exhaustive()
    }
}
