//! Test doubles shared by the service unit tests.

use crate::cache::{CacheInterface, MemoryCacheService, LOOKUP_TTL};
use async_trait::async_trait;
use petsocial_core::{
    ChangeSet, EntityChange, LookupEntity, LookupId, LookupKind, PetBreed, PetColor, PetFood,
    PetType, PetTypeId, PetsocialError, PetsocialResult, UserType,
};
use petsocial_repository::LookupRepository;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Memory cache that counts writes and can be told to fail.
pub struct CountingCache {
    inner: MemoryCacheService,
    sets: AtomicUsize,
    removes: AtomicUsize,
    fail_all: bool,
    fail_removes: bool,
}

impl CountingCache {
    pub fn new() -> Self {
        Self {
            inner: MemoryCacheService::new(1_000),
            sets: AtomicUsize::new(0),
            removes: AtomicUsize::new(0),
            fail_all: false,
            fail_removes: false,
        }
    }

    /// Every call fails, as if the backend were down.
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::new()
        }
    }

    /// Reads and writes work; removals fail.
    pub fn failing_removes() -> Self {
        Self {
            fail_removes: true,
            ..Self::new()
        }
    }

    pub fn sets(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    pub fn removes(&self) -> usize {
        self.removes.load(Ordering::SeqCst)
    }

    pub async fn contains(&self, key: &str) -> bool {
        matches!(self.inner.get_raw(key).await, Ok(Some(_)))
    }

    /// Seeds an entry directly, bypassing the counters.
    pub async fn seed(&self, key: &str) {
        let _ = self.inner.set_raw(key, "[]", LOOKUP_TTL).await;
    }

    fn check(&self) -> PetsocialResult<()> {
        if self.fail_all {
            return Err(PetsocialError::cache("connection refused"));
        }
        Ok(())
    }
}

#[async_trait]
impl CacheInterface for CountingCache {
    async fn get_raw(&self, key: &str) -> PetsocialResult<Option<String>> {
        self.check()?;
        self.inner.get_raw(key).await
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> PetsocialResult<()> {
        self.check()?;
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.inner.set_raw(key, value, ttl).await
    }

    async fn remove(&self, key: &str) -> PetsocialResult<bool> {
        self.check()?;
        self.removes.fetch_add(1, Ordering::SeqCst);
        if self.fail_removes {
            return Err(PetsocialError::cache("connection reset"));
        }
        self.inner.remove(key).await
    }

    async fn ping(&self) -> PetsocialResult<()> {
        self.check()
    }

    fn backend_name(&self) -> &'static str {
        "counting"
    }
}

/// Repository whose every call fails.
pub struct UnavailableRepository;

fn unavailable<T>() -> PetsocialResult<T> {
    Err(PetsocialError::Database("connection refused".to_string()))
}

#[async_trait]
impl LookupRepository for UnavailableRepository {
    async fn list_pet_types(&self) -> PetsocialResult<Vec<PetType>> {
        unavailable()
    }
    async fn list_breeds(&self, _: Option<PetTypeId>) -> PetsocialResult<Vec<PetBreed>> {
        unavailable()
    }
    async fn list_colors(&self) -> PetsocialResult<Vec<PetColor>> {
        unavailable()
    }
    async fn list_foods(&self) -> PetsocialResult<Vec<PetFood>> {
        unavailable()
    }
    async fn list_user_types(&self) -> PetsocialResult<Vec<UserType>> {
        unavailable()
    }
    async fn find(&self, _: LookupKind, _: LookupId) -> PetsocialResult<Option<LookupEntity>> {
        unavailable()
    }
    async fn name_exists(
        &self,
        _: LookupKind,
        _: &str,
        _: Option<PetTypeId>,
        _: Option<LookupId>,
    ) -> PetsocialResult<bool> {
        unavailable()
    }
    async fn max_sort_order(&self, _: LookupKind, _: Option<PetTypeId>) -> PetsocialResult<Option<i32>> {
        unavailable()
    }
    async fn apply_changes(&self, _: Vec<EntityChange>) -> PetsocialResult<ChangeSet> {
        unavailable()
    }
    async fn health_check(&self) -> PetsocialResult<()> {
        unavailable()
    }
}
