//! In-memory lookup repository.
//!
//! Keeps every table in one snapshot behind a lock. A commit applies its
//! changes to a copy and swaps it in only if all of them succeed, which
//! gives the same all-or-nothing behaviour as a database transaction.

use crate::LookupRepository;
use async_trait::async_trait;
use parking_lot::RwLock;
use petsocial_core::{
    ChangeSet, EntityChange, LookupEntity, LookupId, LookupKind, PetBreed, PetColor, PetFood,
    PetType, PetTypeId, PetsocialError, PetsocialResult, UserType,
};
use shaku::Component;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// Snapshot of every lookup table.
#[derive(Debug, Clone, Default)]
pub struct LookupTables {
    pet_types: BTreeMap<LookupId, PetType>,
    breeds: BTreeMap<LookupId, PetBreed>,
    colors: BTreeMap<LookupId, PetColor>,
    foods: BTreeMap<LookupId, PetFood>,
    user_types: BTreeMap<LookupId, UserType>,
    next_id: LookupId,
}

impl LookupTables {
    /// Tables holding only the rows other data falls back to.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut tables = Self::default();
        let other = tables.allocate_id();
        tables.put(
            PetType {
                id: other,
                name: "Other".to_string(),
                image_path: "/images/default-pet.jpg".to_string(),
                sort_order: 1,
            }
            .into(),
        );
        for (sort_order, name) in [(1, "Other"), (2, "Mix Breed")] {
            let id = tables.allocate_id();
            tables.put(
                PetBreed {
                    id,
                    pet_type_id: PetTypeId::new(other),
                    name: name.to_string(),
                    sort_order,
                }
                .into(),
            );
        }
        for (sort_order, name) in [(1, "Other"), (2, "Mix Color")] {
            let id = tables.allocate_id();
            tables.put(PetColor { id, name: name.to_string(), sort_order }.into());
        }
        let id = tables.allocate_id();
        tables.put(PetFood { id, name: "Other".to_string(), sort_order: 1 }.into());
        let id = tables.allocate_id();
        tables.put(
            UserType {
                id,
                name: "Pet Owner".to_string(),
                image_path: "/images/default-user-type.jpg".to_string(),
                description: String::new(),
            }
            .into(),
        );
        tables
    }

    fn allocate_id(&mut self) -> LookupId {
        self.next_id += 1;
        self.next_id
    }

    fn get(&self, kind: LookupKind, id: LookupId) -> Option<LookupEntity> {
        match kind {
            LookupKind::PetType => self.pet_types.get(&id).cloned().map(Into::into),
            LookupKind::PetBreed => self.breeds.get(&id).cloned().map(Into::into),
            LookupKind::PetColor => self.colors.get(&id).cloned().map(Into::into),
            LookupKind::PetFood => self.foods.get(&id).cloned().map(Into::into),
            LookupKind::UserType => self.user_types.get(&id).cloned().map(Into::into),
        }
    }

    fn put(&mut self, entity: LookupEntity) {
        match entity {
            LookupEntity::PetType(e) => {
                self.pet_types.insert(e.id, e);
            }
            LookupEntity::PetBreed(e) => {
                self.breeds.insert(e.id, e);
            }
            LookupEntity::PetColor(e) => {
                self.colors.insert(e.id, e);
            }
            LookupEntity::PetFood(e) => {
                self.foods.insert(e.id, e);
            }
            LookupEntity::UserType(e) => {
                self.user_types.insert(e.id, e);
            }
        }
    }

    fn remove(&mut self, kind: LookupKind, id: LookupId) -> bool {
        match kind {
            LookupKind::PetType => self.pet_types.remove(&id).is_some(),
            LookupKind::PetBreed => self.breeds.remove(&id).is_some(),
            LookupKind::PetColor => self.colors.remove(&id).is_some(),
            LookupKind::PetFood => self.foods.remove(&id).is_some(),
            LookupKind::UserType => self.user_types.remove(&id).is_some(),
        }
    }

    /// Rows of a kind as `(id, name, sort_order, partition)`.
    fn summaries(&self, kind: LookupKind) -> Vec<(LookupId, &str, i32, Option<PetTypeId>)> {
        match kind {
            LookupKind::PetType => self
                .pet_types
                .values()
                .map(|e| (e.id, e.name.as_str(), e.sort_order, None))
                .collect(),
            LookupKind::PetBreed => self
                .breeds
                .values()
                .map(|e| (e.id, e.name.as_str(), e.sort_order, Some(e.pet_type_id)))
                .collect(),
            LookupKind::PetColor => self
                .colors
                .values()
                .map(|e| (e.id, e.name.as_str(), e.sort_order, None))
                .collect(),
            LookupKind::PetFood => self
                .foods
                .values()
                .map(|e| (e.id, e.name.as_str(), e.sort_order, None))
                .collect(),
            LookupKind::UserType => self
                .user_types
                .values()
                .map(|e| (e.id, e.name.as_str(), 0, None))
                .collect(),
        }
    }

    fn apply(&mut self, change: &mut EntityChange) -> PetsocialResult<()> {
        match change {
            EntityChange::Added { entity } => {
                let id = self.allocate_id();
                entity.set_id(id);
                self.put(entity.clone());
            }
            EntityChange::Modified { current, .. } => {
                if self.get(current.kind(), current.id()).is_none() {
                    return Err(PetsocialError::not_found(
                        current.kind().resource_name(),
                        current.id(),
                    ));
                }
                self.put(current.clone());
            }
            EntityChange::Deleted { entity } => {
                if !self.remove(entity.kind(), entity.id()) {
                    return Err(PetsocialError::not_found(
                        entity.kind().resource_name(),
                        entity.id(),
                    ));
                }
            }
        }
        Ok(())
    }
}

fn sorted_by<T, K: Ord>(rows: impl Iterator<Item = T>, key: impl Fn(&T) -> K) -> Vec<T> {
    let mut rows: Vec<T> = rows.collect();
    rows.sort_by_key(|row| key(row));
    rows
}

/// Lookup repository held entirely in process memory.
///
/// Used for local development without MySQL and as the store behind the
/// service and HTTP tests.
#[derive(Debug, Default, Component)]
#[shaku(interface = LookupRepository)]
pub struct InMemoryLookupRepository {
    tables: RwLock<LookupTables>,
    queries: AtomicUsize,
}

impl InMemoryLookupRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository holding the rows other data falls back to.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::from_tables(LookupTables::with_defaults())
    }

    /// Creates a repository over existing tables.
    #[must_use]
    pub fn from_tables(tables: LookupTables) -> Self {
        Self {
            tables: RwLock::new(tables),
            queries: AtomicUsize::new(0),
        }
    }

    /// Number of list queries served so far.
    #[must_use]
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn record_query(&self, what: &str) {
        self.queries.fetch_add(1, Ordering::SeqCst);
        debug!("In-memory lookup query: {}", what);
    }
}

#[async_trait]
impl LookupRepository for InMemoryLookupRepository {
    async fn list_pet_types(&self) -> PetsocialResult<Vec<PetType>> {
        self.record_query("pet_types");
        let tables = self.tables.read();
        Ok(sorted_by(tables.pet_types.values().cloned(), |e| (e.sort_order, e.id)))
    }

    async fn list_breeds(&self, pet_type_id: Option<PetTypeId>) -> PetsocialResult<Vec<PetBreed>> {
        self.record_query("breeds");
        let tables = self.tables.read();
        let rows = tables
            .breeds
            .values()
            .filter(|e| pet_type_id.map_or(true, |id| e.pet_type_id == id))
            .cloned();
        Ok(sorted_by(rows, |e| (e.pet_type_id, e.sort_order, e.id)))
    }

    async fn list_colors(&self) -> PetsocialResult<Vec<PetColor>> {
        self.record_query("colors");
        let tables = self.tables.read();
        Ok(sorted_by(tables.colors.values().cloned(), |e| (e.sort_order, e.id)))
    }

    async fn list_foods(&self) -> PetsocialResult<Vec<PetFood>> {
        self.record_query("foods");
        let tables = self.tables.read();
        Ok(sorted_by(tables.foods.values().cloned(), |e| (e.sort_order, e.id)))
    }

    async fn list_user_types(&self) -> PetsocialResult<Vec<UserType>> {
        self.record_query("user_types");
        Ok(self.tables.read().user_types.values().cloned().collect())
    }

    async fn find(&self, kind: LookupKind, id: LookupId) -> PetsocialResult<Option<LookupEntity>> {
        Ok(self.tables.read().get(kind, id))
    }

    async fn name_exists(
        &self,
        kind: LookupKind,
        name: &str,
        partition: Option<PetTypeId>,
        exclude_id: Option<LookupId>,
    ) -> PetsocialResult<bool> {
        let needle = name.trim().to_lowercase();
        let tables = self.tables.read();
        Ok(tables.summaries(kind).into_iter().any(|(id, row_name, _, row_partition)| {
            Some(id) != exclude_id
                && (partition.is_none() || row_partition == partition)
                && row_name.to_lowercase() == needle
        }))
    }

    async fn max_sort_order(
        &self,
        kind: LookupKind,
        partition: Option<PetTypeId>,
    ) -> PetsocialResult<Option<i32>> {
        if !kind.is_sorted() {
            return Ok(None);
        }
        let tables = self.tables.read();
        Ok(tables
            .summaries(kind)
            .into_iter()
            .filter(|(_, _, _, row_partition)| partition.is_none() || *row_partition == partition)
            .map(|(_, _, sort_order, _)| sort_order)
            .max())
    }

    async fn apply_changes(&self, mut changes: Vec<EntityChange>) -> PetsocialResult<ChangeSet> {
        let mut tables = self.tables.write();
        let mut staged = tables.clone();
        for change in &mut changes {
            staged.apply(change)?;
        }
        *tables = staged;
        debug!("Committed {} lookup change(s) in memory", changes.len());
        Ok(ChangeSet::from(changes))
    }

    async fn health_check(&self) -> PetsocialResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breed(pet_type: LookupId, name: &str, sort_order: i32) -> PetBreed {
        PetBreed {
            id: 0,
            pet_type_id: PetTypeId::new(pet_type),
            name: name.to_string(),
            sort_order,
        }
    }

    #[tokio::test]
    async fn test_added_rows_get_ids() {
        let repo = InMemoryLookupRepository::new();
        let committed = repo
            .apply_changes(vec![
                EntityChange::added(PetColor::new("Black")),
                EntityChange::added(PetColor::new("White")),
            ])
            .await
            .unwrap();

        let ids: Vec<_> = committed.iter().map(|c| c.entity().id()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_lists_are_sorted_by_sort_order_then_id() {
        let repo = InMemoryLookupRepository::new();
        let mut late = PetFood::new("Raw");
        late.sort_order = 5;
        let mut early = PetFood::new("Kibble");
        early.sort_order = 1;
        let mut tie = PetFood::new("Wet");
        tie.sort_order = 1;
        repo.apply_changes(vec![
            EntityChange::added(late),
            EntityChange::added(early),
            EntityChange::added(tie),
        ])
        .await
        .unwrap();

        let names: Vec<_> = repo.list_foods().await.unwrap().into_iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["Kibble", "Wet", "Raw"]);
    }

    #[tokio::test]
    async fn test_breeds_are_partitioned_by_pet_type() {
        let repo = InMemoryLookupRepository::new();
        repo.apply_changes(vec![
            EntityChange::added(breed(1, "Beagle", 2)),
            EntityChange::added(breed(2, "Siamese", 1)),
            EntityChange::added(breed(1, "Akita", 1)),
        ])
        .await
        .unwrap();

        let dogs: Vec<_> = repo
            .list_breeds(Some(PetTypeId::new(1)))
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(dogs, vec!["Akita", "Beagle"]);

        let all: Vec<_> = repo.list_breeds(None).await.unwrap().into_iter().map(|b| b.name).collect();
        assert_eq!(all, vec!["Akita", "Beagle", "Siamese"]);
    }

    #[tokio::test]
    async fn test_failed_commit_leaves_store_untouched() {
        let repo = InMemoryLookupRepository::new();
        let mut ghost = PetColor::new("Ghost");
        ghost.id = 42;

        let result = repo
            .apply_changes(vec![
                EntityChange::added(PetColor::new("Black")),
                EntityChange::deleted(ghost),
            ])
            .await;

        assert!(matches!(result, Err(PetsocialError::NotFound { .. })));
        assert!(repo.list_colors().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_name_exists_is_case_insensitive_and_scoped() {
        let repo = InMemoryLookupRepository::new();
        let committed = repo
            .apply_changes(vec![EntityChange::added(breed(1, "Beagle", 1))])
            .await
            .unwrap();
        let beagle_id = committed.changes()[0].entity().id();

        let kind = LookupKind::PetBreed;
        let dog = Some(PetTypeId::new(1));
        let cat = Some(PetTypeId::new(2));
        assert!(repo.name_exists(kind, "BEAGLE", dog, None).await.unwrap());
        assert!(!repo.name_exists(kind, "Beagle", cat, None).await.unwrap());
        assert!(!repo.name_exists(kind, "beagle", dog, Some(beagle_id)).await.unwrap());
    }

    #[tokio::test]
    async fn test_max_sort_order_per_partition() {
        let repo = InMemoryLookupRepository::new();
        repo.apply_changes(vec![
            EntityChange::added(breed(1, "Beagle", 3)),
            EntityChange::added(breed(2, "Siamese", 8)),
        ])
        .await
        .unwrap();

        let kind = LookupKind::PetBreed;
        assert_eq!(repo.max_sort_order(kind, Some(PetTypeId::new(1))).await.unwrap(), Some(3));
        assert_eq!(repo.max_sort_order(kind, Some(PetTypeId::new(9))).await.unwrap(), None);
        assert_eq!(repo.max_sort_order(LookupKind::UserType, None).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_defaults_include_protected_rows() {
        let repo = InMemoryLookupRepository::with_defaults();
        let breeds = repo.list_breeds(None).await.unwrap();
        assert!(breeds.iter().any(|b| b.name == "Mix Breed"));
        let user_types = repo.list_user_types().await.unwrap();
        assert_eq!(user_types[0].name, "Pet Owner");
    }

    #[tokio::test]
    async fn test_query_count_tracks_list_calls() {
        let repo = InMemoryLookupRepository::new();
        repo.list_colors().await.unwrap();
        repo.list_breeds(Some(PetTypeId::new(1))).await.unwrap();
        assert_eq!(repo.query_count(), 2);
    }
}
