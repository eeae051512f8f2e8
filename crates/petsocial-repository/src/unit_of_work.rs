//! Unit of work with post-commit interceptors.

use crate::{LookupRepository, SaveChangesInterceptor};
use petsocial_core::{ChangeSet, EntityChange, PetsocialResult};
use std::sync::Arc;
use tracing::{debug, warn};

/// Groups staged changes into a single commit and notifies interceptors
/// once the commit succeeds.
#[derive(Clone)]
pub struct UnitOfWork {
    repository: Arc<dyn LookupRepository>,
    interceptors: Vec<Arc<dyn SaveChangesInterceptor>>,
}

impl UnitOfWork {
    /// Creates a unit of work with no interceptors.
    #[must_use]
    pub fn new(repository: Arc<dyn LookupRepository>) -> Self {
        Self {
            repository,
            interceptors: Vec::new(),
        }
    }

    /// Registers an interceptor. Interceptors run in registration order.
    #[must_use]
    pub fn with_interceptor(mut self, interceptor: Arc<dyn SaveChangesInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Commits the staged changes.
    ///
    /// Interceptors run only after the store reports a successful commit.
    /// A failed commit returns the store error and runs no interceptor.
    pub async fn save_changes(&self, changes: Vec<EntityChange>) -> PetsocialResult<ChangeSet> {
        if changes.is_empty() {
            return Ok(ChangeSet::new());
        }

        let committed = self.repository.apply_changes(changes).await.map_err(|e| {
            warn!("Commit failed, skipping save interceptors: {}", e);
            e
        })?;

        debug!(
            changes = committed.len(),
            interceptors = self.interceptors.len(),
            "Commit succeeded, running save interceptors"
        );

        for interceptor in &self.interceptors {
            interceptor.saved_changes(&committed).await;
        }

        Ok(committed)
    }
}

impl std::fmt::Debug for UnitOfWork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnitOfWork")
            .field("interceptors", &self.interceptors.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryLookupRepository;
    use async_trait::async_trait;
    use petsocial_core::{
        LookupEntity, LookupId, LookupKind, PetBreed, PetColor, PetFood, PetType, PetTypeId,
        PetsocialError, UserType,
    };
    use std::sync::Mutex;

    /// Records every change set it sees, tagged with its name.
    struct RecordingInterceptor {
        name: &'static str,
        log: Arc<Mutex<Vec<(&'static str, ChangeSet)>>>,
    }

    #[async_trait]
    impl SaveChangesInterceptor for RecordingInterceptor {
        async fn saved_changes(&self, changes: &ChangeSet) {
            self.log.lock().unwrap().push((self.name, changes.clone()));
        }
    }

    /// Repository whose commit always fails.
    struct FailingCommitRepository;

    #[async_trait]
    impl LookupRepository for FailingCommitRepository {
        async fn list_pet_types(&self) -> PetsocialResult<Vec<PetType>> {
            Ok(vec![])
        }
        async fn list_breeds(&self, _: Option<PetTypeId>) -> PetsocialResult<Vec<PetBreed>> {
            Ok(vec![])
        }
        async fn list_colors(&self) -> PetsocialResult<Vec<PetColor>> {
            Ok(vec![])
        }
        async fn list_foods(&self) -> PetsocialResult<Vec<PetFood>> {
            Ok(vec![])
        }
        async fn list_user_types(&self) -> PetsocialResult<Vec<UserType>> {
            Ok(vec![])
        }
        async fn find(&self, _: LookupKind, _: LookupId) -> PetsocialResult<Option<LookupEntity>> {
            Ok(None)
        }
        async fn name_exists(
            &self,
            _: LookupKind,
            _: &str,
            _: Option<PetTypeId>,
            _: Option<LookupId>,
        ) -> PetsocialResult<bool> {
            Ok(false)
        }
        async fn max_sort_order(&self, _: LookupKind, _: Option<PetTypeId>) -> PetsocialResult<Option<i32>> {
            Ok(None)
        }
        async fn apply_changes(&self, _: Vec<EntityChange>) -> PetsocialResult<ChangeSet> {
            Err(PetsocialError::Database("deadlock detected".to_string()))
        }
        async fn health_check(&self) -> PetsocialResult<()> {
            Ok(())
        }
    }

    fn recorder(
        name: &'static str,
        log: &Arc<Mutex<Vec<(&'static str, ChangeSet)>>>,
    ) -> Arc<dyn SaveChangesInterceptor> {
        Arc::new(RecordingInterceptor {
            name,
            log: Arc::clone(log),
        })
    }

    #[tokio::test]
    async fn test_interceptors_run_in_order_after_commit() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let repo = Arc::new(InMemoryLookupRepository::new());
        let uow = UnitOfWork::new(repo.clone())
            .with_interceptor(recorder("first", &log))
            .with_interceptor(recorder("second", &log));

        let committed = uow
            .save_changes(vec![EntityChange::added(PetColor::new("Black"))])
            .await
            .unwrap();

        assert_eq!(committed.len(), 1);
        assert!(committed.iter().all(|c| c.entity().id() > 0));

        let log = log.lock().unwrap();
        let names: Vec<_> = log.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(log[0].1, committed);

        assert_eq!(repo.list_colors().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_commit_skips_interceptors() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let uow = UnitOfWork::new(Arc::new(FailingCommitRepository)).with_interceptor(recorder("only", &log));

        let result = uow
            .save_changes(vec![EntityChange::added(PetColor::new("Black"))])
            .await;

        assert!(matches!(result, Err(PetsocialError::Database(_))));
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_save_is_a_no_op() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let uow = UnitOfWork::new(Arc::new(FailingCommitRepository)).with_interceptor(recorder("only", &log));

        let committed = uow.save_changes(vec![]).await.unwrap();

        assert!(committed.is_empty());
        assert!(log.lock().unwrap().is_empty());
    }
}
