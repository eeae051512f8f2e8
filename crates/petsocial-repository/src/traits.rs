//! Repository trait definitions.

use async_trait::async_trait;
use petsocial_core::{
    ChangeSet, EntityChange, Interface, LookupEntity, LookupId, LookupKind, PetBreed, PetColor,
    PetFood, PetType, PetTypeId, PetsocialResult, UserType,
};

/// Lookup table repository.
///
/// Sorted collections come back ordered by `sort_order` ascending, then by
/// primary key. User types come back in primary-key order.
#[async_trait]
pub trait LookupRepository: Interface + Send + Sync {
    /// Lists all pet types.
    async fn list_pet_types(&self) -> PetsocialResult<Vec<PetType>>;

    /// Lists breeds of one pet type, or of every pet type ordered by
    /// `(pet_type_id, sort_order)` when `pet_type_id` is `None`.
    async fn list_breeds(&self, pet_type_id: Option<PetTypeId>) -> PetsocialResult<Vec<PetBreed>>;

    /// Lists all colors.
    async fn list_colors(&self) -> PetsocialResult<Vec<PetColor>>;

    /// Lists all foods.
    async fn list_foods(&self) -> PetsocialResult<Vec<PetFood>>;

    /// Lists all user types.
    async fn list_user_types(&self) -> PetsocialResult<Vec<UserType>>;

    /// Finds a row of the given kind by primary key.
    async fn find(&self, kind: LookupKind, id: LookupId) -> PetsocialResult<Option<LookupEntity>>;

    /// Checks whether `name` is already used in a collection, ignoring case.
    ///
    /// For breeds the check is scoped to `partition`. `exclude_id` skips the
    /// row being updated.
    async fn name_exists(
        &self,
        kind: LookupKind,
        name: &str,
        partition: Option<PetTypeId>,
        exclude_id: Option<LookupId>,
    ) -> PetsocialResult<bool>;

    /// Returns the largest sort order in a collection (or breed partition).
    async fn max_sort_order(
        &self,
        kind: LookupKind,
        partition: Option<PetTypeId>,
    ) -> PetsocialResult<Option<i32>>;

    /// Applies every change in one transaction and returns what was
    /// committed, with store-assigned IDs on added rows.
    ///
    /// Either all changes are applied or none are.
    async fn apply_changes(&self, changes: Vec<EntityChange>) -> PetsocialResult<ChangeSet>;

    /// Checks that the store is reachable.
    async fn health_check(&self) -> PetsocialResult<()>;
}

/// Hook run after a unit of work commits.
///
/// Implementations receive the exact committed change set. They cannot fail
/// the save: the data is already durable, so problems are logged instead.
#[async_trait]
pub trait SaveChangesInterceptor: Interface + Send + Sync {
    /// Called once per successful commit.
    async fn saved_changes(&self, changes: &ChangeSet);
}
