//! Lookup read service trait definition.

use crate::dto::{BreedDto, ColorDto, FoodDto, PetTypeDto, UserTypeDto};
use async_trait::async_trait;
use petsocial_core::{Interface, PetTypeId, PetsocialResult};

/// Cached lookup lists for UI choices.
///
/// Every call is cache-aside: a hit never touches the store, a miss reads
/// the store and repopulates the cache. Store failures propagate; cache
/// failures only cost a store read.
#[async_trait]
pub trait LookupService: Interface + Send + Sync {
    /// Pet types ordered by sort order.
    async fn get_pet_types(&self) -> PetsocialResult<Vec<PetTypeDto>>;

    /// Breeds of one pet type ordered by sort order.
    async fn get_breeds(&self, pet_type_id: PetTypeId) -> PetsocialResult<Vec<BreedDto>>;

    /// Colors ordered by sort order.
    async fn get_colors(&self) -> PetsocialResult<Vec<ColorDto>>;

    /// Foods ordered by sort order.
    async fn get_foods(&self) -> PetsocialResult<Vec<FoodDto>>;

    /// User types in primary-key order.
    async fn get_user_types(&self) -> PetsocialResult<Vec<UserTypeDto>>;
}
