//! Admin lookup maintenance service trait definition.

use crate::dto::{AdminListQuery, BreedRequest, NamedLookupRequest, PetTypeRequest, UserTypeRequest};
use async_trait::async_trait;
use petsocial_core::{
    Interface, LookupId, LookupKind, PetBreed, PetColor, PetFood, PetType, PetsocialResult,
    UserType,
};

/// Create, update and delete operations on the lookup tables.
///
/// Lists read the store directly. Every mutation is committed through a
/// unit of work, so cached lists are invalidated once the commit lands.
#[async_trait]
pub trait AdminService: Interface + Send + Sync {
    async fn list_pet_types(&self, query: AdminListQuery) -> PetsocialResult<Vec<PetType>>;
    async fn create_pet_type(&self, request: PetTypeRequest) -> PetsocialResult<PetType>;
    async fn update_pet_type(&self, id: LookupId, request: PetTypeRequest) -> PetsocialResult<PetType>;

    async fn list_breeds(&self, query: AdminListQuery) -> PetsocialResult<Vec<PetBreed>>;
    async fn create_breed(&self, request: BreedRequest) -> PetsocialResult<PetBreed>;
    async fn update_breed(&self, id: LookupId, request: BreedRequest) -> PetsocialResult<PetBreed>;

    async fn list_colors(&self, query: AdminListQuery) -> PetsocialResult<Vec<PetColor>>;
    async fn create_color(&self, request: NamedLookupRequest) -> PetsocialResult<PetColor>;
    async fn update_color(&self, id: LookupId, request: NamedLookupRequest) -> PetsocialResult<PetColor>;

    async fn list_foods(&self, query: AdminListQuery) -> PetsocialResult<Vec<PetFood>>;
    async fn create_food(&self, request: NamedLookupRequest) -> PetsocialResult<PetFood>;
    async fn update_food(&self, id: LookupId, request: NamedLookupRequest) -> PetsocialResult<PetFood>;

    async fn list_user_types(&self, query: AdminListQuery) -> PetsocialResult<Vec<UserType>>;
    async fn create_user_type(&self, request: UserTypeRequest) -> PetsocialResult<UserType>;
    async fn update_user_type(&self, id: LookupId, request: UserTypeRequest) -> PetsocialResult<UserType>;

    /// Deletes a row. Fallback rows such as "Other" cannot be deleted.
    async fn delete(&self, kind: LookupKind, id: LookupId) -> PetsocialResult<()>;
}
