//! Admin service implementation.

use crate::admin_service::AdminService;
use crate::dto::{AdminListQuery, BreedRequest, NamedLookupRequest, PetTypeRequest, UserTypeRequest};
use async_trait::async_trait;
use petsocial_core::{
    required_name, EntityChange, LookupEntity, LookupId, LookupKind, PetBreed, PetColor, PetFood,
    PetType, PetTypeId, PetsocialError, PetsocialResult, UserType, ValidateExt,
};
use petsocial_repository::{LookupRepository, SaveChangesInterceptor, UnitOfWork};
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};

/// Image used for pet types created without one.
pub const DEFAULT_PET_IMAGE: &str = "/images/default-pet.jpg";

/// Image used for user types created without one.
pub const DEFAULT_USER_TYPE_IMAGE: &str = "/images/default-user-type.jpg";

/// Loads a row and unwraps it to its concrete entity type.
macro_rules! load_as {
    ($self:ident, $variant:ident, $id:expr) => {
        match $self.load(LookupKind::$variant, $id).await? {
            LookupEntity::$variant(entity) => entity,
            _ => return Err(PetsocialError::not_found(LookupKind::$variant.resource_name(), $id)),
        }
    };
}

/// Admin service committing every mutation through a unit of work.
#[derive(Component)]
#[shaku(interface = AdminService)]
pub struct AdminServiceImpl {
    #[shaku(inject)]
    repository: Arc<dyn LookupRepository>,
    #[shaku(inject)]
    interceptor: Arc<dyn SaveChangesInterceptor>,
}

impl AdminServiceImpl {
    /// Creates an admin service notifying `interceptor` after each commit.
    #[must_use]
    pub fn new(
        repository: Arc<dyn LookupRepository>,
        interceptor: Arc<dyn SaveChangesInterceptor>,
    ) -> Self {
        Self {
            repository,
            interceptor,
        }
    }

    fn unit_of_work(&self) -> UnitOfWork {
        UnitOfWork::new(Arc::clone(&self.repository)).with_interceptor(Arc::clone(&self.interceptor))
    }

    /// Commits a single change and returns the committed entity.
    async fn commit(&self, change: EntityChange) -> PetsocialResult<LookupEntity> {
        let committed = self.unit_of_work().save_changes(vec![change]).await?;
        committed
            .into_changes()
            .into_iter()
            .next()
            .map(|change| change.entity().clone())
            .ok_or_else(|| PetsocialError::internal("commit returned no changes"))
    }

    async fn load(&self, kind: LookupKind, id: LookupId) -> PetsocialResult<LookupEntity> {
        self.repository
            .find(kind, id)
            .await?
            .ok_or_else(|| PetsocialError::not_found(kind.resource_name(), id))
    }

    async fn ensure_unique(
        &self,
        kind: LookupKind,
        name: &str,
        partition: Option<PetTypeId>,
        exclude_id: Option<LookupId>,
    ) -> PetsocialResult<()> {
        if !self.repository.name_exists(kind, name, partition, exclude_id).await? {
            return Ok(());
        }

        let message = match kind {
            LookupKind::PetBreed => {
                "A breed with the same name already exists for this pet type.".to_string()
            }
            _ => format!("A {} with the same name already exists.", kind.label()),
        };
        Err(PetsocialError::conflict(message))
    }

    /// Resolves the sort order of a new row. 0 appends after the last row
    /// of the collection (or breed partition).
    async fn sort_order_for_new(
        &self,
        kind: LookupKind,
        partition: Option<PetTypeId>,
        requested: i32,
    ) -> PetsocialResult<i32> {
        if requested != 0 {
            return Ok(requested);
        }
        let max = self.repository.max_sort_order(kind, partition).await?.unwrap_or(0);
        max.checked_add(1).ok_or_else(|| {
            PetsocialError::validation(format!(
                "Sort order can't be appended after {}; supply an explicit sort order.",
                max
            ))
        })
    }
}

fn pet_type_id(raw: LookupId) -> PetsocialResult<PetTypeId> {
    let id = PetTypeId::new(raw);
    if !id.is_valid() {
        return Err(PetsocialError::validation("Pet type is required for a breed."));
    }
    Ok(id)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn matches_search<T>(rows: Vec<T>, query: &AdminListQuery, name: impl Fn(&T) -> &str) -> Vec<T> {
    match query.search_term() {
        Some(term) => rows
            .into_iter()
            .filter(|row| name(row).to_lowercase().contains(&term))
            .collect(),
        None => rows,
    }
}

#[async_trait]
impl AdminService for AdminServiceImpl {
    async fn list_pet_types(&self, query: AdminListQuery) -> PetsocialResult<Vec<PetType>> {
        let rows = self.repository.list_pet_types().await?;
        Ok(matches_search(rows, &query, |r| r.name.as_str()))
    }

    async fn create_pet_type(&self, request: PetTypeRequest) -> PetsocialResult<PetType> {
        request.validate_request()?;
        let name = required_name(&request.name, LookupKind::PetType.label())?;
        self.ensure_unique(LookupKind::PetType, &name, None, None).await?;

        let image_path = non_blank(request.image_path).unwrap_or_else(|| DEFAULT_PET_IMAGE.to_string());
        let mut pet_type = PetType::new(name, image_path);
        pet_type.sort_order = self
            .sort_order_for_new(LookupKind::PetType, None, request.sort_order)
            .await?;

        pet_type.id = self.commit(EntityChange::added(pet_type.clone())).await?.id();
        info!("Pet type created: {} ({})", pet_type.name, pet_type.id);
        Ok(pet_type)
    }

    async fn update_pet_type(&self, id: LookupId, request: PetTypeRequest) -> PetsocialResult<PetType> {
        request.validate_request()?;
        let name = required_name(&request.name, LookupKind::PetType.label())?;
        let original = load_as!(self, PetType, id);
        self.ensure_unique(LookupKind::PetType, &name, None, Some(id)).await?;

        let mut current = original.clone();
        current.name = name;
        if request.sort_order != 0 {
            current.sort_order = request.sort_order;
        }
        if let Some(image_path) = non_blank(request.image_path) {
            current.image_path = image_path;
        }

        self.commit(EntityChange::modified(original, current.clone())).await?;
        info!("Pet type updated: {}", id);
        Ok(current)
    }

    async fn list_breeds(&self, query: AdminListQuery) -> PetsocialResult<Vec<PetBreed>> {
        let rows = self
            .repository
            .list_breeds(query.pet_type_id.map(PetTypeId::new))
            .await?;
        Ok(matches_search(rows, &query, |r| r.name.as_str()))
    }

    async fn create_breed(&self, request: BreedRequest) -> PetsocialResult<PetBreed> {
        request.validate_request()?;
        let name = required_name(&request.name, LookupKind::PetBreed.label())?;
        let partition = pet_type_id(request.pet_type_id)?;
        self.ensure_unique(LookupKind::PetBreed, &name, Some(partition), None)
            .await?;

        let mut breed = PetBreed::new(partition, name);
        breed.sort_order = self
            .sort_order_for_new(LookupKind::PetBreed, Some(partition), request.sort_order)
            .await?;

        breed.id = self.commit(EntityChange::added(breed.clone())).await?.id();
        info!("Breed created: {} ({}) under pet type {}", breed.name, breed.id, partition);
        Ok(breed)
    }

    async fn update_breed(&self, id: LookupId, request: BreedRequest) -> PetsocialResult<PetBreed> {
        request.validate_request()?;
        let name = required_name(&request.name, LookupKind::PetBreed.label())?;
        let partition = pet_type_id(request.pet_type_id)?;
        let original = load_as!(self, PetBreed, id);
        self.ensure_unique(LookupKind::PetBreed, &name, Some(partition), Some(id))
            .await?;

        let mut current = original.clone();
        current.name = name;
        current.pet_type_id = partition;
        if request.sort_order != 0 {
            current.sort_order = request.sort_order;
        }

        if original.pet_type_id != partition {
            debug!("Breed {} moves from pet type {} to {}", id, original.pet_type_id, partition);
        }
        self.commit(EntityChange::modified(original, current.clone())).await?;
        info!("Breed updated: {}", id);
        Ok(current)
    }

    async fn list_colors(&self, query: AdminListQuery) -> PetsocialResult<Vec<PetColor>> {
        let rows = self.repository.list_colors().await?;
        Ok(matches_search(rows, &query, |r| r.name.as_str()))
    }

    async fn create_color(&self, request: NamedLookupRequest) -> PetsocialResult<PetColor> {
        request.validate_request()?;
        let name = required_name(&request.name, LookupKind::PetColor.label())?;
        self.ensure_unique(LookupKind::PetColor, &name, None, None).await?;

        let mut color = PetColor::new(name);
        color.sort_order = self
            .sort_order_for_new(LookupKind::PetColor, None, request.sort_order)
            .await?;

        color.id = self.commit(EntityChange::added(color.clone())).await?.id();
        info!("Color created: {} ({})", color.name, color.id);
        Ok(color)
    }

    async fn update_color(&self, id: LookupId, request: NamedLookupRequest) -> PetsocialResult<PetColor> {
        request.validate_request()?;
        let name = required_name(&request.name, LookupKind::PetColor.label())?;
        let original = load_as!(self, PetColor, id);
        self.ensure_unique(LookupKind::PetColor, &name, None, Some(id)).await?;

        let mut current = original.clone();
        current.name = name;
        if request.sort_order != 0 {
            current.sort_order = request.sort_order;
        }

        self.commit(EntityChange::modified(original, current.clone())).await?;
        info!("Color updated: {}", id);
        Ok(current)
    }

    async fn list_foods(&self, query: AdminListQuery) -> PetsocialResult<Vec<PetFood>> {
        let rows = self.repository.list_foods().await?;
        Ok(matches_search(rows, &query, |r| r.name.as_str()))
    }

    async fn create_food(&self, request: NamedLookupRequest) -> PetsocialResult<PetFood> {
        request.validate_request()?;
        let name = required_name(&request.name, LookupKind::PetFood.label())?;
        self.ensure_unique(LookupKind::PetFood, &name, None, None).await?;

        let mut food = PetFood::new(name);
        food.sort_order = self
            .sort_order_for_new(LookupKind::PetFood, None, request.sort_order)
            .await?;

        food.id = self.commit(EntityChange::added(food.clone())).await?.id();
        info!("Food created: {} ({})", food.name, food.id);
        Ok(food)
    }

    async fn update_food(&self, id: LookupId, request: NamedLookupRequest) -> PetsocialResult<PetFood> {
        request.validate_request()?;
        let name = required_name(&request.name, LookupKind::PetFood.label())?;
        let original = load_as!(self, PetFood, id);
        self.ensure_unique(LookupKind::PetFood, &name, None, Some(id)).await?;

        let mut current = original.clone();
        current.name = name;
        if request.sort_order != 0 {
            current.sort_order = request.sort_order;
        }

        self.commit(EntityChange::modified(original, current.clone())).await?;
        info!("Food updated: {}", id);
        Ok(current)
    }

    async fn list_user_types(&self, query: AdminListQuery) -> PetsocialResult<Vec<UserType>> {
        let rows = self.repository.list_user_types().await?;
        Ok(matches_search(rows, &query, |r| r.name.as_str()))
    }

    async fn create_user_type(&self, request: UserTypeRequest) -> PetsocialResult<UserType> {
        request.validate_request()?;
        let name = required_name(&request.name, LookupKind::UserType.label())?;
        self.ensure_unique(LookupKind::UserType, &name, None, None).await?;

        let image_path =
            non_blank(request.image_path).unwrap_or_else(|| DEFAULT_USER_TYPE_IMAGE.to_string());
        let description = request.description.map(|d| d.trim().to_string()).unwrap_or_default();
        let mut user_type = UserType::new(name, image_path, description);

        user_type.id = self.commit(EntityChange::added(user_type.clone())).await?.id();
        info!("User type created: {} ({})", user_type.name, user_type.id);
        Ok(user_type)
    }

    async fn update_user_type(&self, id: LookupId, request: UserTypeRequest) -> PetsocialResult<UserType> {
        request.validate_request()?;
        let name = required_name(&request.name, LookupKind::UserType.label())?;
        let original = load_as!(self, UserType, id);
        self.ensure_unique(LookupKind::UserType, &name, None, Some(id)).await?;

        let mut current = original.clone();
        current.name = name;
        if let Some(image_path) = non_blank(request.image_path) {
            current.image_path = image_path;
        }
        if let Some(description) = request.description {
            current.description = description.trim().to_string();
        }

        self.commit(EntityChange::modified(original, current.clone())).await?;
        info!("User type updated: {}", id);
        Ok(current)
    }

    async fn delete(&self, kind: LookupKind, id: LookupId) -> PetsocialResult<()> {
        let entity = self.load(kind, id).await?;
        if kind.is_protected(entity.name()) {
            return Err(PetsocialError::business_rule(format!(
                "Can't delete {}.",
                entity.name()
            )));
        }

        self.commit(EntityChange::deleted(entity)).await?;
        info!("{} deleted: {}", kind, id);
        Ok(())
    }
}

impl std::fmt::Debug for AdminServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminServiceImpl").finish_non_exhaustive()
    }
}
