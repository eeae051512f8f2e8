//! Admin lookup maintenance endpoints.
//!
//! Every mutation here commits through the unit of work, which invalidates
//! the matching cached lookup lists.

use crate::{
    extractors::{ApiPath, ApiQuery, ValidatedJson},
    responses::{ok, ok_message, ApiResult},
    state::AppState,
};
use axum::{
    extract::State,
    routing::{get, put},
    Router,
};
use petsocial_core::{LookupId, LookupKind, PetBreed, PetColor, PetFood, PetType, UserType};
use petsocial_service::{
    AdminListQuery, BreedRequest, NamedLookupRequest, PetTypeRequest, UserTypeRequest,
};

/// Creates the admin router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pet-types", get(list_pet_types).post(create_pet_type))
        .route("/pet-types/:id", put(update_pet_type).delete(delete_pet_type))
        .route("/breeds", get(list_breeds).post(create_breed))
        .route("/breeds/:id", put(update_breed).delete(delete_breed))
        .route("/colors", get(list_colors).post(create_color))
        .route("/colors/:id", put(update_color).delete(delete_color))
        .route("/pet-foods", get(list_foods).post(create_food))
        .route("/pet-foods/:id", put(update_food).delete(delete_food))
        .route("/user-types", get(list_user_types).post(create_user_type))
        .route("/user-types/:id", put(update_user_type).delete(delete_user_type))
}

async fn delete_kind(state: &AppState, kind: LookupKind, id: LookupId) -> ApiResult<()> {
    state.admin_service.delete(kind, id).await?;
    ok_message(format!("{} deleted.", kind))
}

// Pet types

async fn list_pet_types(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<AdminListQuery>,
) -> ApiResult<Vec<PetType>> {
    ok(state.admin_service.list_pet_types(query).await?)
}

async fn create_pet_type(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<PetTypeRequest>,
) -> ApiResult<PetType> {
    ok(state.admin_service.create_pet_type(request).await?)
}

async fn update_pet_type(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<LookupId>,
    ValidatedJson(request): ValidatedJson<PetTypeRequest>,
) -> ApiResult<PetType> {
    ok(state.admin_service.update_pet_type(id, request).await?)
}

async fn delete_pet_type(State(state): State<AppState>, ApiPath(id): ApiPath<LookupId>) -> ApiResult<()> {
    delete_kind(&state, LookupKind::PetType, id).await
}

// Breeds

async fn list_breeds(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<AdminListQuery>,
) -> ApiResult<Vec<PetBreed>> {
    ok(state.admin_service.list_breeds(query).await?)
}

async fn create_breed(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<BreedRequest>,
) -> ApiResult<PetBreed> {
    ok(state.admin_service.create_breed(request).await?)
}

async fn update_breed(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<LookupId>,
    ValidatedJson(request): ValidatedJson<BreedRequest>,
) -> ApiResult<PetBreed> {
    ok(state.admin_service.update_breed(id, request).await?)
}

async fn delete_breed(State(state): State<AppState>, ApiPath(id): ApiPath<LookupId>) -> ApiResult<()> {
    delete_kind(&state, LookupKind::PetBreed, id).await
}

// Colors

async fn list_colors(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<AdminListQuery>,
) -> ApiResult<Vec<PetColor>> {
    ok(state.admin_service.list_colors(query).await?)
}

async fn create_color(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<NamedLookupRequest>,
) -> ApiResult<PetColor> {
    ok(state.admin_service.create_color(request).await?)
}

async fn update_color(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<LookupId>,
    ValidatedJson(request): ValidatedJson<NamedLookupRequest>,
) -> ApiResult<PetColor> {
    ok(state.admin_service.update_color(id, request).await?)
}

async fn delete_color(State(state): State<AppState>, ApiPath(id): ApiPath<LookupId>) -> ApiResult<()> {
    delete_kind(&state, LookupKind::PetColor, id).await
}

// Foods

async fn list_foods(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<AdminListQuery>,
) -> ApiResult<Vec<PetFood>> {
    ok(state.admin_service.list_foods(query).await?)
}

async fn create_food(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<NamedLookupRequest>,
) -> ApiResult<PetFood> {
    ok(state.admin_service.create_food(request).await?)
}

async fn update_food(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<LookupId>,
    ValidatedJson(request): ValidatedJson<NamedLookupRequest>,
) -> ApiResult<PetFood> {
    ok(state.admin_service.update_food(id, request).await?)
}

async fn delete_food(State(state): State<AppState>, ApiPath(id): ApiPath<LookupId>) -> ApiResult<()> {
    delete_kind(&state, LookupKind::PetFood, id).await
}

// User types

async fn list_user_types(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<AdminListQuery>,
) -> ApiResult<Vec<UserType>> {
    ok(state.admin_service.list_user_types(query).await?)
}

async fn create_user_type(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<UserTypeRequest>,
) -> ApiResult<UserType> {
    ok(state.admin_service.create_user_type(request).await?)
}

async fn update_user_type(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<LookupId>,
    ValidatedJson(request): ValidatedJson<UserTypeRequest>,
) -> ApiResult<UserType> {
    ok(state.admin_service.update_user_type(id, request).await?)
}

async fn delete_user_type(State(state): State<AppState>, ApiPath(id): ApiPath<LookupId>) -> ApiResult<()> {
    delete_kind(&state, LookupKind::UserType, id).await
}
