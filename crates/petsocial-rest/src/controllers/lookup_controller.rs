//! Cached lookup lists used to populate UI choices.

use crate::{
    extractors::ApiQuery,
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{
    extract::State,
    routing::get,
    Router,
};
use petsocial_core::{LookupId, PetTypeId};
use petsocial_service::{BreedDto, ColorDto, FoodDto, PetTypeDto, UserTypeDto};
use serde::Deserialize;
use tracing::debug;

/// Query string of the breeds endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BreedsQuery {
    pub pet_type_id: LookupId,
}

/// Creates the lookup router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pet-types", get(get_pet_types))
        .route("/breeds", get(get_breeds))
        .route("/colors", get(get_colors))
        .route("/foods", get(get_foods))
        .route("/user-types", get(get_user_types))
}

async fn get_pet_types(State(state): State<AppState>) -> ApiResult<Vec<PetTypeDto>> {
    ok(state.lookup_service.get_pet_types().await?)
}

async fn get_breeds(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<BreedsQuery>,
) -> ApiResult<Vec<BreedDto>> {
    debug!("Breeds requested for pet type {}", query.pet_type_id);
    ok(state
        .lookup_service
        .get_breeds(PetTypeId::new(query.pet_type_id))
        .await?)
}

async fn get_colors(State(state): State<AppState>) -> ApiResult<Vec<ColorDto>> {
    ok(state.lookup_service.get_colors().await?)
}

async fn get_foods(State(state): State<AppState>) -> ApiResult<Vec<FoodDto>> {
    ok(state.lookup_service.get_foods().await?)
}

async fn get_user_types(State(state): State<AppState>) -> ApiResult<Vec<UserTypeDto>> {
    ok(state.lookup_service.get_user_types().await?)
}
