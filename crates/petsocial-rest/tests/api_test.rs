//! Router tests over the in-memory store and the memory cache.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use petsocial_config::ServerConfig;
use petsocial_core::{PetsocialError, PetsocialResult};
use petsocial_repository::InMemoryLookupRepository;
use petsocial_rest::{create_router, AppState};
use petsocial_service::{
    AdminServiceImpl, CacheHealthCheck, CacheInterface, DatabaseHealthCheck,
    LookupCacheInvalidator, LookupServiceImpl, MemoryCacheService,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt;

/// Cache backend that is always down.
struct DownCache;

#[async_trait]
impl CacheInterface for DownCache {
    async fn get_raw(&self, _: &str) -> PetsocialResult<Option<String>> {
        Err(PetsocialError::cache("connection refused"))
    }
    async fn set_raw(&self, _: &str, _: &str, _: Duration) -> PetsocialResult<()> {
        Err(PetsocialError::cache("connection refused"))
    }
    async fn remove(&self, _: &str) -> PetsocialResult<bool> {
        Err(PetsocialError::cache("connection refused"))
    }
    async fn ping(&self) -> PetsocialResult<()> {
        Err(PetsocialError::cache("connection refused"))
    }
    fn backend_name(&self) -> &'static str {
        "down"
    }
}

fn app_with_cache(cache: Arc<dyn CacheInterface>) -> Router {
    let repo = Arc::new(InMemoryLookupRepository::with_defaults());
    let invalidator = Arc::new(LookupCacheInvalidator::new(cache.clone()));
    let state = AppState::new(
        Arc::new(LookupServiceImpl::new(repo.clone(), cache.clone())),
        Arc::new(AdminServiceImpl::new(repo.clone(), invalidator)),
        vec![
            Arc::new(DatabaseHealthCheck::new(repo)),
            Arc::new(CacheHealthCheck::new(cache)),
        ],
    );
    create_router(state, &ServerConfig::default())
}

fn app() -> Router {
    app_with_cache(Arc::new(MemoryCacheService::new(1_000)))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn names(envelope: &Value) -> Vec<String> {
    envelope["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_lookup_pet_types_envelope() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/lookup/pet-types", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], true);
    assert_eq!(body["statusCode"], 200);
    assert_eq!(body["message"], "Success");
    assert_eq!(body["data"][0]["name"], "Other");
    assert_eq!(body["data"][0]["imagePath"], "/images/default-pet.jpg");
}

#[tokio::test]
async fn test_lookup_breeds_by_pet_type() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/lookup/breeds?petTypeId=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Other", "Mix Breed"]);

    let (_, body) = send(&app, Method::GET, "/api/lookup/breeds?petTypeId=99", None).await;
    assert!(names(&body).is_empty());
}

#[tokio::test]
async fn test_admin_create_is_visible_through_warm_cache() {
    let app = app();
    let (_, before) = send(&app, Method::GET, "/api/lookup/colors", None).await;
    assert_eq!(names(&before), vec!["Other", "Mix Color"]);

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/admin/colors",
        Some(json!({ "name": "Black" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["data"]["sort_order"], 3);

    let (_, after) = send(&app, Method::GET, "/api/lookup/colors", None).await;
    assert_eq!(names(&after), vec!["Other", "Mix Color", "Black"]);
}

#[tokio::test]
async fn test_duplicate_name_is_conflict() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/admin/pet-foods",
        Some(json!({ "name": "other" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], false);
    assert_eq!(body["statusCode"], 409);
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_blank_name_is_bad_request() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/admin/pet-types",
        Some(json!({ "name": "   " })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Pet type name is required.");
}

#[tokio::test]
async fn test_malformed_body_is_bad_request_envelope() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/admin/colors")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], false);
}

#[tokio::test]
async fn test_non_numeric_pet_type_id_is_bad_request_envelope() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/lookup/breeds?petTypeId=abc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], false);
    assert_eq!(body["statusCode"], 400);
    assert!(body["message"].as_str().unwrap().starts_with("Invalid query string"));
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request_envelope() {
    let app = app();
    let (status, body) = send(&app, Method::DELETE, "/api/admin/colors/abc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], false);
    assert_eq!(body["statusCode"], 400);
    assert!(body["message"].as_str().unwrap().starts_with("Invalid path parameter"));

    let (status, body) = send(&app, Method::GET, "/api/admin/breeds?petTypeId=x", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], false);
}

#[tokio::test]
async fn test_protected_row_delete_is_rejected() {
    let app = app();
    let (status, body) = send(&app, Method::DELETE, "/api/admin/user-types/7", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Can't delete Pet Owner.");
}

#[tokio::test]
async fn test_update_missing_row_is_not_found() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/admin/breeds/404",
        Some(json!({ "petTypeId": 1, "name": "Ghost" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["statusCode"], 404);
}

#[tokio::test]
async fn test_delete_reports_message() {
    let app = app();
    let (_, created) = send(
        &app,
        Method::POST,
        "/api/admin/breeds",
        Some(json!({ "petTypeId": 1, "name": "Beagle" })),
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, body) = send(&app, Method::DELETE, &format!("/api/admin/breeds/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "PetBreed deleted.");
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_cache_outage_still_serves_lookups_and_is_degraded() {
    let app = app_with_cache(Arc::new(DownCache));

    let (status, body) = send(&app, Method::GET, "/api/lookup/foods", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Other"]);

    let (status, body) = send(&app, Method::POST, "/api/admin/pet-foods", Some(json!({ "name": "Kibble" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], true);

    let (status, body) = send(&app, Method::GET, "/health/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
}

#[tokio::test]
async fn test_liveness_and_request_id() {
    let app = app();
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}
