//! Integration tests for MySqlLookupRepository.
//!
//! These tests run against a real MySQL database using testcontainers.
//! Requires Docker to be available on the system.

mod common;

use common::TestDatabase;
use petsocial_core::{
    EntityChange, LookupKind, PetBreed, PetColor, PetFood, PetType, PetTypeId, PetsocialError,
};
use petsocial_repository::{LookupRepository, MySqlLookupRepository};

fn breed(pet_type_id: PetTypeId, name: &str, sort_order: i32) -> PetBreed {
    PetBreed {
        id: 0,
        pet_type_id,
        name: name.to_string(),
        sort_order,
    }
}

#[tokio::test]
async fn test_seeded_fallback_rows_exist() {
    let db = TestDatabase::new().await;
    let repo = MySqlLookupRepository::new(db.pool());

    let pet_types = repo.list_pet_types().await.expect("Query failed");
    assert!(pet_types.iter().any(|t| t.name == "Other"));

    let colors: Vec<_> = repo
        .list_colors()
        .await
        .expect("Query failed")
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(colors, vec!["Other", "Mix Color"]);

    let user_types = repo.list_user_types().await.expect("Query failed");
    assert_eq!(user_types[0].name, "Pet Owner");
}

#[tokio::test]
async fn test_apply_changes_assigns_ids_and_orders_lists() {
    let db = TestDatabase::new().await;
    let repo = MySqlLookupRepository::new(db.pool());

    let mut raw = PetFood::new("Raw");
    raw.sort_order = 9;
    let mut kibble = PetFood::new("Kibble");
    kibble.sort_order = 2;

    let committed = repo
        .apply_changes(vec![EntityChange::added(raw), EntityChange::added(kibble)])
        .await
        .expect("Commit failed");
    assert!(committed.iter().all(|c| c.entity().id() > 0));

    let names: Vec<_> = repo
        .list_foods()
        .await
        .expect("Query failed")
        .into_iter()
        .map(|f| f.name)
        .collect();
    assert_eq!(names, vec!["Other", "Kibble", "Raw"]);
}

#[tokio::test]
async fn test_breeds_are_partitioned_and_ordered() {
    let db = TestDatabase::new().await;
    let repo = MySqlLookupRepository::new(db.pool());

    let committed = repo
        .apply_changes(vec![
            EntityChange::added(PetType::new("Dog", "/images/dog.jpg")),
            EntityChange::added(PetType::new("Cat", "/images/cat.jpg")),
        ])
        .await
        .expect("Commit failed");
    let dog = PetTypeId::new(committed.changes()[0].entity().id());
    let cat = PetTypeId::new(committed.changes()[1].entity().id());

    repo.apply_changes(vec![
        EntityChange::added(breed(dog, "Poodle", 2)),
        EntityChange::added(breed(dog, "Beagle", 1)),
        EntityChange::added(breed(cat, "Siamese", 1)),
    ])
    .await
    .expect("Commit failed");

    let dogs: Vec<_> = repo
        .list_breeds(Some(dog))
        .await
        .expect("Query failed")
        .into_iter()
        .map(|b| b.name)
        .collect();
    assert_eq!(dogs, vec!["Beagle", "Poodle"]);

    let cats = repo.list_breeds(Some(cat)).await.expect("Query failed");
    assert_eq!(cats.len(), 1);
    assert!(cats.iter().all(|b| b.pet_type_id == cat));

    assert_eq!(
        repo.max_sort_order(LookupKind::PetBreed, Some(dog)).await.expect("Query failed"),
        Some(2)
    );
}

#[tokio::test]
async fn test_failed_change_rolls_back_whole_commit() {
    let db = TestDatabase::new().await;
    let repo = MySqlLookupRepository::new(db.pool());

    let mut ghost = PetColor::new("Ghost");
    ghost.id = 999_999;

    let result = repo
        .apply_changes(vec![
            EntityChange::added(PetColor::new("Black")),
            EntityChange::deleted(ghost),
        ])
        .await;

    assert!(matches!(result, Err(PetsocialError::NotFound { .. })));
    let exists = repo
        .name_exists(LookupKind::PetColor, "black", None, None)
        .await
        .expect("Query failed");
    assert!(!exists);
}

#[tokio::test]
async fn test_duplicate_name_maps_to_conflict() {
    let db = TestDatabase::new().await;
    let repo = MySqlLookupRepository::new(db.pool());

    let result = repo
        .apply_changes(vec![EntityChange::added(PetColor::new("other"))])
        .await;

    assert!(matches!(result, Err(PetsocialError::Conflict(_))));
}

#[tokio::test]
async fn test_update_and_find() {
    let db = TestDatabase::new().await;
    let repo = MySqlLookupRepository::new(db.pool());

    let committed = repo
        .apply_changes(vec![EntityChange::added(PetColor::new("Brown"))])
        .await
        .expect("Commit failed");
    let original = committed.changes()[0].entity().clone();

    let mut renamed = PetColor::new("Chocolate");
    renamed.id = original.id();
    renamed.sort_order = 3;
    repo.apply_changes(vec![EntityChange::modified(original.clone(), renamed.clone())])
        .await
        .expect("Commit failed");

    let found = repo
        .find(LookupKind::PetColor, original.id())
        .await
        .expect("Query failed")
        .expect("Color not found");
    assert_eq!(found.name(), "Chocolate");
}
