//! MySQL lookup repository implementation.

use crate::{traits::LookupRepository, DatabasePoolInterface};
use async_trait::async_trait;
use petsocial_core::{
    ChangeSet, EntityChange, LookupEntity, LookupId, LookupKind, PetBreed, PetColor, PetFood,
    PetType, PetTypeId, PetsocialError, PetsocialResult, UserType,
};
use shaku::Component;
use sqlx::{FromRow, MySql, Transaction};
use std::sync::Arc;
use tracing::{debug, info};

/// MySQL lookup repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = LookupRepository)]
pub struct MySqlLookupRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlLookupRepository {
    /// Creates a new MySQL lookup repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PetTypeRow {
    id: i64,
    name: String,
    image_path: String,
    sort_order: i32,
}

impl From<PetTypeRow> for PetType {
    fn from(row: PetTypeRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            image_path: row.image_path,
            sort_order: row.sort_order,
        }
    }
}

#[derive(Debug, FromRow)]
struct PetBreedRow {
    id: i64,
    pet_type_id: i64,
    name: String,
    sort_order: i32,
}

impl From<PetBreedRow> for PetBreed {
    fn from(row: PetBreedRow) -> Self {
        Self {
            id: row.id,
            pet_type_id: PetTypeId::new(row.pet_type_id),
            name: row.name,
            sort_order: row.sort_order,
        }
    }
}

/// Shared row shape of the color and food tables.
#[derive(Debug, FromRow)]
struct NamedRow {
    id: i64,
    name: String,
    sort_order: i32,
}

#[derive(Debug, FromRow)]
struct UserTypeRow {
    id: i64,
    name: String,
    image_path: String,
    description: String,
}

impl From<UserTypeRow> for UserType {
    fn from(row: UserTypeRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            image_path: row.image_path,
            description: row.description,
        }
    }
}

const fn table_name(kind: LookupKind) -> &'static str {
    match kind {
        LookupKind::PetType => "pet_types",
        LookupKind::PetBreed => "pet_breeds",
        LookupKind::PetColor => "pet_colors",
        LookupKind::PetFood => "pet_foods",
        LookupKind::UserType => "user_types",
    }
}

fn not_found(entity: &LookupEntity) -> PetsocialError {
    PetsocialError::not_found(entity.kind().resource_name(), entity.id())
}

async fn insert(tx: &mut Transaction<'_, MySql>, entity: &LookupEntity) -> PetsocialResult<LookupId> {
    let result = match entity {
        LookupEntity::PetType(e) => {
            sqlx::query("INSERT INTO pet_types (name, image_path, sort_order) VALUES (?, ?, ?)")
                .bind(&e.name)
                .bind(&e.image_path)
                .bind(e.sort_order)
                .execute(&mut **tx)
                .await?
        }
        LookupEntity::PetBreed(e) => {
            sqlx::query("INSERT INTO pet_breeds (pet_type_id, name, sort_order) VALUES (?, ?, ?)")
                .bind(e.pet_type_id.into_inner())
                .bind(&e.name)
                .bind(e.sort_order)
                .execute(&mut **tx)
                .await?
        }
        LookupEntity::PetColor(PetColor { name, sort_order, .. })
        | LookupEntity::PetFood(PetFood { name, sort_order, .. }) => {
            let sql = format!(
                "INSERT INTO {} (name, sort_order) VALUES (?, ?)",
                table_name(entity.kind())
            );
            sqlx::query(&sql)
                .bind(name)
                .bind(sort_order)
                .execute(&mut **tx)
                .await?
        }
        LookupEntity::UserType(e) => {
            sqlx::query("INSERT INTO user_types (name, image_path, description) VALUES (?, ?, ?)")
                .bind(&e.name)
                .bind(&e.image_path)
                .bind(&e.description)
                .execute(&mut **tx)
                .await?
        }
    };

    LookupId::try_from(result.last_insert_id())
        .map_err(|_| PetsocialError::internal("Inserted ID out of range"))
}

async fn update(tx: &mut Transaction<'_, MySql>, entity: &LookupEntity) -> PetsocialResult<()> {
    // MySQL reports zero affected rows for a no-op update, so existence is
    // checked explicitly under a row lock.
    let sql = format!("SELECT id FROM {} WHERE id = ? FOR UPDATE", table_name(entity.kind()));
    let exists: Option<(i64,)> = sqlx::query_as(&sql)
        .bind(entity.id())
        .fetch_optional(&mut **tx)
        .await?;
    if exists.is_none() {
        return Err(not_found(entity));
    }

    match entity {
        LookupEntity::PetType(e) => {
            sqlx::query("UPDATE pet_types SET name = ?, image_path = ?, sort_order = ? WHERE id = ?")
                .bind(&e.name)
                .bind(&e.image_path)
                .bind(e.sort_order)
                .bind(e.id)
                .execute(&mut **tx)
                .await?;
        }
        LookupEntity::PetBreed(e) => {
            sqlx::query("UPDATE pet_breeds SET pet_type_id = ?, name = ?, sort_order = ? WHERE id = ?")
                .bind(e.pet_type_id.into_inner())
                .bind(&e.name)
                .bind(e.sort_order)
                .bind(e.id)
                .execute(&mut **tx)
                .await?;
        }
        LookupEntity::PetColor(PetColor { id, name, sort_order })
        | LookupEntity::PetFood(PetFood { id, name, sort_order }) => {
            let sql = format!(
                "UPDATE {} SET name = ?, sort_order = ? WHERE id = ?",
                table_name(entity.kind())
            );
            sqlx::query(&sql)
                .bind(name)
                .bind(sort_order)
                .bind(id)
                .execute(&mut **tx)
                .await?;
        }
        LookupEntity::UserType(e) => {
            sqlx::query("UPDATE user_types SET name = ?, image_path = ?, description = ? WHERE id = ?")
                .bind(&e.name)
                .bind(&e.image_path)
                .bind(&e.description)
                .bind(e.id)
                .execute(&mut **tx)
                .await?;
        }
    }
    Ok(())
}

async fn delete(tx: &mut Transaction<'_, MySql>, entity: &LookupEntity) -> PetsocialResult<()> {
    let sql = format!("DELETE FROM {} WHERE id = ?", table_name(entity.kind()));
    let result = sqlx::query(&sql).bind(entity.id()).execute(&mut **tx).await?;
    if result.rows_affected() == 0 {
        return Err(not_found(entity));
    }
    Ok(())
}

#[async_trait]
impl LookupRepository for MySqlLookupRepository {
    async fn list_pet_types(&self) -> PetsocialResult<Vec<PetType>> {
        debug!("Querying pet types");

        let rows = sqlx::query_as::<_, PetTypeRow>(
            "SELECT id, name, image_path, sort_order FROM pet_types ORDER BY sort_order, id",
        )
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(PetType::from).collect())
    }

    async fn list_breeds(&self, pet_type_id: Option<PetTypeId>) -> PetsocialResult<Vec<PetBreed>> {
        debug!("Querying breeds for pet type {:?}", pet_type_id);

        let rows = match pet_type_id {
            Some(id) => {
                sqlx::query_as::<_, PetBreedRow>(
                    r#"
                    SELECT id, pet_type_id, name, sort_order
                    FROM pet_breeds
                    WHERE pet_type_id = ?
                    ORDER BY sort_order, id
                    "#,
                )
                .bind(id.into_inner())
                .fetch_all(self.pool.inner())
                .await?
            }
            None => {
                sqlx::query_as::<_, PetBreedRow>(
                    r#"
                    SELECT id, pet_type_id, name, sort_order
                    FROM pet_breeds
                    ORDER BY pet_type_id, sort_order, id
                    "#,
                )
                .fetch_all(self.pool.inner())
                .await?
            }
        };

        Ok(rows.into_iter().map(PetBreed::from).collect())
    }

    async fn list_colors(&self) -> PetsocialResult<Vec<PetColor>> {
        debug!("Querying colors");

        let rows = sqlx::query_as::<_, NamedRow>(
            "SELECT id, name, sort_order FROM pet_colors ORDER BY sort_order, id",
        )
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| PetColor {
                id: r.id,
                name: r.name,
                sort_order: r.sort_order,
            })
            .collect())
    }

    async fn list_foods(&self) -> PetsocialResult<Vec<PetFood>> {
        debug!("Querying foods");

        let rows = sqlx::query_as::<_, NamedRow>(
            "SELECT id, name, sort_order FROM pet_foods ORDER BY sort_order, id",
        )
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| PetFood {
                id: r.id,
                name: r.name,
                sort_order: r.sort_order,
            })
            .collect())
    }

    async fn list_user_types(&self) -> PetsocialResult<Vec<UserType>> {
        debug!("Querying user types");

        let rows = sqlx::query_as::<_, UserTypeRow>(
            "SELECT id, name, image_path, description FROM user_types ORDER BY id",
        )
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(UserType::from).collect())
    }

    async fn find(&self, kind: LookupKind, id: LookupId) -> PetsocialResult<Option<LookupEntity>> {
        debug!("Finding {} by id: {}", kind, id);

        let pool = self.pool.inner();
        let entity: Option<LookupEntity> = match kind {
            LookupKind::PetType => sqlx::query_as::<_, PetTypeRow>(
                "SELECT id, name, image_path, sort_order FROM pet_types WHERE id = ?",
            )
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(|r| PetType::from(r).into()),
            LookupKind::PetBreed => sqlx::query_as::<_, PetBreedRow>(
                "SELECT id, pet_type_id, name, sort_order FROM pet_breeds WHERE id = ?",
            )
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(|r| PetBreed::from(r).into()),
            LookupKind::PetColor => sqlx::query_as::<_, NamedRow>(
                "SELECT id, name, sort_order FROM pet_colors WHERE id = ?",
            )
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(|r| {
                PetColor {
                    id: r.id,
                    name: r.name,
                    sort_order: r.sort_order,
                }
                .into()
            }),
            LookupKind::PetFood => sqlx::query_as::<_, NamedRow>(
                "SELECT id, name, sort_order FROM pet_foods WHERE id = ?",
            )
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(|r| {
                PetFood {
                    id: r.id,
                    name: r.name,
                    sort_order: r.sort_order,
                }
                .into()
            }),
            LookupKind::UserType => sqlx::query_as::<_, UserTypeRow>(
                "SELECT id, name, image_path, description FROM user_types WHERE id = ?",
            )
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(|r| UserType::from(r).into()),
        };

        Ok(entity)
    }

    async fn name_exists(
        &self,
        kind: LookupKind,
        name: &str,
        partition: Option<PetTypeId>,
        exclude_id: Option<LookupId>,
    ) -> PetsocialResult<bool> {
        let mut sql = format!(
            "SELECT COUNT(*) FROM {} WHERE LOWER(name) = LOWER(?) AND id <> ?",
            table_name(kind)
        );
        if kind == LookupKind::PetBreed && partition.is_some() {
            sql.push_str(" AND pet_type_id = ?");
        }

        let mut query = sqlx::query_scalar::<_, i64>(&sql)
            .bind(name.trim())
            .bind(exclude_id.unwrap_or(0));
        if let (LookupKind::PetBreed, Some(id)) = (kind, partition) {
            query = query.bind(id.into_inner());
        }

        let count = query.fetch_one(self.pool.inner()).await?;
        Ok(count > 0)
    }

    async fn max_sort_order(
        &self,
        kind: LookupKind,
        partition: Option<PetTypeId>,
    ) -> PetsocialResult<Option<i32>> {
        if !kind.is_sorted() {
            return Ok(None);
        }

        let pool = self.pool.inner();
        let max = match (kind, partition) {
            (LookupKind::PetBreed, Some(id)) => {
                sqlx::query_scalar::<_, Option<i32>>(
                    "SELECT MAX(sort_order) FROM pet_breeds WHERE pet_type_id = ?",
                )
                .bind(id.into_inner())
                .fetch_one(pool)
                .await?
            }
            _ => {
                let sql = format!("SELECT MAX(sort_order) FROM {}", table_name(kind));
                sqlx::query_scalar::<_, Option<i32>>(&sql).fetch_one(pool).await?
            }
        };

        Ok(max)
    }

    async fn apply_changes(&self, mut changes: Vec<EntityChange>) -> PetsocialResult<ChangeSet> {
        let mut tx = self.pool.inner().begin().await?;

        for change in &mut changes {
            match change {
                EntityChange::Added { entity } => {
                    let id = insert(&mut tx, entity).await?;
                    entity.set_id(id);
                }
                EntityChange::Modified { current, .. } => update(&mut tx, current).await?,
                EntityChange::Deleted { entity } => delete(&mut tx, entity).await?,
            }
        }

        // Dropping the transaction on an early return above rolls it back.
        tx.commit().await?;
        info!("Committed {} lookup change(s)", changes.len());

        Ok(ChangeSet::from(changes))
    }

    async fn health_check(&self) -> PetsocialResult<()> {
        self.pool.health_check().await
    }
}
