// src/db/amenity_repository.rs
// DOCUMENTATION: Amenity database operations

use async_trait::async_trait;
use uuid::Uuid;

use super::pg::{map_db_error, PgStore};
use super::repository::{AmenityRepository, Repository};
use crate::errors::HbnbError;
use crate::models::Amenity;

const DUPLICATE_AMENITY: &str = "Amenity already exists";

#[async_trait]
impl Repository<Amenity> for PgStore {
    async fn add(&self, amenity: Amenity) -> Result<Amenity, HbnbError> {
        let created = sqlx::query_as::<_, Amenity>(
            r#"
            INSERT INTO amenities (id, name, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(amenity.id)
        .bind(&amenity.name)
        .bind(amenity.created_at)
        .bind(amenity.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error("Create amenity", DUPLICATE_AMENITY, e))?;

        log::info!("Created amenity '{}'", created.name);
        Ok(created)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Amenity>, HbnbError> {
        sqlx::query_as::<_, Amenity>(
            "SELECT id, name, created_at, updated_at FROM amenities WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("Fetch amenity", DUPLICATE_AMENITY, e))
    }

    async fn get_all(&self) -> Result<Vec<Amenity>, HbnbError> {
        sqlx::query_as::<_, Amenity>(
            "SELECT id, name, created_at, updated_at FROM amenities ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("List amenities", DUPLICATE_AMENITY, e))
    }

    async fn update(&self, amenity: Amenity) -> Result<Amenity, HbnbError> {
        sqlx::query_as::<_, Amenity>(
            r#"
            UPDATE amenities
            SET name = $1, updated_at = $2
            WHERE id = $3
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(&amenity.name)
        .bind(amenity.updated_at)
        .bind(amenity.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("Update amenity", DUPLICATE_AMENITY, e))?
        .ok_or_else(|| HbnbError::NotFound(format!("Amenity {} not found", amenity.id)))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, HbnbError> {
        let rows = sqlx::query("DELETE FROM amenities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error("Delete amenity", DUPLICATE_AMENITY, e))?
            .rows_affected();

        Ok(rows > 0)
    }
}

#[async_trait]
impl AmenityRepository for PgStore {
    async fn get_by_name(&self, name: &str) -> Result<Option<Amenity>, HbnbError> {
        sqlx::query_as::<_, Amenity>(
            "SELECT id, name, created_at, updated_at FROM amenities WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("Fetch amenity by name", DUPLICATE_AMENITY, e))
    }
}
