// src/db/place_repository.rs
// DOCUMENTATION: Place database operations
// PURPOSE: CRUD on places plus the place_amenity link table

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection};
use uuid::Uuid;

use super::pg::{map_db_error, PgStore};
use super::repository::{PlaceRepository, Repository};
use crate::errors::HbnbError;
use crate::models::Place;

/// Internal struct for mapping database rows to Place struct
/// DOCUMENTATION: Amenity ids are aggregated from place_amenity in the same query
#[derive(Debug, FromRow)]
struct PlaceRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub owner_id: Uuid,
    pub amenity_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PlaceRow {
    fn into_place(self) -> Place {
        Place {
            id: self.id,
            title: self.title,
            description: self.description,
            price: self.price,
            latitude: self.latitude,
            longitude: self.longitude,
            owner_id: self.owner_id,
            amenity_ids: self.amenity_ids,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

const SELECT_PLACE: &str = r#"
    SELECT
        p.id, p.title, p.description, p.price, p.latitude, p.longitude,
        p.owner_id, p.created_at, p.updated_at,
        COALESCE(
            ARRAY_AGG(pa.amenity_id ORDER BY pa.position)
                FILTER (WHERE pa.amenity_id IS NOT NULL),
            '{}'
        ) AS amenity_ids
    FROM places p
    LEFT JOIN place_amenity pa ON pa.place_id = p.id
"#;

const GROUP_AND_ORDER: &str = "GROUP BY p.id ORDER BY p.created_at, p.id";

const DUPLICATE_PLACE: &str = "Place already exists";

/// Rewrite the amenity links of one place, keeping the list order
/// DOCUMENTATION: Runs inside the caller's transaction
async fn replace_links(
    conn: &mut PgConnection,
    place_id: Uuid,
    amenity_ids: &[Uuid],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM place_amenity WHERE place_id = $1")
        .bind(place_id)
        .execute(&mut *conn)
        .await?;

    if !amenity_ids.is_empty() {
        sqlx::query(
            r#"
            INSERT INTO place_amenity (place_id, amenity_id, position)
            SELECT $1, link.amenity_id, link.position
            FROM UNNEST($2::uuid[]) WITH ORDINALITY AS link(amenity_id, position)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(place_id)
        .bind(amenity_ids)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

impl PgStore {
    async fn fetch_places(&self, filter: &str, bind: Option<Uuid>) -> Result<Vec<Place>, HbnbError> {
        let sql = format!("{} {} {}", SELECT_PLACE, filter, GROUP_AND_ORDER);
        let mut query = sqlx::query_as::<_, PlaceRow>(&sql);
        if let Some(id) = bind {
            query = query.bind(id);
        }
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_db_error("Fetch places", DUPLICATE_PLACE, e))?;

        Ok(rows.into_iter().map(PlaceRow::into_place).collect())
    }

    async fn require_place(&self, id: Uuid) -> Result<Place, HbnbError> {
        Repository::<Place>::get(self, id)
            .await?
            .ok_or_else(|| HbnbError::NotFound(format!("Place {} not found", id)))
    }
}

#[async_trait]
impl Repository<Place> for PgStore {
    async fn add(&self, place: Place) -> Result<Place, HbnbError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_db_error("Begin transaction", DUPLICATE_PLACE, e))?;

        sqlx::query(
            r#"
            INSERT INTO places (
                id, title, description, price, latitude, longitude,
                owner_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(place.id)
        .bind(&place.title)
        .bind(&place.description)
        .bind(place.price)
        .bind(place.latitude)
        .bind(place.longitude)
        .bind(place.owner_id)
        .bind(place.created_at)
        .bind(place.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_db_error("Create place", DUPLICATE_PLACE, e))?;

        replace_links(&mut tx, place.id, &place.amenity_ids)
            .await
            .map_err(|e| map_db_error("Link amenities", DUPLICATE_PLACE, e))?;

        tx.commit()
            .await
            .map_err(|e| map_db_error("Commit place", DUPLICATE_PLACE, e))?;

        log::info!("Created place with id: {}", place.id);
        self.require_place(place.id).await
    }

    async fn get(&self, id: Uuid) -> Result<Option<Place>, HbnbError> {
        let sql = format!("{} WHERE p.id = $1 GROUP BY p.id", SELECT_PLACE);
        let row = sqlx::query_as::<_, PlaceRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("Fetch place", DUPLICATE_PLACE, e))?;

        Ok(row.map(PlaceRow::into_place))
    }

    async fn get_all(&self) -> Result<Vec<Place>, HbnbError> {
        self.fetch_places("", None).await
    }

    async fn update(&self, place: Place) -> Result<Place, HbnbError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_db_error("Begin transaction", DUPLICATE_PLACE, e))?;

        let rows = sqlx::query(
            r#"
            UPDATE places
            SET title = $1,
                description = $2,
                price = $3,
                latitude = $4,
                longitude = $5,
                updated_at = $6
            WHERE id = $7
            "#,
        )
        .bind(&place.title)
        .bind(&place.description)
        .bind(place.price)
        .bind(place.latitude)
        .bind(place.longitude)
        .bind(place.updated_at)
        .bind(place.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_db_error("Update place", DUPLICATE_PLACE, e))?
        .rows_affected();

        if rows == 0 {
            return Err(HbnbError::NotFound(format!("Place {} not found", place.id)));
        }

        replace_links(&mut tx, place.id, &place.amenity_ids)
            .await
            .map_err(|e| map_db_error("Link amenities", DUPLICATE_PLACE, e))?;

        tx.commit()
            .await
            .map_err(|e| map_db_error("Commit place", DUPLICATE_PLACE, e))?;

        log::info!("Updated place: {}", place.id);
        self.require_place(place.id).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, HbnbError> {
        let rows = sqlx::query("DELETE FROM places WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error("Delete place", DUPLICATE_PLACE, e))?
            .rows_affected();

        if rows > 0 {
            log::info!("Deleted place: {}", id);
        }
        Ok(rows > 0)
    }
}

#[async_trait]
impl PlaceRepository for PgStore {
    async fn get_by_owner(&self, owner_id: Uuid) -> Result<Vec<Place>, HbnbError> {
        self.fetch_places("WHERE p.owner_id = $1", Some(owner_id)).await
    }

    async fn get_by_amenity(&self, amenity_id: Uuid) -> Result<Vec<Place>, HbnbError> {
        self.fetch_places(
            "WHERE p.id IN (SELECT place_id FROM place_amenity WHERE amenity_id = $1)",
            Some(amenity_id),
        )
        .await
    }
}
