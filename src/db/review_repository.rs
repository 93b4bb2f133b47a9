// src/db/review_repository.rs
// DOCUMENTATION: Review database operations
// PURPOSE: Handle CRUD operations for place reviews

use async_trait::async_trait;
use uuid::Uuid;

use super::pg::{map_db_error, PgStore};
use super::repository::{Repository, ReviewRepository};
use crate::errors::HbnbError;
use crate::models::Review;

const REVIEW_COLUMNS: &str = "id, text, rating, place_id, user_id, created_at, updated_at";

const DUPLICATE_REVIEW: &str = "You have already reviewed this place";

impl PgStore {
    async fn fetch_reviews(&self, filter: &str, id: Uuid) -> Result<Vec<Review>, HbnbError> {
        let sql = format!(
            "SELECT {} FROM reviews WHERE {} = $1 ORDER BY created_at, id",
            REVIEW_COLUMNS, filter
        );
        sqlx::query_as::<_, Review>(&sql)
            .bind(id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                log::error!("Failed to fetch reviews by {} {}: {}", filter, id, e);
                HbnbError::DatabaseError(format!("Fetch reviews failed: {}", e))
            })
    }
}

#[async_trait]
impl Repository<Review> for PgStore {
    /// DOCUMENTATION: UNIQUE(place_id, user_id) turns a second review into AlreadyExists
    async fn add(&self, review: Review) -> Result<Review, HbnbError> {
        let sql = format!(
            r#"
            INSERT INTO reviews ({cols})
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {cols}
            "#,
            cols = REVIEW_COLUMNS
        );
        let created = sqlx::query_as::<_, Review>(&sql)
            .bind(review.id)
            .bind(&review.text)
            .bind(review.rating)
            .bind(review.place_id)
            .bind(review.user_id)
            .bind(review.created_at)
            .bind(review.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_db_error("Create review", DUPLICATE_REVIEW, e))?;

        log::info!("Created review {} on place {}", created.id, created.place_id);
        Ok(created)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Review>, HbnbError> {
        let sql = format!("SELECT {} FROM reviews WHERE id = $1", REVIEW_COLUMNS);
        sqlx::query_as::<_, Review>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("Fetch review", DUPLICATE_REVIEW, e))
    }

    async fn get_all(&self) -> Result<Vec<Review>, HbnbError> {
        let sql = format!("SELECT {} FROM reviews ORDER BY created_at, id", REVIEW_COLUMNS);
        sqlx::query_as::<_, Review>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_db_error("List reviews", DUPLICATE_REVIEW, e))
    }

    async fn update(&self, review: Review) -> Result<Review, HbnbError> {
        let sql = format!(
            r#"
            UPDATE reviews
            SET text = $1,
                rating = $2,
                updated_at = $3
            WHERE id = $4
            RETURNING {}
            "#,
            REVIEW_COLUMNS
        );
        sqlx::query_as::<_, Review>(&sql)
            .bind(&review.text)
            .bind(review.rating)
            .bind(review.updated_at)
            .bind(review.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("Update review", DUPLICATE_REVIEW, e))?
            .ok_or_else(|| HbnbError::NotFound(format!("Review {} not found", review.id)))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, HbnbError> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error("Delete review", DUPLICATE_REVIEW, e))?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ReviewRepository for PgStore {
    async fn get_by_place(&self, place_id: Uuid) -> Result<Vec<Review>, HbnbError> {
        self.fetch_reviews("place_id", place_id).await
    }

    async fn get_by_user(&self, user_id: Uuid) -> Result<Vec<Review>, HbnbError> {
        self.fetch_reviews("user_id", user_id).await
    }

    async fn get_by_place_and_user(
        &self,
        place_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Review>, HbnbError> {
        let sql = format!(
            "SELECT {} FROM reviews WHERE place_id = $1 AND user_id = $2",
            REVIEW_COLUMNS
        );
        sqlx::query_as::<_, Review>(&sql)
            .bind(place_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("Fetch review by place and user", DUPLICATE_REVIEW, e))
    }
}
