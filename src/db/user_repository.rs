// src/db/user_repository.rs
// DOCUMENTATION: User database operations
// PURPOSE: CRUD on the users table

use async_trait::async_trait;
use uuid::Uuid;

use super::pg::{map_db_error, PgStore};
use super::repository::{Repository, UserRepository};
use crate::errors::HbnbError;
use crate::models::User;

const USER_COLUMNS: &str =
    "id, first_name, last_name, email, password_hash, is_admin, created_at, updated_at";

const DUPLICATE_EMAIL: &str = "Email already registered";

#[async_trait]
impl Repository<User> for PgStore {
    async fn add(&self, user: User) -> Result<User, HbnbError> {
        let sql = format!(
            r#"
            INSERT INTO users ({cols})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {cols}
            "#,
            cols = USER_COLUMNS
        );
        let created = sqlx::query_as::<_, User>(&sql)
            .bind(user.id)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.is_admin)
            .bind(user.created_at)
            .bind(user.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_db_error("Create user", DUPLICATE_EMAIL, e))?;

        log::info!("Created user with id: {}", created.id);
        Ok(created)
    }

    async fn get(&self, id: Uuid) -> Result<Option<User>, HbnbError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("Fetch user", DUPLICATE_EMAIL, e))
    }

    async fn get_all(&self) -> Result<Vec<User>, HbnbError> {
        let sql = format!("SELECT {} FROM users ORDER BY created_at, id", USER_COLUMNS);
        sqlx::query_as::<_, User>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_db_error("List users", DUPLICATE_EMAIL, e))
    }

    async fn update(&self, user: User) -> Result<User, HbnbError> {
        let sql = format!(
            r#"
            UPDATE users
            SET first_name = $1,
                last_name = $2,
                email = $3,
                password_hash = $4,
                is_admin = $5,
                updated_at = $6
            WHERE id = $7
            RETURNING {}
            "#,
            USER_COLUMNS
        );
        let updated = sqlx::query_as::<_, User>(&sql)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.is_admin)
            .bind(user.updated_at)
            .bind(user.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("Update user", DUPLICATE_EMAIL, e))?
            .ok_or_else(|| HbnbError::NotFound(format!("User {} not found", user.id)))?;

        log::info!("Updated user: {}", updated.id);
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, HbnbError> {
        let rows = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error("Delete user", DUPLICATE_EMAIL, e))?
            .rows_affected();

        if rows > 0 {
            log::info!("Deleted user: {}", id);
        }
        Ok(rows > 0)
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, HbnbError> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("Fetch user by email", DUPLICATE_EMAIL, e))
    }
}
