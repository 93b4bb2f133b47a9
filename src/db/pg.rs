// src/db/pg.rs
// DOCUMENTATION: PostgreSQL backend shared by the per-entity repository files
// PURPOSE: Own the pool and translate sqlx failures into HbnbError

use sqlx::PgPool;

use crate::errors::HbnbError;

/// PostgreSQL-backed repositories
/// DOCUMENTATION: Cascades are enforced by ON DELETE CASCADE foreign keys
pub struct PgStore {
    pub(crate) pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a sqlx error to the matching HbnbError variant
/// Unique violations carry `duplicate_message` so callers see the same text as the memory backend
pub(crate) fn map_db_error(context: &str, duplicate_message: &str, e: sqlx::Error) -> HbnbError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return HbnbError::AlreadyExists(duplicate_message.to_string());
        }
        if db_err.is_foreign_key_violation() {
            return HbnbError::InvalidInput(format!("{}: referenced entity does not exist", context));
        }
        if db_err.is_check_violation() {
            return HbnbError::ValidationError(format!("{}: value out of range", context));
        }
    }
    log::error!("{} failed: {}", context, e);
    HbnbError::DatabaseError(e.to_string())
}
