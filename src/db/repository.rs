// src/db/repository.rs
// DOCUMENTATION: Repository abstraction over the persistence backends
// PURPOSE: Keep business logic independent from where entities are stored

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use super::{MemoryStore, PgStore};
use crate::errors::HbnbError;
use crate::models::{Amenity, Place, Review, User};

/// Generic CRUD contract shared by every entity
/// DOCUMENTATION: Lookups return Option; callers decide whether absence is a 404 or a 400
#[async_trait]
pub trait Repository<T>: Send + Sync {
    /// Persist a new entity; uniqueness violations yield AlreadyExists
    async fn add(&self, item: T) -> Result<T, HbnbError>;

    async fn get(&self, id: Uuid) -> Result<Option<T>, HbnbError>;

    /// All entities, oldest first
    async fn get_all(&self) -> Result<Vec<T>, HbnbError>;

    /// Replace a stored entity with the given value (matched by id)
    async fn update(&self, item: T) -> Result<T, HbnbError>;

    /// Returns false when nothing was stored under `id`
    async fn delete(&self, id: Uuid) -> Result<bool, HbnbError>;
}

#[async_trait]
pub trait UserRepository: Repository<User> {
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, HbnbError>;
}

#[async_trait]
pub trait PlaceRepository: Repository<Place> {
    async fn get_by_owner(&self, owner_id: Uuid) -> Result<Vec<Place>, HbnbError>;

    async fn get_by_amenity(&self, amenity_id: Uuid) -> Result<Vec<Place>, HbnbError>;
}

#[async_trait]
pub trait ReviewRepository: Repository<Review> {
    async fn get_by_place(&self, place_id: Uuid) -> Result<Vec<Review>, HbnbError>;

    async fn get_by_user(&self, user_id: Uuid) -> Result<Vec<Review>, HbnbError>;

    async fn get_by_place_and_user(
        &self,
        place_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Review>, HbnbError>;
}

#[async_trait]
pub trait AmenityRepository: Repository<Amenity> {
    async fn get_by_name(&self, name: &str) -> Result<Option<Amenity>, HbnbError>;
}

/// The four repositories the facade works with
/// DOCUMENTATION: Built once at startup from the configured backend
#[derive(Clone)]
pub struct Storage {
    pub users: Arc<dyn UserRepository>,
    pub places: Arc<dyn PlaceRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub amenities: Arc<dyn AmenityRepository>,
}

impl Storage {
    /// Process-local storage; everything is lost on restart
    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Storage {
            users: store.clone(),
            places: store.clone(),
            reviews: store.clone(),
            amenities: store,
        }
    }

    /// PostgreSQL storage sharing one connection pool
    pub fn postgres(pool: PgPool) -> Self {
        let store = Arc::new(PgStore::new(pool));
        Storage {
            users: store.clone(),
            places: store.clone(),
            reviews: store.clone(),
            amenities: store,
        }
    }
}
