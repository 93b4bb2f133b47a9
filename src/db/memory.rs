// src/db/memory.rs
// DOCUMENTATION: In-memory implementation of every repository
// PURPOSE: Default backend for development and tests; no database required

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::repository::{
    AmenityRepository, PlaceRepository, Repository, ReviewRepository, UserRepository,
};
use crate::errors::HbnbError;
use crate::models::{Amenity, Place, Review, User};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    places: HashMap<Uuid, Place>,
    reviews: HashMap<Uuid, Review>,
    amenities: HashMap<Uuid, Amenity>,
}

/// All four tables behind a single lock so cascades are atomic
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::default())),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn sorted<T, I, K>(items: I, key: K) -> Vec<T>
where
    I: Iterator<Item = T>,
    K: Fn(&T) -> (DateTime<Utc>, Uuid),
{
    let mut items: Vec<T> = items.collect();
    items.sort_by_key(|item| key(item));
    items
}

fn not_found(kind: &str, id: Uuid) -> HbnbError {
    HbnbError::NotFound(format!("{} {} not found", kind, id))
}

// ---- users ----

#[async_trait]
impl Repository<User> for MemoryStore {
    async fn add(&self, user: User) -> Result<User, HbnbError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(HbnbError::AlreadyExists("Email already registered".to_string()));
        }
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get(&self, id: Uuid) -> Result<Option<User>, HbnbError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<User>, HbnbError> {
        let tables = self.tables.read().await;
        Ok(sorted(tables.users.values().cloned(), |u| (u.created_at, u.id)))
    }

    async fn update(&self, user: User) -> Result<User, HbnbError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&user.id) {
            return Err(not_found("User", user.id));
        }
        if tables
            .users
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(HbnbError::AlreadyExists("Email already registered".to_string()));
        }
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    /// Removes the user's places (with their reviews) and every review the user wrote
    async fn delete(&self, id: Uuid) -> Result<bool, HbnbError> {
        let mut tables = self.tables.write().await;
        if tables.users.remove(&id).is_none() {
            return Ok(false);
        }
        let owned: Vec<Uuid> = tables
            .places
            .values()
            .filter(|p| p.owner_id == id)
            .map(|p| p.id)
            .collect();
        for place_id in &owned {
            tables.places.remove(place_id);
        }
        tables
            .reviews
            .retain(|_, r| r.user_id != id && !owned.contains(&r.place_id));
        Ok(true)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, HbnbError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }
}

// ---- places ----

#[async_trait]
impl Repository<Place> for MemoryStore {
    async fn add(&self, place: Place) -> Result<Place, HbnbError> {
        let mut tables = self.tables.write().await;
        if tables.places.contains_key(&place.id) {
            return Err(HbnbError::AlreadyExists(format!("Place {} already exists", place.id)));
        }
        tables.places.insert(place.id, place.clone());
        Ok(place)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Place>, HbnbError> {
        Ok(self.tables.read().await.places.get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Place>, HbnbError> {
        let tables = self.tables.read().await;
        Ok(sorted(tables.places.values().cloned(), |p| (p.created_at, p.id)))
    }

    async fn update(&self, place: Place) -> Result<Place, HbnbError> {
        let mut tables = self.tables.write().await;
        match tables.places.get_mut(&place.id) {
            Some(stored) => {
                *stored = place.clone();
                Ok(place)
            }
            None => Err(not_found("Place", place.id)),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, HbnbError> {
        let mut tables = self.tables.write().await;
        if tables.places.remove(&id).is_none() {
            return Ok(false);
        }
        tables.reviews.retain(|_, r| r.place_id != id);
        Ok(true)
    }
}

#[async_trait]
impl PlaceRepository for MemoryStore {
    async fn get_by_owner(&self, owner_id: Uuid) -> Result<Vec<Place>, HbnbError> {
        let tables = self.tables.read().await;
        Ok(sorted(
            tables.places.values().filter(|p| p.owner_id == owner_id).cloned(),
            |p| (p.created_at, p.id),
        ))
    }

    async fn get_by_amenity(&self, amenity_id: Uuid) -> Result<Vec<Place>, HbnbError> {
        let tables = self.tables.read().await;
        Ok(sorted(
            tables
                .places
                .values()
                .filter(|p| p.amenity_ids.contains(&amenity_id))
                .cloned(),
            |p| (p.created_at, p.id),
        ))
    }
}

// ---- reviews ----

#[async_trait]
impl Repository<Review> for MemoryStore {
    async fn add(&self, review: Review) -> Result<Review, HbnbError> {
        let mut tables = self.tables.write().await;
        if tables
            .reviews
            .values()
            .any(|r| r.place_id == review.place_id && r.user_id == review.user_id)
        {
            return Err(HbnbError::AlreadyExists(
                "You have already reviewed this place".to_string(),
            ));
        }
        tables.reviews.insert(review.id, review.clone());
        Ok(review)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Review>, HbnbError> {
        Ok(self.tables.read().await.reviews.get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Review>, HbnbError> {
        let tables = self.tables.read().await;
        Ok(sorted(tables.reviews.values().cloned(), |r| (r.created_at, r.id)))
    }

    async fn update(&self, review: Review) -> Result<Review, HbnbError> {
        let mut tables = self.tables.write().await;
        match tables.reviews.get_mut(&review.id) {
            Some(stored) => {
                *stored = review.clone();
                Ok(review)
            }
            None => Err(not_found("Review", review.id)),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, HbnbError> {
        Ok(self.tables.write().await.reviews.remove(&id).is_some())
    }
}

#[async_trait]
impl ReviewRepository for MemoryStore {
    async fn get_by_place(&self, place_id: Uuid) -> Result<Vec<Review>, HbnbError> {
        let tables = self.tables.read().await;
        Ok(sorted(
            tables.reviews.values().filter(|r| r.place_id == place_id).cloned(),
            |r| (r.created_at, r.id),
        ))
    }

    async fn get_by_user(&self, user_id: Uuid) -> Result<Vec<Review>, HbnbError> {
        let tables = self.tables.read().await;
        Ok(sorted(
            tables.reviews.values().filter(|r| r.user_id == user_id).cloned(),
            |r| (r.created_at, r.id),
        ))
    }

    async fn get_by_place_and_user(
        &self,
        place_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Review>, HbnbError> {
        let tables = self.tables.read().await;
        Ok(tables
            .reviews
            .values()
            .find(|r| r.place_id == place_id && r.user_id == user_id)
            .cloned())
    }
}

// ---- amenities ----

#[async_trait]
impl Repository<Amenity> for MemoryStore {
    async fn add(&self, amenity: Amenity) -> Result<Amenity, HbnbError> {
        let mut tables = self.tables.write().await;
        if tables.amenities.values().any(|a| a.name == amenity.name) {
            return Err(HbnbError::AlreadyExists(format!(
                "Amenity '{}' already exists",
                amenity.name
            )));
        }
        tables.amenities.insert(amenity.id, amenity.clone());
        Ok(amenity)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Amenity>, HbnbError> {
        Ok(self.tables.read().await.amenities.get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Amenity>, HbnbError> {
        let tables = self.tables.read().await;
        Ok(sorted(tables.amenities.values().cloned(), |a| (a.created_at, a.id)))
    }

    async fn update(&self, amenity: Amenity) -> Result<Amenity, HbnbError> {
        let mut tables = self.tables.write().await;
        if !tables.amenities.contains_key(&amenity.id) {
            return Err(not_found("Amenity", amenity.id));
        }
        if tables
            .amenities
            .values()
            .any(|a| a.id != amenity.id && a.name == amenity.name)
        {
            return Err(HbnbError::AlreadyExists(format!(
                "Amenity '{}' already exists",
                amenity.name
            )));
        }
        tables.amenities.insert(amenity.id, amenity.clone());
        Ok(amenity)
    }

    /// Also unlinks the amenity from every place
    async fn delete(&self, id: Uuid) -> Result<bool, HbnbError> {
        let mut tables = self.tables.write().await;
        if tables.amenities.remove(&id).is_none() {
            return Ok(false);
        }
        for place in tables.places.values_mut() {
            place.remove_amenity(id);
        }
        Ok(true)
    }
}

#[async_trait]
impl AmenityRepository for MemoryStore {
    async fn get_by_name(&self, name: &str) -> Result<Option<Amenity>, HbnbError> {
        let tables = self.tables.read().await;
        Ok(tables.amenities.values().find(|a| a.name == name).cloned())
    }
}
