// src/services/facade.rs
// DOCUMENTATION: Business logic for users, places, reviews and amenities
// PURPOSE: Single entry point between handlers and the repositories

use uuid::Uuid;

use crate::db::Storage;
use crate::errors::HbnbError;
use crate::models::{
    Amenity, AmenityRequest, CreatePlaceRequest, CreateReviewRequest, CreateUserRequest, Place,
    PlaceResponse, Review, ReviewResponse, UpdatePlaceRequest, UpdateReviewRequest,
    UpdateUserRequest, User,
};
use crate::services::TokenService;

/// Coordinates the repositories and enforces cross-entity rules
/// DOCUMENTATION: Referential checks (owner, amenities, place, author) live here;
/// per-field validation lives on the models
#[derive(Clone)]
pub struct HbnbFacade {
    storage: Storage,
    tokens: TokenService,
    bcrypt_cost: u32,
}

impl HbnbFacade {
    pub fn new(storage: Storage, tokens: TokenService, bcrypt_cost: u32) -> Self {
        Self {
            storage,
            tokens,
            bcrypt_cost,
        }
    }

    // ---- auth ----

    /// Exchange credentials for an access token
    pub async fn authenticate_user(&self, email: &str, password: &str) -> Result<String, HbnbError> {
        let user = self.storage.users.get_by_email(email).await?;
        match user {
            Some(user) if user.verify_password(password) => {
                log::info!("User {} logged in", user.id);
                self.tokens.issue(&user)
            }
            _ => {
                log::warn!("Failed login attempt for {}", email);
                Err(HbnbError::Unauthorized("Invalid credentials".to_string()))
            }
        }
    }

    // ---- users ----

    pub async fn create_user(&self, req: &CreateUserRequest) -> Result<User, HbnbError> {
        User::check_request(req)?;
        if self.storage.users.get_by_email(&req.email).await?.is_some() {
            return Err(HbnbError::AlreadyExists("Email already registered".to_string()));
        }
        let user = self.storage.users.add(User::new(req, self.bcrypt_cost)?).await?;
        log::info!("Registered user {}", user.id);
        Ok(user)
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User, HbnbError> {
        self.storage
            .users
            .get(id)
            .await?
            .ok_or_else(|| HbnbError::NotFound("User not found".to_string()))
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, HbnbError> {
        self.storage.users.get_by_email(email).await
    }

    pub async fn get_all_users(&self) -> Result<Vec<User>, HbnbError> {
        self.storage.users.get_all().await
    }

    /// An email change must not collide with another account
    pub async fn update_user(&self, id: Uuid, req: &UpdateUserRequest) -> Result<User, HbnbError> {
        let mut user = self.get_user(id).await?;
        if let Some(email) = &req.email {
            if let Some(other) = self.storage.users.get_by_email(email).await? {
                if other.id != id {
                    return Err(HbnbError::AlreadyExists("Email already registered".to_string()));
                }
            }
        }
        user.apply_update(req, self.bcrypt_cost)?;
        self.storage.users.update(user).await
    }

    /// Also removes the user's places and every review touching them
    pub async fn delete_user(&self, id: Uuid) -> Result<(), HbnbError> {
        if !self.storage.users.delete(id).await? {
            return Err(HbnbError::NotFound("User not found".to_string()));
        }
        log::info!("Deleted user {}", id);
        Ok(())
    }

    // ---- places ----

    async fn check_amenities_exist(&self, amenity_ids: &[Uuid]) -> Result<(), HbnbError> {
        for amenity_id in amenity_ids {
            if self.storage.amenities.get(*amenity_id).await?.is_none() {
                return Err(HbnbError::InvalidInput(format!(
                    "Amenity {} not found",
                    amenity_id
                )));
            }
        }
        Ok(())
    }

    pub async fn create_place(
        &self,
        req: &CreatePlaceRequest,
        owner_id: Uuid,
    ) -> Result<Place, HbnbError> {
        let place = Place::new(req, owner_id)?;
        if self.storage.users.get(owner_id).await?.is_none() {
            return Err(HbnbError::InvalidInput("Owner not found".to_string()));
        }
        self.check_amenities_exist(&place.amenity_ids).await?;

        let place = self.storage.places.add(place).await?;
        log::info!("Created place {} for owner {}", place.id, owner_id);
        Ok(place)
    }

    pub async fn get_place(&self, id: Uuid) -> Result<Place, HbnbError> {
        self.storage
            .places
            .get(id)
            .await?
            .ok_or_else(|| HbnbError::NotFound("Place not found".to_string()))
    }

    pub async fn get_all_places(&self) -> Result<Vec<Place>, HbnbError> {
        self.storage.places.get_all().await
    }

    pub async fn get_places_by_owner(&self, owner_id: Uuid) -> Result<Vec<Place>, HbnbError> {
        self.get_user(owner_id).await?;
        self.storage.places.get_by_owner(owner_id).await
    }

    /// A supplied amenity list replaces the current one
    pub async fn update_place(&self, id: Uuid, req: &UpdatePlaceRequest) -> Result<Place, HbnbError> {
        let mut place = self.get_place(id).await?;
        if let Some(amenities) = &req.amenities {
            self.check_amenities_exist(amenities).await?;
        }
        place.apply_update(req)?;
        self.storage.places.update(place).await
    }

    pub async fn delete_place(&self, id: Uuid) -> Result<(), HbnbError> {
        if !self.storage.places.delete(id).await? {
            return Err(HbnbError::NotFound("Place not found".to_string()));
        }
        log::info!("Deleted place {}", id);
        Ok(())
    }

    /// Linking an already linked amenity is a no-op
    pub async fn add_amenity_to_place(
        &self,
        place_id: Uuid,
        amenity_id: Uuid,
    ) -> Result<Place, HbnbError> {
        let mut place = self.get_place(place_id).await?;
        self.get_amenity(amenity_id).await?;
        if !place.add_amenity(amenity_id) {
            return Ok(place);
        }
        place.updated_at = chrono::Utc::now();
        self.storage.places.update(place).await
    }

    pub async fn remove_amenity_from_place(
        &self,
        place_id: Uuid,
        amenity_id: Uuid,
    ) -> Result<Place, HbnbError> {
        let mut place = self.get_place(place_id).await?;
        if !place.remove_amenity(amenity_id) {
            return Err(HbnbError::NotFound(
                "Amenity is not linked to this place".to_string(),
            ));
        }
        place.updated_at = chrono::Utc::now();
        self.storage.places.update(place).await
    }

    /// Resolve owner, amenities and reviews for the API shape
    pub async fn place_details(&self, place: &Place) -> Result<PlaceResponse, HbnbError> {
        let owner = self.storage.users.get(place.owner_id).await?;

        let mut amenities = Vec::with_capacity(place.amenity_ids.len());
        for amenity_id in &place.amenity_ids {
            if let Some(amenity) = self.storage.amenities.get(*amenity_id).await? {
                amenities.push(amenity.to_response());
            }
        }

        let mut reviews = Vec::new();
        for review in self.storage.reviews.get_by_place(place.id).await? {
            reviews.push(self.review_details(&review).await?);
        }

        Ok(PlaceResponse {
            id: place.id,
            title: place.title.clone(),
            description: place.description.clone(),
            price: place.price,
            latitude: place.latitude,
            longitude: place.longitude,
            owner_id: place.owner_id,
            owner: owner.map(|u| u.to_summary()),
            amenities,
            reviews,
            created_at: place.created_at,
            updated_at: place.updated_at,
        })
    }

    // ---- reviews ----

    /// Owners cannot review their own place; one review per user and place
    pub async fn create_review(
        &self,
        req: &CreateReviewRequest,
        author_id: Uuid,
    ) -> Result<Review, HbnbError> {
        let review = Review::new(req, author_id)?;

        let place = self
            .storage
            .places
            .get(req.place_id)
            .await?
            .ok_or_else(|| HbnbError::InvalidInput("Place not found".to_string()))?;
        if self.storage.users.get(author_id).await?.is_none() {
            return Err(HbnbError::InvalidInput("User not found".to_string()));
        }
        if place.owner_id == author_id {
            return Err(HbnbError::ValidationError(
                "You cannot review your own place".to_string(),
            ));
        }
        if self
            .storage
            .reviews
            .get_by_place_and_user(place.id, author_id)
            .await?
            .is_some()
        {
            return Err(HbnbError::AlreadyExists(
                "You have already reviewed this place".to_string(),
            ));
        }

        let review = self.storage.reviews.add(review).await?;
        log::info!("User {} reviewed place {}", author_id, place.id);
        Ok(review)
    }

    pub async fn get_review(&self, id: Uuid) -> Result<Review, HbnbError> {
        self.storage
            .reviews
            .get(id)
            .await?
            .ok_or_else(|| HbnbError::NotFound("Review not found".to_string()))
    }

    pub async fn get_reviews_by_place(&self, place_id: Uuid) -> Result<Vec<Review>, HbnbError> {
        self.get_place(place_id).await?;
        self.storage.reviews.get_by_place(place_id).await
    }

    pub async fn get_reviews_by_user(&self, user_id: Uuid) -> Result<Vec<Review>, HbnbError> {
        self.get_user(user_id).await?;
        self.storage.reviews.get_by_user(user_id).await
    }

    pub async fn get_all_reviews(&self) -> Result<Vec<Review>, HbnbError> {
        self.storage.reviews.get_all().await
    }

    pub async fn update_review(
        &self,
        id: Uuid,
        req: &UpdateReviewRequest,
    ) -> Result<Review, HbnbError> {
        let mut review = self.get_review(id).await?;
        review.apply_update(req)?;
        self.storage.reviews.update(review).await
    }

    pub async fn delete_review(&self, id: Uuid) -> Result<(), HbnbError> {
        if !self.storage.reviews.delete(id).await? {
            return Err(HbnbError::NotFound("Review not found".to_string()));
        }
        log::info!("Deleted review {}", id);
        Ok(())
    }

    pub async fn review_details(&self, review: &Review) -> Result<ReviewResponse, HbnbError> {
        let mut response = review.to_response();
        response.user = self
            .storage
            .users
            .get(review.user_id)
            .await?
            .map(|u| u.to_summary());
        response.place = self
            .storage
            .places
            .get(review.place_id)
            .await?
            .map(|p| p.to_summary());
        Ok(response)
    }

    // ---- amenities ----

    pub async fn create_amenity(&self, req: &AmenityRequest) -> Result<Amenity, HbnbError> {
        let amenity = Amenity::new(req)?;
        if self.storage.amenities.get_by_name(&amenity.name).await?.is_some() {
            return Err(HbnbError::AlreadyExists(format!(
                "Amenity '{}' already exists",
                amenity.name
            )));
        }
        let amenity = self.storage.amenities.add(amenity).await?;
        log::info!("Created amenity '{}'", amenity.name);
        Ok(amenity)
    }

    pub async fn get_amenity(&self, id: Uuid) -> Result<Amenity, HbnbError> {
        self.storage
            .amenities
            .get(id)
            .await?
            .ok_or_else(|| HbnbError::NotFound("Amenity not found".to_string()))
    }

    pub async fn get_amenity_by_name(&self, name: &str) -> Result<Option<Amenity>, HbnbError> {
        self.storage.amenities.get_by_name(name).await
    }

    pub async fn get_all_amenities(&self) -> Result<Vec<Amenity>, HbnbError> {
        self.storage.amenities.get_all().await
    }

    pub async fn update_amenity(&self, id: Uuid, req: &AmenityRequest) -> Result<Amenity, HbnbError> {
        let mut amenity = self.get_amenity(id).await?;
        if let Some(other) = self.storage.amenities.get_by_name(&req.name).await? {
            if other.id != id {
                return Err(HbnbError::AlreadyExists(format!(
                    "Amenity '{}' already exists",
                    req.name
                )));
            }
        }
        amenity.apply_update(req)?;
        self.storage.amenities.update(amenity).await
    }

    pub async fn get_places_by_amenity(&self, amenity_id: Uuid) -> Result<Vec<Place>, HbnbError> {
        self.get_amenity(amenity_id).await?;
        self.storage.places.get_by_amenity(amenity_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facade() -> HbnbFacade {
        HbnbFacade::new(
            Storage::in_memory(),
            TokenService::new("test-secret", 3600),
            4,
        )
    }

    fn user_req(email: &str) -> CreateUserRequest {
        CreateUserRequest {
            first_name: "Jane".to_string(),
            last_name: "Roe".to_string(),
            email: email.to_string(),
            password: "password123".to_string(),
            is_admin: false,
        }
    }

    fn place_req(price: f64) -> CreatePlaceRequest {
        CreatePlaceRequest {
            title: "Beach House".to_string(),
            description: None,
            price,
            latitude: 25.0,
            longitude: -80.0,
            owner_id: None,
            amenities: Vec::new(),
        }
    }

    fn review_req(place_id: Uuid) -> CreateReviewRequest {
        CreateReviewRequest {
            text: "Wonderful".to_string(),
            rating: 5,
            place_id,
            user_id: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let facade = facade();
        facade.create_user(&user_req("jane@example.com")).await.unwrap();
        let err = facade.create_user(&user_req("jane@example.com")).await.unwrap_err();
        assert!(matches!(err, HbnbError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected_before_hashing() {
        let storage = Storage::in_memory();
        let existing = User::new(&user_req("jane@example.com"), 4).unwrap();
        storage.users.add(existing).await.unwrap();

        // an unusable cost makes any hashing attempt fail with InternalError
        let facade = HbnbFacade::new(storage, TokenService::new("test-secret", 3600), 99);
        let err = facade.create_user(&user_req("jane@example.com")).await.unwrap_err();
        assert!(matches!(err, HbnbError::AlreadyExists(_)));

        let err = facade.create_user(&user_req("other@example.com")).await.unwrap_err();
        assert!(matches!(err, HbnbError::InternalError(_)));
    }

    #[tokio::test]
    async fn test_authenticate() {
        let facade = facade();
        facade.create_user(&user_req("jane@example.com")).await.unwrap();
        assert!(facade.authenticate_user("jane@example.com", "password123").await.is_ok());
        assert!(matches!(
            facade.authenticate_user("jane@example.com", "nope-nope").await,
            Err(HbnbError::Unauthorized(_))
        ));
        assert!(facade.authenticate_user("ghost@example.com", "password123").await.is_err());
    }

    #[tokio::test]
    async fn test_email_change_collision() {
        let facade = facade();
        facade.create_user(&user_req("a@example.com")).await.unwrap();
        let b = facade.create_user(&user_req("b@example.com")).await.unwrap();
        let update = UpdateUserRequest {
            email: Some("a@example.com".to_string()),
            ..Default::default()
        };
        assert!(facade.update_user(b.id, &update).await.is_err());

        let same = UpdateUserRequest {
            email: Some("b@example.com".to_string()),
            last_name: Some("Smith".to_string()),
            ..Default::default()
        };
        let b = facade.update_user(b.id, &same).await.unwrap();
        assert_eq!(b.last_name, "Smith");
    }

    #[tokio::test]
    async fn test_place_requires_existing_owner_and_amenities() {
        let facade = facade();
        let err = facade.create_place(&place_req(100.0), Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, HbnbError::InvalidInput(_)));

        let owner = facade.create_user(&user_req("owner@example.com")).await.unwrap();
        let mut req = place_req(100.0);
        req.amenities = vec![Uuid::new_v4()];
        assert!(facade.create_place(&req, owner.id).await.is_err());

        assert!(matches!(
            facade.create_place(&place_req(0.0), owner.id).await,
            Err(HbnbError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_review_rules() {
        let facade = facade();
        let owner = facade.create_user(&user_req("owner@example.com")).await.unwrap();
        let guest = facade.create_user(&user_req("guest@example.com")).await.unwrap();
        let place = facade.create_place(&place_req(120.0), owner.id).await.unwrap();

        let own = facade.create_review(&review_req(place.id), owner.id).await;
        assert!(matches!(own, Err(HbnbError::ValidationError(_))));

        facade.create_review(&review_req(place.id), guest.id).await.unwrap();
        let again = facade.create_review(&review_req(place.id), guest.id).await;
        assert!(matches!(again, Err(HbnbError::AlreadyExists(_))));

        let unknown = facade.create_review(&review_req(Uuid::new_v4()), guest.id).await;
        assert!(matches!(unknown, Err(HbnbError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_delete_place_removes_reviews() {
        let facade = facade();
        let owner = facade.create_user(&user_req("owner@example.com")).await.unwrap();
        let guest = facade.create_user(&user_req("guest@example.com")).await.unwrap();
        let place = facade.create_place(&place_req(120.0), owner.id).await.unwrap();
        let review = facade.create_review(&review_req(place.id), guest.id).await.unwrap();

        facade.delete_place(place.id).await.unwrap();
        assert!(matches!(
            facade.get_review(review.id).await,
            Err(HbnbError::NotFound(_))
        ));
        assert!(matches!(
            facade.get_reviews_by_place(place.id).await,
            Err(HbnbError::NotFound(_))
        ));
        assert!(facade.get_reviews_by_user(guest.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_amenity_linking_and_details() {
        let facade = facade();
        let owner = facade.create_user(&user_req("owner@example.com")).await.unwrap();
        let guest = facade.create_user(&user_req("guest@example.com")).await.unwrap();
        let pool = facade
            .create_amenity(&AmenityRequest { name: "Pool".to_string() })
            .await
            .unwrap();
        assert!(facade
            .create_amenity(&AmenityRequest { name: "Pool".to_string() })
            .await
            .is_err());

        let place = facade.create_place(&place_req(120.0), owner.id).await.unwrap();
        facade.add_amenity_to_place(place.id, pool.id).await.unwrap();
        let place = facade.add_amenity_to_place(place.id, pool.id).await.unwrap();
        assert_eq!(place.amenity_ids, vec![pool.id]);
        assert_eq!(facade.get_places_by_amenity(pool.id).await.unwrap().len(), 1);

        facade.create_review(&review_req(place.id), guest.id).await.unwrap();
        let details = facade.place_details(&place).await.unwrap();
        assert_eq!(details.owner.unwrap().id, owner.id);
        assert_eq!(details.amenities[0].name, "Pool");
        assert_eq!(details.reviews.len(), 1);
        assert_eq!(details.reviews[0].user.as_ref().unwrap().id, guest.id);

        facade.remove_amenity_from_place(place.id, pool.id).await.unwrap();
        assert!(matches!(
            facade.remove_amenity_from_place(place.id, pool.id).await,
            Err(HbnbError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_place_replaces_amenities() {
        let facade = facade();
        let owner = facade.create_user(&user_req("owner@example.com")).await.unwrap();
        let wifi = facade
            .create_amenity(&AmenityRequest { name: "WiFi".to_string() })
            .await
            .unwrap();
        let gym = facade
            .create_amenity(&AmenityRequest { name: "Gym".to_string() })
            .await
            .unwrap();
        let mut req = place_req(90.0);
        req.amenities = vec![wifi.id];
        let place = facade.create_place(&req, owner.id).await.unwrap();

        let update = UpdatePlaceRequest {
            amenities: Some(vec![gym.id]),
            ..Default::default()
        };
        let place = facade.update_place(place.id, &update).await.unwrap();
        assert_eq!(place.amenity_ids, vec![gym.id]);
        assert_eq!(facade.get_places_by_owner(owner.id).await.unwrap().len(), 1);
        assert!(facade.get_places_by_amenity(wifi.id).await.unwrap().is_empty());

        let bad = UpdatePlaceRequest {
            amenities: Some(vec![Uuid::new_v4()]),
            ..Default::default()
        };
        assert!(facade.update_place(place.id, &bad).await.is_err());
    }

    #[tokio::test]
    async fn test_amenity_rename_collision() {
        let facade = facade();
        facade
            .create_amenity(&AmenityRequest { name: "Crib".to_string() })
            .await
            .unwrap();
        let iron = facade
            .create_amenity(&AmenityRequest { name: "Iron".to_string() })
            .await
            .unwrap();
        let rename = AmenityRequest { name: "Crib".to_string() };
        assert!(facade.update_amenity(iron.id, &rename).await.is_err());
        let rename = AmenityRequest { name: "Steam Iron".to_string() };
        assert_eq!(facade.update_amenity(iron.id, &rename).await.unwrap().name, "Steam Iron");
    }
}
