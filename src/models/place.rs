// src/models/place.rs
// DOCUMENTATION: Core data structures for places (listings)
// PURPOSE: Defines the entity, request/response DTOs and field invariants

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::{AmenityResponse, ReviewResponse, UserSummary};
use crate::errors::HbnbError;

/// Represents a complete place record
/// DOCUMENTATION: Maps to the places table; amenity links live in place_amenity
#[derive(Debug, Clone, FromRow)]
pub struct Place {
    /// Unique identifier (UUID v4)
    pub id: Uuid,

    /// Listing title, at most 100 characters
    pub title: String,

    /// Free-form description (empty when not provided)
    pub description: String,

    /// Price per night, strictly positive
    pub price: f64,

    /// Geographic coordinates
    pub latitude: f64,
    pub longitude: f64,

    /// User who owns the listing
    pub owner_id: Uuid,

    /// Linked amenities, loaded separately from the join table
    #[sqlx(skip)]
    pub amenity_ids: Vec<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for creating a new place
/// DOCUMENTATION: Data transfer object for POST /places endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePlaceRequest {
    #[validate(length(min = 1, max = 100, message = "title must be between 1 and 100 characters"))]
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    pub price: f64,

    pub latitude: f64,

    pub longitude: f64,

    /// Defaults to the authenticated user
    #[serde(default)]
    pub owner_id: Option<Uuid>,

    /// Amenity ids to link
    #[serde(default, alias = "amenity_ids")]
    pub amenities: Vec<Uuid>,
}

/// Request DTO for updating an existing place
/// DOCUMENTATION: Data transfer object for PUT /places/{id} endpoint
/// All fields are optional - only provided fields are updated
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdatePlaceRequest {
    #[validate(length(min = 1, max = 100, message = "title must be between 1 and 100 characters"))]
    pub title: Option<String>,

    pub description: Option<String>,

    pub price: Option<f64>,

    pub latitude: Option<f64>,

    pub longitude: Option<f64>,

    /// When present, replaces the whole amenity list
    #[serde(default, alias = "amenity_ids")]
    pub amenities: Option<Vec<Uuid>>,
}

/// Response DTO for place endpoints
/// DOCUMENTATION: Place with its owner, amenities and reviews resolved
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlaceResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub owner_id: Uuid,
    pub owner: Option<UserSummary>,
    pub amenities: Vec<AmenityResponse>,
    pub reviews: Vec<ReviewResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Compact place shape nested inside reviews
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlaceSummary {
    pub id: Uuid,
    pub title: String,
}

impl Place {
    /// Build a new place owned by `owner_id`
    /// DOCUMENTATION: Validates title, price and coordinates; duplicate amenity ids collapse
    pub fn new(req: &CreatePlaceRequest, owner_id: Uuid) -> Result<Self, HbnbError> {
        req.validate()?;
        Self::validate_price(req.price)?;
        Self::validate_coordinates(req.latitude, req.longitude)?;

        let now = Utc::now();
        let mut place = Place {
            id: Uuid::new_v4(),
            title: req.title.clone(),
            description: req.description.clone().unwrap_or_default(),
            price: req.price,
            latitude: req.latitude,
            longitude: req.longitude,
            owner_id,
            amenity_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        for amenity_id in &req.amenities {
            place.add_amenity(*amenity_id);
        }
        Ok(place)
    }

    pub fn validate_price(price: f64) -> Result<(), HbnbError> {
        if !price.is_finite() || price <= 0.0 {
            return Err(HbnbError::ValidationError(
                "price must be a positive number".to_string(),
            ));
        }
        Ok(())
    }

    /// Latitude in [-90, 90], longitude in [-180, 180]
    pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), HbnbError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(HbnbError::ValidationError(
                "latitude must be between -90 and 90".to_string(),
            ));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(HbnbError::ValidationError(
                "longitude must be between -180 and 180".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply a partial update
    /// DOCUMENTATION: Changed fields are re-validated before anything is written
    pub fn apply_update(&mut self, req: &UpdatePlaceRequest) -> Result<(), HbnbError> {
        req.validate()?;
        if let Some(price) = req.price {
            Self::validate_price(price)?;
        }
        Self::validate_coordinates(
            req.latitude.unwrap_or(self.latitude),
            req.longitude.unwrap_or(self.longitude),
        )?;

        if let Some(title) = &req.title {
            self.title = title.clone();
        }
        if let Some(description) = &req.description {
            self.description = description.clone();
        }
        if let Some(price) = req.price {
            self.price = price;
        }
        if let Some(latitude) = req.latitude {
            self.latitude = latitude;
        }
        if let Some(longitude) = req.longitude {
            self.longitude = longitude;
        }
        if let Some(amenities) = &req.amenities {
            self.amenity_ids.clear();
            for amenity_id in amenities {
                self.add_amenity(*amenity_id);
            }
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Returns false when the amenity was already linked
    pub fn add_amenity(&mut self, amenity_id: Uuid) -> bool {
        if self.amenity_ids.contains(&amenity_id) {
            return false;
        }
        self.amenity_ids.push(amenity_id);
        true
    }

    /// Returns false when the amenity was not linked
    pub fn remove_amenity(&mut self, amenity_id: Uuid) -> bool {
        let before = self.amenity_ids.len();
        self.amenity_ids.retain(|id| *id != amenity_id);
        before != self.amenity_ids.len()
    }

    pub fn to_summary(&self) -> PlaceSummary {
        PlaceSummary {
            id: self.id,
            title: self.title.clone(),
        }
    }
}
