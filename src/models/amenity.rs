// src/models/amenity.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::errors::HbnbError;

/// Facility a place can offer (WiFi, Pool, ...)
#[derive(Debug, Clone, FromRow)]
pub struct Amenity {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for POST and PUT /amenities
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AmenityRequest {
    #[validate(length(min = 1, max = 50, message = "name must be between 1 and 50 characters"))]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AmenityResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Amenity {
    pub fn new(req: &AmenityRequest) -> Result<Self, HbnbError> {
        req.validate()?;
        let now = Utc::now();
        Ok(Amenity {
            id: Uuid::new_v4(),
            name: req.name.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn apply_update(&mut self, req: &AmenityRequest) -> Result<(), HbnbError> {
        req.validate()?;
        self.name = req.name.clone();
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn to_response(&self) -> AmenityResponse {
        AmenityResponse {
            id: self.id,
            name: self.name.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
