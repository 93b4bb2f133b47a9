// src/models/review.rs
// DOCUMENTATION: Review data structures
// PURPOSE: Define review entities and DTOs for API requests/responses

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::{PlaceSummary, UserSummary};
use crate::errors::HbnbError;

/// Review entity from database
/// DOCUMENTATION: One review per (place, user) pair
#[derive(Debug, Clone, FromRow)]
pub struct Review {
    pub id: Uuid,
    pub text: String,
    /// 1 to 5 inclusive
    pub rating: i32,
    pub place_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a new review
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateReviewRequest {
    #[validate(length(min = 1, message = "text must not be empty"))]
    pub text: String,

    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: i32,

    pub place_id: Uuid,

    /// Defaults to the authenticated user
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

/// Request to update a review; place and author never change
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateReviewRequest {
    #[validate(length(min = 1, message = "text must not be empty"))]
    pub text: Option<String>,

    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: Option<i32>,
}

/// Review response with author and place resolved
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub text: String,
    pub rating: i32,
    pub place_id: Uuid,
    pub user_id: Uuid,
    pub user: Option<UserSummary>,
    pub place: Option<PlaceSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    pub fn new(req: &CreateReviewRequest, user_id: Uuid) -> Result<Self, HbnbError> {
        req.validate()?;
        Self::validate_text(&req.text)?;

        let now = Utc::now();
        Ok(Review {
            id: Uuid::new_v4(),
            text: req.text.clone(),
            rating: req.rating,
            place_id: req.place_id,
            user_id,
            created_at: now,
            updated_at: now,
        })
    }

    fn validate_text(text: &str) -> Result<(), HbnbError> {
        if text.trim().is_empty() {
            return Err(HbnbError::ValidationError("text must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn apply_update(&mut self, req: &UpdateReviewRequest) -> Result<(), HbnbError> {
        req.validate()?;
        if let Some(text) = &req.text {
            Self::validate_text(text)?;
            self.text = text.clone();
        }
        if let Some(rating) = req.rating {
            self.rating = rating;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Shape without nested author/place, filled in by the caller when available
    pub fn to_response(&self) -> ReviewResponse {
        ReviewResponse {
            id: self.id,
            text: self.text.clone(),
            rating: self.rating,
            place_id: self.place_id,
            user_id: self.user_id,
            user: None,
            place: None,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
