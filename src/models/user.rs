// src/models/user.rs
// DOCUMENTATION: User accounts, credentials and their API shapes
// PURPOSE: Field validation and password hashing for users

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::errors::HbnbError;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

pub const MIN_PASSWORD_LEN: usize = 8;

/// Represents a user record
/// DOCUMENTATION: Maps to the users table; the password is only ever held as a bcrypt hash
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for POST /users
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 50, message = "first_name must be between 1 and 50 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 50, message = "last_name must be between 1 and 50 characters"))]
    pub last_name: String,

    #[validate(length(min = 1, max = 120, message = "email must be between 1 and 120 characters"))]
    pub email: String,

    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,

    /// Only honored when the caller is an administrator
    #[serde(default)]
    pub is_admin: bool,
}

/// Request DTO for PUT /users/{id}
/// All fields are optional - only provided fields are updated
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 50, message = "first_name must be between 1 and 50 characters"))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 50, message = "last_name must be between 1 and 50 characters"))]
    pub last_name: Option<String>,

    #[validate(length(min = 1, max = 120, message = "email must be between 1 and 120 characters"))]
    pub email: Option<String>,

    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: Option<String>,

    pub is_admin: Option<bool>,
}

/// Request DTO for POST /auth/login
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Response DTO for user endpoints (never includes the password hash)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Compact user shape nested inside places and reviews
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl User {
    /// Build a new user from a registration request
    /// DOCUMENTATION: Validates every field, then hashes the password with bcrypt
    pub fn new(req: &CreateUserRequest, bcrypt_cost: u32) -> Result<Self, HbnbError> {
        Self::check_request(req)?;

        let now = Utc::now();
        Ok(User {
            id: Uuid::new_v4(),
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            email: req.email.clone(),
            password_hash: hash_password(&req.password, bcrypt_cost)?,
            is_admin: req.is_admin,
            created_at: now,
            updated_at: now,
        })
    }

    /// Field checks only; no hashing
    pub fn check_request(req: &CreateUserRequest) -> Result<(), HbnbError> {
        req.validate()?;
        Self::validate_email(&req.email)
    }

    pub fn validate_email(email: &str) -> Result<(), HbnbError> {
        if !EMAIL_REGEX.is_match(email) {
            return Err(HbnbError::ValidationError("Invalid email format".to_string()));
        }
        Ok(())
    }

    /// Apply a partial update
    /// DOCUMENTATION: Only supplied fields are validated and written; nothing changes on error
    pub fn apply_update(&mut self, req: &UpdateUserRequest, bcrypt_cost: u32) -> Result<(), HbnbError> {
        req.validate()?;
        if let Some(email) = &req.email {
            Self::validate_email(email)?;
        }
        let password_hash = match &req.password {
            Some(password) => Some(hash_password(password, bcrypt_cost)?),
            None => None,
        };

        if let Some(first_name) = &req.first_name {
            self.first_name = first_name.clone();
        }
        if let Some(last_name) = &req.last_name {
            self.last_name = last_name.clone();
        }
        if let Some(email) = &req.email {
            self.email = email.clone();
        }
        if let Some(hash) = password_hash {
            self.password_hash = hash;
        }
        if let Some(is_admin) = req.is_admin {
            self.is_admin = is_admin;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn verify_password(&self, password: &str) -> bool {
        bcrypt::verify(password, &self.password_hash).unwrap_or(false)
    }

    pub fn to_response(&self) -> UserResponse {
        UserResponse {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            is_admin: self.is_admin,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn to_summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
        }
    }
}

fn hash_password(password: &str, bcrypt_cost: u32) -> Result<String, HbnbError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(HbnbError::ValidationError(
            "password must be at least 8 characters".to_string(),
        ));
    }
    bcrypt::hash(password, bcrypt_cost).map_err(|e| {
        log::error!("Password hashing failed: {}", e);
        HbnbError::InternalError("could not hash password".to_string())
    })
}
