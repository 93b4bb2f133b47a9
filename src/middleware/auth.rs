// src/middleware/auth.rs
// DOCUMENTATION: Bearer-token request extractors and authorization checks
// PURPOSE: Handlers declare `AuthContext` (required) or `OptionalAuth` in their signature

use actix_web::{dev::Payload, http::header::AUTHORIZATION, web, FromRequest, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::errors::HbnbError;
use crate::services::TokenService;

/// Identity of the caller, taken from a verified access token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub is_admin: bool,
}

impl AuthContext {
    /// Allow the resource owner or any administrator
    pub fn ensure_owner_or_admin(&self, owner_id: Uuid) -> Result<(), HbnbError> {
        if self.is_admin || self.user_id == owner_id {
            return Ok(());
        }
        log::warn!("User {} denied access to resource owned by {}", self.user_id, owner_id);
        Err(HbnbError::Forbidden("Unauthorized action".to_string()))
    }

    pub fn ensure_admin(&self) -> Result<(), HbnbError> {
        if self.is_admin {
            return Ok(());
        }
        log::warn!("User {} denied admin-only action", self.user_id);
        Err(HbnbError::Forbidden("Admin privileges required".to_string()))
    }
}

/// `None` when the request carries no Authorization header.
/// A header with a bad token is still rejected.
#[derive(Debug, Clone, Copy)]
pub struct OptionalAuth(pub Option<AuthContext>);

/// Extracts Bearer token from Authorization header
pub fn extract_bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn authenticate(req: &HttpRequest) -> Result<AuthContext, HbnbError> {
    let tokens = req.app_data::<web::Data<TokenService>>().ok_or_else(|| {
        log::error!("TokenService missing from app data");
        HbnbError::InternalError("authentication is not configured".to_string())
    })?;

    let token = extract_bearer_token(req).ok_or_else(|| {
        HbnbError::Unauthorized("Missing or invalid Authorization header".to_string())
    })?;

    let claims = tokens.verify(&token)?;
    Ok(AuthContext {
        user_id: claims.user_id()?,
        is_admin: claims.is_admin,
    })
}

impl FromRequest for AuthContext {
    type Error = HbnbError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

impl FromRequest for OptionalAuth {
    type Error = HbnbError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        if !req.headers().contains_key(AUTHORIZATION) {
            return ready(Ok(OptionalAuth(None)));
        }
        ready(authenticate(req).map(|ctx| OptionalAuth(Some(ctx))))
    }
}
