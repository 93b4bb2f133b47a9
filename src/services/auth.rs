// src/services/auth.rs
// DOCUMENTATION: Access token issuing and verification
// PURPOSE: HS256 JWTs carrying the user id and admin flag

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::errors::HbnbError;
use crate::models::User;

/// JWT claims
/// DOCUMENTATION: `sub` is the user id; `is_admin` is copied at login time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub is_admin: bool,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, HbnbError> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| HbnbError::Unauthorized("Invalid token subject".to_string()))
    }
}

/// Issues and verifies access tokens
/// DOCUMENTATION: Cheap to clone; shared with the request extractors through app data
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expires_secs: i64,
}

impl TokenService {
    pub fn new(secret: &str, expires_secs: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expires_secs,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.jwt_secret_key, config.jwt_expires_secs)
    }

    /// Create an access token for `user`
    pub fn issue(&self, user: &User) -> Result<String, HbnbError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id.to_string(),
            is_admin: user.is_admin,
            iat: now,
            exp: now + self.expires_secs,
        };
        self.encode(&claims)
    }

    fn encode(&self, claims: &Claims) -> Result<String, HbnbError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(|e| {
            log::error!("Token encoding failed: {}", e);
            HbnbError::InternalError("could not issue token".to_string())
        })
    }

    /// Validate signature and expiry
    pub fn verify(&self, token: &str) -> Result<Claims, HbnbError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                log::debug!("Token rejected: {}", e);
                HbnbError::Unauthorized("Invalid or expired token".to_string())
            })
    }
}
