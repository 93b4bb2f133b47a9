// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// JSON body returned for every failed request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Stable machine-readable code such as NOT_FOUND
    pub code: String,
    pub message: String,
    /// RFC 3339
    pub timestamp: String,
}

/// Application-specific error types
/// DOCUMENTATION: Every failure in the service is one of these variants
/// Each variant maps to an HTTP status code and a JSON error body
#[derive(Error, Debug)]
pub enum HbnbError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    ValidationError(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl HbnbError {
    fn code(&self) -> &'static str {
        match self {
            HbnbError::NotFound(_) => "NOT_FOUND",
            HbnbError::AlreadyExists(_) => "ALREADY_EXISTS",
            HbnbError::DatabaseError(_) => "DATABASE_ERROR",
            HbnbError::InvalidInput(_) => "INVALID_INPUT",
            HbnbError::ValidationError(_) => "VALIDATION_ERROR",
            HbnbError::Unauthorized(_) => "UNAUTHORIZED",
            HbnbError::Forbidden(_) => "FORBIDDEN",
            HbnbError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

/// Convert HbnbError to HTTP response
/// DOCUMENTATION: Duplicates are reported as 400, like any other rejected input
impl ResponseError for HbnbError {
    fn error_response(&self) -> HttpResponse {
        let body = ErrorResponse {
            error: ErrorDetail {
                code: self.code().to_string(),
                message: self.to_string(),
                timestamp: chrono::Utc::now().to_rfc3339(),
            },
        };

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            HbnbError::NotFound(_) => StatusCode::NOT_FOUND,
            HbnbError::AlreadyExists(_) => StatusCode::BAD_REQUEST,
            HbnbError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            HbnbError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            HbnbError::ValidationError(_) => StatusCode::BAD_REQUEST,
            HbnbError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            HbnbError::Forbidden(_) => StatusCode::FORBIDDEN,
            HbnbError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Flatten derive-validator output into one readable message
/// Only the configured messages are used so submitted values never leak
impl From<ValidationErrors> for HbnbError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();
        messages.sort();
        HbnbError::ValidationError(messages.join("; "))
    }
}
