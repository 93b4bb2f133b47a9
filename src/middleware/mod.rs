// src/middleware/mod.rs
// DOCUMENTATION: Request-level concerns shared by all handlers

pub mod auth;

pub use auth::{extract_bearer_token, AuthContext, OptionalAuth};
