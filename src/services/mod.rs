// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod auth;
pub mod facade;
pub mod seed;

pub use auth::{Claims, TokenService};
pub use facade::HbnbFacade;
pub use seed::seed_initial_data;
