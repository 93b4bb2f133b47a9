// src/db/mod.rs
// DOCUMENTATION: Database module organization
// PURPOSE: Re-export repository traits and both backends

pub mod amenity_repository;
pub mod memory;
pub mod pg;
pub mod place_repository;
pub mod repository;
pub mod review_repository;
pub mod user_repository;


pub use memory::MemoryStore;
pub use pg::PgStore;
pub use repository::*;
