// src/lib.rs
// DOCUMENTATION: Library root shared by the server binary, the populate tool and integration tests

pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
