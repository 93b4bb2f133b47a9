// src/handlers/health.rs
// DOCUMENTATION: Health check handler
// PURPOSE: Liveness probe that also reports which storage backend is active

use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{Config, StorageBackend};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    /// memory or postgres
    pub storage: String,
    pub version: String,
}

#[utoipa::path(
        get,
        tag = "health",
        path = "/health",
        responses(
            (status = 200, body = HealthResponse),
        )
    )]
pub async fn health_check(config: web::Data<Config>) -> impl Responder {
    let storage = match config.storage_backend {
        StorageBackend::Memory => "memory",
        StorageBackend::Postgres => "postgres",
    };
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        service: "hbnb".to_string(),
        storage: storage.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}
