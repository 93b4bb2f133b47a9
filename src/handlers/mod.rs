// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Route table for the whole service

use actix_web::{error::JsonPayloadError, http::header::LOCATION, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use serde_json::error::Category;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use crate::errors::HbnbError;

pub mod amenities;
pub mod auth;
pub mod health;
pub mod places;
pub mod reviews;
pub mod swagger;
pub mod users;

pub const DOCS_PATH: &str = "/api/v1/docs/";
pub const OPENAPI_PATH: &str = "/api/v1/openapi.json";

/// Body of successful DELETE responses
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        MessageResponse {
            message: message.to_string(),
        }
    }
}

/// Describe a rejected body without quoting any of it
fn describe_payload_error(err: &JsonPayloadError) -> String {
    match err {
        JsonPayloadError::Deserialize(e) => {
            let problem = match e.classify() {
                Category::Syntax => "malformed JSON",
                Category::Data => "missing field or wrong field type",
                Category::Eof => "unexpected end of input",
                Category::Io => "unreadable body",
            };
            format!(
                "Invalid request body: {} at line {} column {}",
                problem,
                e.line(),
                e.column()
            )
        }
        JsonPayloadError::ContentType => {
            "Invalid request body: expected Content-Type application/json".to_string()
        }
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            "Invalid request body: payload too large".to_string()
        }
        _ => "Invalid request body".to_string(),
    }
}

/// Malformed or incomplete JSON bodies become 400 responses in the usual error shape
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = describe_payload_error(&err);
        log::debug!("Rejected request body: {}", message);
        HbnbError::InvalidInput(message).into()
    })
}

/// GET / and GET /api/v1/
pub async fn docs_redirect() -> impl Responder {
    HttpResponse::Found()
        .insert_header((LOCATION, DOCS_PATH))
        .finish()
}

/// Register every route
/// The Swagger UI goes before the /api/v1 scope, which would otherwise claim its paths
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::config)
        .route("/", web::get().to(docs_redirect))
        .service(
            SwaggerUi::new("/api/v1/docs/{_:.*}")
                .url(OPENAPI_PATH, swagger::ApiDoc::openapi()),
        )
        .service(
            web::scope("/api/v1")
                .route("", web::get().to(docs_redirect))
                .route("/", web::get().to(docs_redirect))
                .configure(auth::config)
                .configure(users::config)
                .configure(places::config)
                .configure(amenities::config)
                .configure(reviews::config),
        );
}
