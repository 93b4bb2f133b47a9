// src/handlers/auth.rs
// DOCUMENTATION: Login and current-user endpoints

use actix_web::{web, HttpResponse, Responder};

use crate::errors::{ErrorResponse, HbnbError};
use crate::middleware::AuthContext;
use crate::models::{LoginRequest, TokenResponse, UserResponse};
use crate::services::HbnbFacade;

/// POST /auth/login (also mounted at /users/login)
#[utoipa::path(
        post,
        tag = "auth",
        path = "/api/v1/auth/login",
        request_body = LoginRequest,
        responses(
            (status = 200, body = TokenResponse),
            (status = 400, body = ErrorResponse),
            (status = 401, description = "Invalid credentials", body = ErrorResponse),
        )
    )]
pub async fn login(
    facade: web::Data<HbnbFacade>,
    req: web::Json<LoginRequest>,
) -> Result<impl Responder, HbnbError> {
    let access_token = facade.authenticate_user(&req.email, &req.password).await?;
    Ok(HttpResponse::Ok().json(TokenResponse { access_token }))
}

/// GET /auth/me
#[utoipa::path(
        get,
        tag = "auth",
        path = "/api/v1/auth/me",
        responses(
            (status = 200, body = UserResponse),
            (status = 401, body = ErrorResponse),
        ),
        security(("bearer_auth" = []))
    )]
pub async fn me(
    facade: web::Data<HbnbFacade>,
    auth: AuthContext,
) -> Result<impl Responder, HbnbError> {
    let user = facade.get_user(auth.user_id).await?;
    Ok(HttpResponse::Ok().json(user.to_response()))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/login", web::post().to(login))
            .route("/me", web::get().to(me)),
    );
}
