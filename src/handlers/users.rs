// src/handlers/users.rs
// DOCUMENTATION: HTTP handlers for user accounts
// PURPOSE: Registration, profile reads and self-service updates

use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;

use crate::errors::{ErrorResponse, HbnbError};
use crate::handlers::auth::login;
use crate::handlers::MessageResponse;
use crate::middleware::{AuthContext, OptionalAuth};
use crate::models::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::services::HbnbFacade;

/// GET /users
#[utoipa::path(
        get,
        tag = "users",
        path = "/api/v1/users/",
        responses(
            (status = 200, body = [UserResponse]),
        )
    )]
pub async fn list_users(facade: web::Data<HbnbFacade>) -> Result<impl Responder, HbnbError> {
    let users: Vec<UserResponse> = facade
        .get_all_users()
        .await?
        .iter()
        .map(|u| u.to_response())
        .collect();
    Ok(HttpResponse::Ok().json(users))
}

/// POST /users
/// Open registration; creating an administrator needs an admin token
#[utoipa::path(
        post,
        tag = "users",
        path = "/api/v1/users/",
        request_body = CreateUserRequest,
        responses(
            (status = 201, body = UserResponse),
            (status = 400, description = "Invalid input or email already registered", body = ErrorResponse),
            (status = 403, description = "is_admin requested without an admin token", body = ErrorResponse),
        )
    )]
pub async fn create_user(
    facade: web::Data<HbnbFacade>,
    auth: OptionalAuth,
    req: web::Json<CreateUserRequest>,
) -> Result<impl Responder, HbnbError> {
    if req.is_admin {
        match auth.0 {
            Some(ctx) => ctx.ensure_admin()?,
            None => {
                return Err(HbnbError::Forbidden(
                    "Admin privileges required".to_string(),
                ))
            }
        }
    }

    let user = facade.create_user(&req).await?;
    Ok(HttpResponse::Created().json(user.to_response()))
}

/// GET /users/{id}
#[utoipa::path(
        get,
        tag = "users",
        path = "/api/v1/users/{id}",
        params(("id" = Uuid, Path, description = "User id")),
        responses(
            (status = 200, body = UserResponse),
            (status = 404, body = ErrorResponse),
        )
    )]
pub async fn get_user(
    facade: web::Data<HbnbFacade>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, HbnbError> {
    let user = facade.get_user(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user.to_response()))
}

/// PUT /users/{id}
/// Users may edit themselves; only an administrator may change `is_admin`
#[utoipa::path(
        put,
        tag = "users",
        path = "/api/v1/users/{id}",
        params(("id" = Uuid, Path, description = "User id")),
        request_body = UpdateUserRequest,
        responses(
            (status = 200, body = UserResponse),
            (status = 400, body = ErrorResponse),
            (status = 401, body = ErrorResponse),
            (status = 403, body = ErrorResponse),
            (status = 404, body = ErrorResponse),
        ),
        security(("bearer_auth" = []))
    )]
pub async fn update_user(
    facade: web::Data<HbnbFacade>,
    auth: AuthContext,
    path: web::Path<Uuid>,
    req: web::Json<UpdateUserRequest>,
) -> Result<impl Responder, HbnbError> {
    let id = path.into_inner();
    let user = facade.get_user(id).await?;
    auth.ensure_owner_or_admin(id)?;
    if req.is_admin.map_or(false, |flag| flag != user.is_admin) {
        auth.ensure_admin()?;
    }

    let user = facade.update_user(id, &req).await?;
    Ok(HttpResponse::Ok().json(user.to_response()))
}

/// DELETE /users/{id}
/// Removes the account along with its places and reviews
#[utoipa::path(
        delete,
        tag = "users",
        path = "/api/v1/users/{id}",
        params(("id" = Uuid, Path, description = "User id")),
        responses(
            (status = 200, body = MessageResponse),
            (status = 401, body = ErrorResponse),
            (status = 403, body = ErrorResponse),
            (status = 404, body = ErrorResponse),
        ),
        security(("bearer_auth" = []))
    )]
pub async fn delete_user(
    facade: web::Data<HbnbFacade>,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> Result<impl Responder, HbnbError> {
    let id = path.into_inner();
    facade.get_user(id).await?;
    auth.ensure_owner_or_admin(id)?;

    facade.delete_user(id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("User deleted successfully")))
}

/// Configuration for user routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("", web::get().to(list_users))
            .route("/", web::get().to(list_users))
            .route("", web::post().to(create_user))
            .route("/", web::post().to(create_user))
            .route("/login", web::post().to(login))
            .route("/{id}", web::get().to(get_user))
            .route("/{id}", web::put().to(update_user))
            .route("/{id}", web::delete().to(delete_user)),
    );
}
