// src/handlers/amenities.rs
// DOCUMENTATION: HTTP handlers for the amenity catalog
// PURPOSE: Public reads, admin-only writes

use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;

use crate::errors::{ErrorResponse, HbnbError};
use crate::handlers::places::details_for;
use crate::middleware::AuthContext;
use crate::models::{AmenityRequest, AmenityResponse, PlaceResponse};
use crate::services::HbnbFacade;

#[utoipa::path(
        get,
        tag = "amenities",
        path = "/api/v1/amenities/",
        responses(
            (status = 200, body = [AmenityResponse]),
        )
    )]
pub async fn list_amenities(facade: web::Data<HbnbFacade>) -> Result<impl Responder, HbnbError> {
    let amenities: Vec<AmenityResponse> = facade
        .get_all_amenities()
        .await?
        .iter()
        .map(|a| a.to_response())
        .collect();
    Ok(HttpResponse::Ok().json(amenities))
}

#[utoipa::path(
        post,
        tag = "amenities",
        path = "/api/v1/amenities/",
        request_body = AmenityRequest,
        responses(
            (status = 201, body = AmenityResponse),
            (status = 400, description = "Invalid name or name already taken", body = ErrorResponse),
            (status = 401, body = ErrorResponse),
            (status = 403, body = ErrorResponse),
        ),
        security(("bearer_auth" = []))
    )]
pub async fn create_amenity(
    facade: web::Data<HbnbFacade>,
    auth: AuthContext,
    req: web::Json<AmenityRequest>,
) -> Result<impl Responder, HbnbError> {
    auth.ensure_admin()?;
    let amenity = facade.create_amenity(&req).await?;
    Ok(HttpResponse::Created().json(amenity.to_response()))
}

#[utoipa::path(
        get,
        tag = "amenities",
        path = "/api/v1/amenities/{id}",
        params(("id" = Uuid, Path, description = "Amenity id")),
        responses(
            (status = 200, body = AmenityResponse),
            (status = 404, body = ErrorResponse),
        )
    )]
pub async fn get_amenity(
    facade: web::Data<HbnbFacade>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, HbnbError> {
    let amenity = facade.get_amenity(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(amenity.to_response()))
}

#[utoipa::path(
        put,
        tag = "amenities",
        path = "/api/v1/amenities/{id}",
        params(("id" = Uuid, Path, description = "Amenity id")),
        request_body = AmenityRequest,
        responses(
            (status = 200, body = AmenityResponse),
            (status = 400, body = ErrorResponse),
            (status = 401, body = ErrorResponse),
            (status = 403, body = ErrorResponse),
            (status = 404, body = ErrorResponse),
        ),
        security(("bearer_auth" = []))
    )]
pub async fn update_amenity(
    facade: web::Data<HbnbFacade>,
    auth: AuthContext,
    path: web::Path<Uuid>,
    req: web::Json<AmenityRequest>,
) -> Result<impl Responder, HbnbError> {
    auth.ensure_admin()?;
    let amenity = facade.update_amenity(path.into_inner(), &req).await?;
    Ok(HttpResponse::Ok().json(amenity.to_response()))
}

/// GET /amenities/{id}/places
#[utoipa::path(
        get,
        tag = "amenities",
        path = "/api/v1/amenities/{id}/places",
        params(("id" = Uuid, Path, description = "Amenity id")),
        responses(
            (status = 200, body = [PlaceResponse]),
            (status = 404, body = ErrorResponse),
        )
    )]
pub async fn list_amenity_places(
    facade: web::Data<HbnbFacade>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, HbnbError> {
    let places = facade.get_places_by_amenity(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(details_for(&facade, &places).await?))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/amenities")
            .route("", web::get().to(list_amenities))
            .route("/", web::get().to(list_amenities))
            .route("", web::post().to(create_amenity))
            .route("/", web::post().to(create_amenity))
            .route("/{id}", web::get().to(get_amenity))
            .route("/{id}", web::put().to(update_amenity))
            .route("/{id}/places", web::get().to(list_amenity_places)),
    );
}
