// src/handlers/places.rs
// DOCUMENTATION: HTTP handlers for place operations
// PURPOSE: Parse requests, check ownership, call the facade, return responses

use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;

use crate::errors::{ErrorResponse, HbnbError};
use crate::handlers::MessageResponse;
use crate::middleware::AuthContext;
use crate::models::{CreatePlaceRequest, Place, PlaceResponse, ReviewResponse, UpdatePlaceRequest};
use crate::services::HbnbFacade;

pub(crate) async fn details_for(
    facade: &HbnbFacade,
    places: &[Place],
) -> Result<Vec<PlaceResponse>, HbnbError> {
    let mut out = Vec::with_capacity(places.len());
    for place in places {
        out.push(facade.place_details(place).await?);
    }
    Ok(out)
}

/// GET /places
#[utoipa::path(
        get,
        tag = "places",
        path = "/api/v1/places/",
        responses(
            (status = 200, body = [PlaceResponse]),
        )
    )]
pub async fn list_places(facade: web::Data<HbnbFacade>) -> Result<impl Responder, HbnbError> {
    let places = facade.get_all_places().await?;
    Ok(HttpResponse::Ok().json(details_for(&facade, &places).await?))
}

/// POST /places
/// The caller becomes the owner unless an administrator names someone else
#[utoipa::path(
        post,
        tag = "places",
        path = "/api/v1/places/",
        request_body = CreatePlaceRequest,
        responses(
            (status = 201, body = PlaceResponse),
            (status = 400, description = "Invalid fields, unknown owner or amenity", body = ErrorResponse),
            (status = 401, body = ErrorResponse),
            (status = 403, body = ErrorResponse),
        ),
        security(("bearer_auth" = []))
    )]
pub async fn create_place(
    facade: web::Data<HbnbFacade>,
    auth: AuthContext,
    req: web::Json<CreatePlaceRequest>,
) -> Result<impl Responder, HbnbError> {
    let owner_id = req.owner_id.unwrap_or(auth.user_id);
    if owner_id != auth.user_id {
        auth.ensure_admin()?;
    }

    let place = facade.create_place(&req, owner_id).await?;
    Ok(HttpResponse::Created().json(facade.place_details(&place).await?))
}

/// GET /places/{id}
#[utoipa::path(
        get,
        tag = "places",
        path = "/api/v1/places/{id}",
        params(("id" = Uuid, Path, description = "Place id")),
        responses(
            (status = 200, body = PlaceResponse),
            (status = 404, body = ErrorResponse),
        )
    )]
pub async fn get_place(
    facade: web::Data<HbnbFacade>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, HbnbError> {
    let place = facade.get_place(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(facade.place_details(&place).await?))
}

/// PUT /places/{id}
/// Owner or admin; the owner itself cannot be changed
#[utoipa::path(
        put,
        tag = "places",
        path = "/api/v1/places/{id}",
        params(("id" = Uuid, Path, description = "Place id")),
        request_body = UpdatePlaceRequest,
        responses(
            (status = 200, body = PlaceResponse),
            (status = 400, body = ErrorResponse),
            (status = 401, body = ErrorResponse),
            (status = 403, body = ErrorResponse),
            (status = 404, body = ErrorResponse),
        ),
        security(("bearer_auth" = []))
    )]
pub async fn update_place(
    facade: web::Data<HbnbFacade>,
    auth: AuthContext,
    path: web::Path<Uuid>,
    req: web::Json<UpdatePlaceRequest>,
) -> Result<impl Responder, HbnbError> {
    let id = path.into_inner();
    let place = facade.get_place(id).await?;
    auth.ensure_owner_or_admin(place.owner_id)?;

    let place = facade.update_place(id, &req).await?;
    Ok(HttpResponse::Ok().json(facade.place_details(&place).await?))
}

/// DELETE /places/{id}
/// Reviews of the place go with it
#[utoipa::path(
        delete,
        tag = "places",
        path = "/api/v1/places/{id}",
        params(("id" = Uuid, Path, description = "Place id")),
        responses(
            (status = 200, body = MessageResponse),
            (status = 401, body = ErrorResponse),
            (status = 403, body = ErrorResponse),
            (status = 404, body = ErrorResponse),
        ),
        security(("bearer_auth" = []))
    )]
pub async fn delete_place(
    facade: web::Data<HbnbFacade>,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> Result<impl Responder, HbnbError> {
    let id = path.into_inner();
    let place = facade.get_place(id).await?;
    auth.ensure_owner_or_admin(place.owner_id)?;

    facade.delete_place(id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Place deleted successfully")))
}

/// GET /places/{id}/reviews
#[utoipa::path(
        get,
        tag = "places",
        path = "/api/v1/places/{id}/reviews",
        params(("id" = Uuid, Path, description = "Place id")),
        responses(
            (status = 200, body = [ReviewResponse]),
            (status = 404, body = ErrorResponse),
        )
    )]
pub async fn list_place_reviews(
    facade: web::Data<HbnbFacade>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, HbnbError> {
    let reviews = facade.get_reviews_by_place(path.into_inner()).await?;
    let mut out: Vec<ReviewResponse> = Vec::with_capacity(reviews.len());
    for review in &reviews {
        out.push(facade.review_details(review).await?);
    }
    Ok(HttpResponse::Ok().json(out))
}

/// POST /places/{id}/amenities/{amenity_id}
#[utoipa::path(
        post,
        tag = "places",
        path = "/api/v1/places/{id}/amenities/{amenity_id}",
        params(
            ("id" = Uuid, Path, description = "Place id"),
            ("amenity_id" = Uuid, Path, description = "Amenity id"),
        ),
        responses(
            (status = 200, body = PlaceResponse),
            (status = 401, body = ErrorResponse),
            (status = 403, body = ErrorResponse),
            (status = 404, body = ErrorResponse),
        ),
        security(("bearer_auth" = []))
    )]
pub async fn add_place_amenity(
    facade: web::Data<HbnbFacade>,
    auth: AuthContext,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<impl Responder, HbnbError> {
    let (place_id, amenity_id) = path.into_inner();
    let place = facade.get_place(place_id).await?;
    auth.ensure_owner_or_admin(place.owner_id)?;

    let place = facade.add_amenity_to_place(place_id, amenity_id).await?;
    Ok(HttpResponse::Ok().json(facade.place_details(&place).await?))
}

/// DELETE /places/{id}/amenities/{amenity_id}
#[utoipa::path(
        delete,
        tag = "places",
        path = "/api/v1/places/{id}/amenities/{amenity_id}",
        params(
            ("id" = Uuid, Path, description = "Place id"),
            ("amenity_id" = Uuid, Path, description = "Amenity id"),
        ),
        responses(
            (status = 200, body = PlaceResponse),
            (status = 401, body = ErrorResponse),
            (status = 403, body = ErrorResponse),
            (status = 404, description = "Place missing or amenity not linked", body = ErrorResponse),
        ),
        security(("bearer_auth" = []))
    )]
pub async fn remove_place_amenity(
    facade: web::Data<HbnbFacade>,
    auth: AuthContext,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<impl Responder, HbnbError> {
    let (place_id, amenity_id) = path.into_inner();
    let place = facade.get_place(place_id).await?;
    auth.ensure_owner_or_admin(place.owner_id)?;

    let place = facade.remove_amenity_from_place(place_id, amenity_id).await?;
    Ok(HttpResponse::Ok().json(facade.place_details(&place).await?))
}

/// Configuration for place routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/places")
            .route("", web::get().to(list_places))
            .route("/", web::get().to(list_places))
            .route("", web::post().to(create_place))
            .route("/", web::post().to(create_place))
            .route("/{id}", web::get().to(get_place))
            .route("/{id}", web::put().to(update_place))
            .route("/{id}", web::delete().to(delete_place))
            .route("/{id}/reviews", web::get().to(list_place_reviews))
            .route("/{id}/amenities/{amenity_id}", web::post().to(add_place_amenity))
            .route("/{id}/amenities/{amenity_id}", web::delete().to(remove_place_amenity)),
    );
}
