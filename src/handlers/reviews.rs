// src/handlers/reviews.rs
// DOCUMENTATION: HTTP handlers for reviews
// PURPOSE: Authors manage their own reviews; admins may act on any

use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;

use crate::errors::{ErrorResponse, HbnbError};
use crate::handlers::places::list_place_reviews;
use crate::handlers::MessageResponse;
use crate::middleware::AuthContext;
use crate::models::{CreateReviewRequest, ReviewResponse, UpdateReviewRequest};
use crate::services::HbnbFacade;

/// GET /reviews
#[utoipa::path(
        get,
        tag = "reviews",
        path = "/api/v1/reviews/",
        responses(
            (status = 200, body = [ReviewResponse]),
        )
    )]
pub async fn list_reviews(facade: web::Data<HbnbFacade>) -> Result<impl Responder, HbnbError> {
    let reviews = facade.get_all_reviews().await?;
    let mut out: Vec<ReviewResponse> = Vec::with_capacity(reviews.len());
    for review in &reviews {
        out.push(facade.review_details(review).await?);
    }
    Ok(HttpResponse::Ok().json(out))
}

/// POST /reviews
/// The caller is the author unless an administrator names another user
#[utoipa::path(
        post,
        tag = "reviews",
        path = "/api/v1/reviews/",
        request_body = CreateReviewRequest,
        responses(
            (status = 201, body = ReviewResponse),
            (status = 400, description = "Invalid fields, own place, duplicate review or unknown place", body = ErrorResponse),
            (status = 401, body = ErrorResponse),
            (status = 403, body = ErrorResponse),
        ),
        security(("bearer_auth" = []))
    )]
pub async fn create_review(
    facade: web::Data<HbnbFacade>,
    auth: AuthContext,
    req: web::Json<CreateReviewRequest>,
) -> Result<impl Responder, HbnbError> {
    let author_id = req.user_id.unwrap_or(auth.user_id);
    if author_id != auth.user_id {
        auth.ensure_admin()?;
    }

    let review = facade.create_review(&req, author_id).await?;
    Ok(HttpResponse::Created().json(facade.review_details(&review).await?))
}

/// GET /reviews/{id}
#[utoipa::path(
        get,
        tag = "reviews",
        path = "/api/v1/reviews/{id}",
        params(("id" = Uuid, Path, description = "Review id")),
        responses(
            (status = 200, body = ReviewResponse),
            (status = 404, body = ErrorResponse),
        )
    )]
pub async fn get_review(
    facade: web::Data<HbnbFacade>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, HbnbError> {
    let review = facade.get_review(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(facade.review_details(&review).await?))
}

/// PUT /reviews/{id}
#[utoipa::path(
        put,
        tag = "reviews",
        path = "/api/v1/reviews/{id}",
        params(("id" = Uuid, Path, description = "Review id")),
        request_body = UpdateReviewRequest,
        responses(
            (status = 200, body = ReviewResponse),
            (status = 400, body = ErrorResponse),
            (status = 401, body = ErrorResponse),
            (status = 403, body = ErrorResponse),
            (status = 404, body = ErrorResponse),
        ),
        security(("bearer_auth" = []))
    )]
pub async fn update_review(
    facade: web::Data<HbnbFacade>,
    auth: AuthContext,
    path: web::Path<Uuid>,
    req: web::Json<UpdateReviewRequest>,
) -> Result<impl Responder, HbnbError> {
    let id = path.into_inner();
    let review = facade.get_review(id).await?;
    auth.ensure_owner_or_admin(review.user_id)?;

    let review = facade.update_review(id, &req).await?;
    Ok(HttpResponse::Ok().json(facade.review_details(&review).await?))
}

/// DELETE /reviews/{id}
#[utoipa::path(
        delete,
        tag = "reviews",
        path = "/api/v1/reviews/{id}",
        params(("id" = Uuid, Path, description = "Review id")),
        responses(
            (status = 200, body = MessageResponse),
            (status = 401, body = ErrorResponse),
            (status = 403, body = ErrorResponse),
            (status = 404, body = ErrorResponse),
        ),
        security(("bearer_auth" = []))
    )]
pub async fn delete_review(
    facade: web::Data<HbnbFacade>,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> Result<impl Responder, HbnbError> {
    let id = path.into_inner();
    let review = facade.get_review(id).await?;
    auth.ensure_owner_or_admin(review.user_id)?;

    facade.delete_review(id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Review deleted successfully")))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reviews")
            .route("", web::get().to(list_reviews))
            .route("/", web::get().to(list_reviews))
            .route("", web::post().to(create_review))
            .route("/", web::post().to(create_review))
            .route("/places/{id}/reviews", web::get().to(list_place_reviews))
            .route("/{id}", web::get().to(get_review))
            .route("/{id}", web::put().to(update_review))
            .route("/{id}", web::delete().to(delete_review)),
    );
}
