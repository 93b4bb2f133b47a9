// src/handlers/swagger.rs
// DOCUMENTATION: OpenAPI description served through Swagger UI at /api/v1/docs/

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::errors::{ErrorDetail, ErrorResponse};
use crate::handlers::health::HealthResponse;
use crate::handlers::{amenities, auth, health, places, reviews, users, MessageResponse};
use crate::models::{
    AmenityRequest, AmenityResponse, CreatePlaceRequest, CreateReviewRequest, CreateUserRequest,
    LoginRequest, PlaceResponse, PlaceSummary, ReviewResponse, TokenResponse, UpdatePlaceRequest,
    UpdateReviewRequest, UpdateUserRequest, UserResponse, UserSummary,
};

pub const BEARER_AUTH: &str = "bearer_auth";

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                BEARER_AUTH,
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
        modifiers(&SecurityAddon),
        info(
            title = "HBnB API",
            description = "Users, places, reviews and amenities of the HBnB rental service",
        ),
        paths(
            health::health_check,

            auth::login,
            auth::me,

            users::list_users,
            users::create_user,
            users::get_user,
            users::update_user,
            users::delete_user,

            places::list_places,
            places::create_place,
            places::get_place,
            places::update_place,
            places::delete_place,
            places::list_place_reviews,
            places::add_place_amenity,
            places::remove_place_amenity,

            amenities::list_amenities,
            amenities::create_amenity,
            amenities::get_amenity,
            amenities::update_amenity,
            amenities::list_amenity_places,

            reviews::list_reviews,
            reviews::create_review,
            reviews::get_review,
            reviews::update_review,
            reviews::delete_review,
        ),
        components(
            schemas(
                ErrorResponse,
                ErrorDetail,
                MessageResponse,
                HealthResponse,

                LoginRequest,
                TokenResponse,

                CreateUserRequest,
                UpdateUserRequest,
                UserResponse,
                UserSummary,

                CreatePlaceRequest,
                UpdatePlaceRequest,
                PlaceResponse,
                PlaceSummary,

                AmenityRequest,
                AmenityResponse,

                CreateReviewRequest,
                UpdateReviewRequest,
                ReviewResponse,
            ),
        ),
        tags(
            (name = "auth", description = "Login and current user"),
            (name = "users", description = "User accounts"),
            (name = "places", description = "Listings and their amenity links"),
            (name = "amenities", description = "Amenity catalog"),
            (name = "reviews", description = "Reviews of places"),
            (name = "health", description = "Liveness"),
        )
    )]
pub struct ApiDoc;
