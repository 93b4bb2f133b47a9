// tests/api.rs
// HTTP-level tests against the in-memory backend

use actix_web::{http::header::AUTHORIZATION, http::StatusCode, test, web, App};
use serde_json::{json, Value};
use uuid::Uuid;

use hbnb::config::Config;
use hbnb::db::Storage;
use hbnb::handlers;
use hbnb::models::{CreateUserRequest, User};
use hbnb::services::{HbnbFacade, TokenService};

const PASSWORD: &str = "password123";

struct Ctx {
    facade: HbnbFacade,
    tokens: TokenService,
    config: Config,
    admin_token: String,
}

impl Ctx {
    async fn new() -> Self {
        let tokens = TokenService::new("integration-secret", 3600);
        let facade = HbnbFacade::new(Storage::in_memory(), tokens.clone(), 4);
        let ctx = Ctx {
            facade,
            tokens,
            config: Config::from_env(),
            admin_token: String::new(),
        };
        let (_, admin_token) = ctx.user("admin@hbnb.test", true).await;
        Ctx { admin_token, ..ctx }
    }

    async fn user(&self, email: &str, is_admin: bool) -> (User, String) {
        let req = CreateUserRequest {
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: email.to_string(),
            password: PASSWORD.to_string(),
            is_admin,
        };
        let user = self.facade.create_user(&req).await.unwrap();
        let token = self.facade.authenticate_user(email, PASSWORD).await.unwrap();
        (user, token)
    }
}

macro_rules! init_app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($ctx.facade.clone()))
                .app_data(web::Data::new($ctx.tokens.clone()))
                .app_data(web::Data::new($ctx.config.clone()))
                .app_data(handlers::json_config())
                .configure(handlers::configure),
        )
        .await
    };
}

fn bearer(token: &str) -> (actix_web::http::header::HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {}", token))
}

fn place_body(price: f64) -> Value {
    json!({
        "title": "Cozy Apartment",
        "description": "Close to everything",
        "price": price,
        "latitude": 37.7749,
        "longitude": -122.4194
    })
}

#[actix_rt::test]
async fn test_register_then_duplicate_email() {
    let ctx = Ctx::new().await;
    let app = init_app!(ctx);
    let body = json!({
        "first_name": "John",
        "last_name": "Doe",
        "email": "john.doe@example.com",
        "password": "password123"
    });

    let req = test::TestRequest::post().uri("/api/v1/users/").set_json(&body).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["email"], "john.doe@example.com");
    assert_eq!(created["is_admin"], false);
    assert!(created.get("password").is_none());
    assert!(created.get("password_hash").is_none());

    let req = test::TestRequest::post().uri("/api/v1/users/").set_json(&body).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err: Value = test::read_body_json(resp).await;
    assert_eq!(err["error"]["message"], "Email already registered");
}

#[actix_rt::test]
async fn test_registration_validation_and_admin_flag() {
    let ctx = Ctx::new().await;
    let app = init_app!(ctx);

    let bad_email = json!({
        "first_name": "John", "last_name": "Doe",
        "email": "not-an-email", "password": "password123"
    });
    let req = test::TestRequest::post().uri("/api/v1/users").set_json(&bad_email).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let missing_field = json!({ "first_name": "John", "email": "jd@example.com" });
    let req = test::TestRequest::post().uri("/api/v1/users/").set_json(&missing_field).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err: Value = test::read_body_json(resp).await;
    assert_eq!(err["error"]["code"], "INVALID_INPUT");

    let wants_admin = json!({
        "first_name": "Eve", "last_name": "Sneaky",
        "email": "eve@example.com", "password": "password123", "is_admin": true
    });
    let req = test::TestRequest::post().uri("/api/v1/users/").set_json(&wants_admin).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/v1/users/")
        .insert_header(bearer(&ctx.admin_token))
        .set_json(&wants_admin)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["is_admin"], true);
}

#[actix_rt::test]
async fn test_login_and_me() {
    let ctx = Ctx::new().await;
    let (user, _) = ctx.user("jane@example.com", false).await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": "jane@example.com", "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let token = body["access_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&token))
        .to_request();
    let me: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(me["id"], user.id.to_string());

    let req = test::TestRequest::post()
        .uri("/api/v1/users/login")
        .set_json(json!({ "email": "jane@example.com", "password": "wrong-password" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_missing_or_bad_token_is_401() {
    let ctx = Ctx::new().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/places/")
        .set_json(place_body(100.0))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/v1/places/")
        .insert_header(bearer("not-a-token"))
        .set_json(place_body(100.0))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_place_price_must_be_positive() {
    let ctx = Ctx::new().await;
    let (_, token) = ctx.user("owner@example.com", false).await;
    let app = init_app!(ctx);

    for price in [0.0, -20.0] {
        let req = test::TestRequest::post()
            .uri("/api/v1/places/")
            .insert_header(bearer(&token))
            .set_json(place_body(price))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    let mut out_of_range = place_body(50.0);
    out_of_range["latitude"] = json!(95.0);
    let req = test::TestRequest::post()
        .uri("/api/v1/places/")
        .insert_header(bearer(&token))
        .set_json(out_of_range)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_place_ownership_and_admin_override() {
    let ctx = Ctx::new().await;
    let (owner, owner_token) = ctx.user("owner@example.com", false).await;
    let (_, other_token) = ctx.user("other@example.com", false).await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/places/")
        .insert_header(bearer(&owner_token))
        .set_json(place_body(100.0))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let place: Value = test::read_body_json(resp).await;
    assert_eq!(place["owner"]["id"], owner.id.to_string());
    let uri = format!("/api/v1/places/{}", place["id"].as_str().unwrap());

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(bearer(&other_token))
        .set_json(json!({ "title": "Hijacked" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(bearer(&ctx.admin_token))
        .set_json(json!({ "title": "Moderated" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = test::read_body_json(resp).await;
    assert_eq!(updated["title"], "Moderated");

    // creating on behalf of someone else needs admin rights
    let mut for_owner = place_body(80.0);
    for_owner["owner_id"] = json!(owner.id);
    let req = test::TestRequest::post()
        .uri("/api/v1/places/")
        .insert_header(bearer(&other_token))
        .set_json(&for_owner)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/v1/places/")
        .insert_header(bearer(&ctx.admin_token))
        .set_json(&for_owner)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
}

#[actix_rt::test]
async fn test_review_rules() {
    let ctx = Ctx::new().await;
    let (owner, owner_token) = ctx.user("owner@example.com", false).await;
    let (guest, guest_token) = ctx.user("guest@example.com", false).await;
    let place = ctx
        .facade
        .create_place(&serde_json::from_value(place_body(120.0)).unwrap(), owner.id)
        .await
        .unwrap();
    let app = init_app!(ctx);
    let review = json!({ "text": "Great stay", "rating": 5, "place_id": place.id });

    let req = test::TestRequest::post()
        .uri("/api/v1/reviews/")
        .insert_header(bearer(&owner_token))
        .set_json(&review)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err: Value = test::read_body_json(resp).await;
    assert_eq!(err["error"]["message"], "You cannot review your own place");

    let req = test::TestRequest::post()
        .uri("/api/v1/reviews/")
        .insert_header(bearer(&guest_token))
        .set_json(&review)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["user"]["id"], guest.id.to_string());
    assert_eq!(created["place"]["title"], "Cozy Apartment");

    let req = test::TestRequest::post()
        .uri("/api/v1/reviews/")
        .insert_header(bearer(&guest_token))
        .set_json(&review)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let bad_rating = json!({ "text": "Meh", "rating": 6, "place_id": place.id });
    let (_, third_token) = ctx.user("third@example.com", false).await;
    let req = test::TestRequest::post()
        .uri("/api/v1/reviews/")
        .insert_header(bearer(&third_token))
        .set_json(&bad_rating)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    // only the author (or an admin) may edit
    let uri = format!("/api/v1/reviews/{}", created["id"].as_str().unwrap());
    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(bearer(&owner_token))
        .set_json(json!({ "rating": 1 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn test_delete_place_cascades_reviews() {
    let ctx = Ctx::new().await;
    let (owner, owner_token) = ctx.user("owner@example.com", false).await;
    let (guest, _) = ctx.user("guest@example.com", false).await;
    let place = ctx
        .facade
        .create_place(&serde_json::from_value(place_body(99.0)).unwrap(), owner.id)
        .await
        .unwrap();
    let review = ctx
        .facade
        .create_review(
            &serde_json::from_value(json!({ "text": "Nice", "rating": 4, "place_id": place.id }))
                .unwrap(),
            guest.id,
        )
        .await
        .unwrap();
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/places/{}/reviews", place.id))
        .to_request();
    let reviews: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(reviews.as_array().unwrap().len(), 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/places/{}", place.id))
        .insert_header(bearer(&owner_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/reviews/{}", review.id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/reviews/places/{}/reviews", place.id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_amenities_admin_only_writes() {
    let ctx = Ctx::new().await;
    let (owner, token) = ctx.user("owner@example.com", false).await;
    let place = ctx
        .facade
        .create_place(&serde_json::from_value(place_body(75.0)).unwrap(), owner.id)
        .await
        .unwrap();
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/amenities/")
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "Sauna" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/v1/amenities/")
        .insert_header(bearer(&ctx.admin_token))
        .set_json(json!({ "name": "Sauna" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let sauna: Value = test::read_body_json(resp).await;
    let sauna_id = sauna["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/v1/amenities/")
        .insert_header(bearer(&ctx.admin_token))
        .set_json(json!({ "name": "Sauna" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    // the place owner links it
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/places/{}/amenities/{}", place.id, sauna_id))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let linked: Value = test::read_body_json(resp).await;
    assert_eq!(linked["amenities"][0]["name"], "Sauna");

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/amenities/{}/places", sauna_id))
        .to_request();
    let places: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(places[0]["id"], place.id.to_string());
}

#[actix_rt::test]
async fn test_unknown_resources_are_404() {
    let ctx = Ctx::new().await;
    let app = init_app!(ctx);

    for uri in [
        format!("/api/v1/users/{}", Uuid::new_v4()),
        format!("/api/v1/places/{}", Uuid::new_v4()),
        format!("/api/v1/reviews/{}", Uuid::new_v4()),
        format!("/api/v1/amenities/{}", Uuid::new_v4()),
        format!("/api/v1/places/{}/reviews", Uuid::new_v4()),
        "/api/v1/places/not-a-uuid".to_string(),
    ] {
        let req = test::TestRequest::get().uri(&uri).to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND,
            "{}",
            uri
        );
    }
}

#[actix_rt::test]
async fn test_user_self_service() {
    let ctx = Ctx::new().await;
    let (jane, jane_token) = ctx.user("jane@example.com", false).await;
    let (bob, _) = ctx.user("bob@example.com", false).await;
    let app = init_app!(ctx);

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/users/{}", jane.id))
        .insert_header(bearer(&jane_token))
        .set_json(json!({ "first_name": "Janet" }))
        .to_request();
    let updated: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(updated["first_name"], "Janet");

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/users/{}", jane.id))
        .insert_header(bearer(&jane_token))
        .set_json(json!({ "is_admin": true }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/users/{}", bob.id))
        .insert_header(bearer(&jane_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/users/{}", bob.id))
        .insert_header(bearer(&ctx.admin_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_root_docs_and_health() {
    let ctx = Ctx::new().await;
    let app = init_app!(ctx);

    for uri in ["/", "/api/v1/"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(resp.headers().get("location").unwrap(), "/api/v1/docs/");
    }

    let req = test::TestRequest::get().uri("/api/v1/docs/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/v1/openapi.json").to_request();
    let doc: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert!(doc["openapi"].as_str().unwrap().starts_with("3."));
    assert!(doc["paths"]["/api/v1/places/{id}"]["put"].is_object());

    let req = test::TestRequest::get().uri("/health").to_request();
    let health: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(health["status"], "ok");
}

#[actix_rt::test]
async fn test_rejected_body_does_not_echo_password() {
    let ctx = Ctx::new().await;
    let app = init_app!(ctx);
    let body = json!({
        "first_name": "John",
        "last_name": "Doe",
        "email": "john@example.com",
        "password": 98765432123u64
    });

    let req = test::TestRequest::post().uri("/api/v1/users/").set_json(&body).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let raw = test::read_body(resp).await;
    let text = String::from_utf8_lossy(&raw);
    assert!(text.contains("INVALID_INPUT"));
    assert!(!text.contains("98765432123"));
}

#[actix_rt::test]
async fn test_self_update_may_restate_admin_flag() {
    let ctx = Ctx::new().await;
    let app = init_app!(ctx);
    let (jane, token) = ctx.user("jane@example.com", false).await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/users/{}", jane.id))
        .insert_header(bearer(&token))
        .set_json(json!({ "first_name": "Janet", "is_admin": false }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = test::read_body_json(resp).await;
    assert_eq!(updated["first_name"], "Janet");
    assert_eq!(updated["is_admin"], false);

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/users/{}", jane.id))
        .insert_header(bearer(&token))
        .set_json(json!({ "is_admin": true }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
}
