//! Authentication middleware behavior, exercised over an in-process app.
//! No database required.

mod common;

use actix_web::{test, web, App, HttpResponse};
use picshare_service::middleware::{JwtAuthMiddleware, UserId};
use picshare_service::security::jwt;

async fn whoami(user: UserId) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "id": user.0 }))
}

fn protected_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().service(
        web::scope("/api/v1")
            .wrap(JwtAuthMiddleware)
            .route("/whoami", web::get().to(whoami)),
    )
}

#[actix_web::test]
async fn missing_authorization_header_is_rejected() {
    common::init_keys();
    let app = test::init_service(protected_app()).await;

    let req = test::TestRequest::get().uri("/api/v1/whoami").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn non_bearer_scheme_is_rejected() {
    common::init_keys();
    let app = test::init_service(protected_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/whoami")
        .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn garbage_token_is_rejected() {
    common::init_keys();
    let app = test::init_service(protected_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/whoami")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn refresh_token_cannot_access_protected_routes() {
    common::init_keys();
    let app = test::init_service(protected_app()).await;

    let pair = jwt::generate_token_pair(9, "r@example.com", "ray").unwrap();
    let req = test::TestRequest::get()
        .uri("/api/v1/whoami")
        .insert_header(("Authorization", format!("Bearer {}", pair.refresh_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn valid_access_token_reaches_handler_with_caller_id() {
    common::init_keys();
    let app = test::init_service(protected_app()).await;

    let pair = jwt::generate_token_pair(42, "a@example.com", "alice").unwrap();
    let req = test::TestRequest::get()
        .uri("/api/v1/whoami")
        .insert_header(("Authorization", format!("Bearer {}", pair.access_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], 42);
}
