mod common;
mod support;

use std::sync::Arc;
use std::time::SystemTime;

use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use backend_test_support::problem_details::assert_problem;
use backend_test_support::unique_helpers::unique_code;
use serde_json::{json, Value};
use wordwolf::domain::random::FixedPick;
use wordwolf::middleware::RequestTrace;
use wordwolf::{mint_access_token, routes, AppState, SecurityConfig};

fn bearer(state: &AppState, name: &str) -> (header::HeaderName, String) {
    let token = mint_access_token(&unique_code(), name, SystemTime::now(), &state.security)
        .expect("token mints");
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .wrap(RequestTrace)
                .app_data(web::Data::new($state.clone()))
                .configure(routes::configure),
        )
        .await
    };
}

fn create_body() -> Value {
    json!({
        "title": "Friday night",
        "password": "wolfpack",
        "memberCount": 3,
        "maxTurns": 2,
        "discussionSeconds": 60,
        "finallyReleasing": true
    })
}

#[actix_web::test]
async fn test_health_reports_database() {
    let state = support::in_memory_state(Arc::new(FixedPick(0))).await;
    let app = app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-trace-id"));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
}

#[actix_web::test]
async fn test_health_without_database_is_degraded() {
    let state = AppState::without_db(SecurityConfig::default());
    let app = app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "degraded");
}

#[actix_web::test]
async fn test_missing_bearer_is_a_problem_response() {
    let state = support::in_memory_state(Arc::new(FixedPick(0))).await;
    let app = app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/games/mine").to_request(),
    )
    .await;

    assert_problem(
        resp,
        StatusCode::UNAUTHORIZED,
        "UNAUTHORIZED_MISSING_BEARER",
    )
    .await;
}

#[actix_web::test]
async fn test_tampered_token_is_rejected() {
    let state = support::in_memory_state(Arc::new(FixedPick(0))).await;
    let app = app!(state);
    let (name, value) = bearer(&state, "host");

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/games/mine")
            .insert_header((name, format!("{value}x")))
            .to_request(),
    )
    .await;

    assert_problem(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED_INVALID_JWT").await;
}

#[actix_web::test]
async fn test_unknown_game_is_not_found() {
    let state = support::in_memory_state(Arc::new(FixedPick(0))).await;
    let app = app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/games/zzz-zzz-zzz")
            .insert_header(bearer(&state, "host"))
            .to_request(),
    )
    .await;

    assert_problem(resp, StatusCode::NOT_FOUND, "GAME_NOT_FOUND").await;
}

#[actix_web::test]
async fn test_malformed_body_is_a_bad_request() {
    let state = support::in_memory_state(Arc::new(FixedPick(0))).await;
    let app = app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/games")
            .insert_header(bearer(&state, "host"))
            .set_json(json!({ "title": "missing everything else" }))
            .to_request(),
    )
    .await;

    assert_problem(resp, StatusCode::BAD_REQUEST, "BAD_REQUEST").await;
}

#[actix_web::test]
async fn test_create_join_and_view_over_http() {
    let state = support::in_memory_state(Arc::new(FixedPick(0))).await;
    let app = app!(state);
    let host = bearer(&state, "host");
    let guest = bearer(&state, "guest");

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/games")
            .insert_header(host.clone())
            .set_json(create_body())
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    let name = created["name"].as_str().expect("name returned").to_string();

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/games/mine")
            .insert_header(host.clone())
            .to_request(),
    )
    .await;
    let mine: Value = test::read_body_json(resp).await;
    assert_eq!(mine, json!({ "exists": true, "name": name }));

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/games/{name}/join"))
            .insert_header(guest.clone())
            .set_json(json!({ "password": "wrong-one" }))
            .to_request(),
    )
    .await;
    assert_problem(resp, StatusCode::FORBIDDEN, "WRONG_PASSWORD").await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/games/{name}/join"))
            .insert_header(guest.clone())
            .set_json(json!({ "password": "wolfpack" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/games/{name}/start"))
            .insert_header(guest.clone())
            .to_request(),
    )
    .await;
    assert_problem(resp, StatusCode::CONFLICT, "NOT_ENOUGH_PARTICIPANTS").await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/games/{name}"))
            .insert_header(guest)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let view: Value = test::read_body_json(resp).await;
    assert_eq!(view["opened"], true);
    assert_eq!(view["currentPhase"], "READY");
    assert_eq!(view["participants"].as_array().map(Vec::len), Some(2));
    assert_eq!(view["host"]["name"], "host");
}

#[actix_web::test]
async fn test_outsider_view_is_forbidden() {
    let state = support::in_memory_state(Arc::new(FixedPick(0))).await;
    let app = app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/games")
            .insert_header(bearer(&state, "host"))
            .set_json(create_body())
            .to_request(),
    )
    .await;
    let created: Value = test::read_body_json(resp).await;
    let name = created["name"].as_str().unwrap();

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/games/{name}/cancel"))
            .insert_header(bearer(&state, "stranger"))
            .to_request(),
    )
    .await;
    assert_problem(resp, StatusCode::FORBIDDEN, "NOT_A_MEMBER").await;
}
