//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::body::Body;
use axum::http::header::{ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN};
use axum::http::{Request, StatusCode};
use common::{body_json, get, login, send, ADMIN_PASSWORD};

#[tokio::test]
async fn health_check_reports_store_sizes() {
    let app = common::build_test_app().await;

    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["users"], 1);
    assert_eq!(json["sessions"], 0);

    login(&app, "admin", ADMIN_PASSWORD).await;
    let json = body_json(get(&app, "/health").await).await;
    assert_eq!(json["sessions"], 1);
}

#[tokio::test]
async fn request_id_is_propagated() {
    let app = common::build_test_app().await;
    let response = get(&app, "/health").await;
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = common::build_test_app().await;
    let response = get(&app, "/this-route-does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dashboard_origin_may_send_credentials() {
    let mut config = common::test_config();
    config.cors_origins = vec!["http://localhost:5173".to_string(), "bad\norigin".to_string()];
    let app = common::build_test_app_with(config).await;

    let request = Request::builder()
        .uri("/health")
        .header(ORIGIN, "http://localhost:5173")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:5173"
    );
    assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
}
