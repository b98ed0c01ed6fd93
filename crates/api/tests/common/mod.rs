#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use portal_api::auth::password::{CredentialHasher, KdfConfig};
use portal_api::auth::service::AuthService;
use portal_api::auth::session::SessionConfig;
use portal_api::config::ServerConfig;
use portal_api::router::build_app_router;
use portal_api::state::AppState;

/// Password of the seeded `admin` account in every test app.
pub const ADMIN_PASSWORD: &str = "admin123";

/// Cheap KDF parameters so tests do not spend seconds hashing.
pub fn test_kdf() -> KdfConfig {
    KdfConfig {
        memory_kib: 64,
        iterations: 1,
        parallelism: 1,
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        session: SessionConfig::default(),
        kdf: test_kdf(),
        admin_password: ADMIN_PASSWORD.to_string(),
    }
}

/// Build the full application router over a fresh store seeded with the
/// default admin, using `config`.
pub async fn build_test_app_with(config: ServerConfig) -> Router {
    let pool = portal_db::create_pool();
    let hasher = CredentialHasher::new(&config.kdf).unwrap();
    let auth = Arc::new(AuthService::new(pool.clone(), hasher, config.session.ttl).unwrap());
    auth.seed_admin(&config.admin_password).await.unwrap();

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        auth,
    };
    build_app_router(state, &config)
}

/// Build the full application router with [`test_config`].
pub async fn build_test_app() -> Router {
    build_test_app_with(test_config()).await
}

/// Send a request through the router without a TCP listener.
pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_with_cookie(app: &Router, uri: &str, cookie: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_with_cookie(app: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The `name=value` part of the response's `Set-Cookie` header.
pub fn set_cookie_pair(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(SET_COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .next()
        .map(str::to_string)
}

/// Log in through the API and return the cookie pair to send back.
pub async fn login(app: &Router, username: &str, password: &str) -> String {
    let body = serde_json::json!({ "username": username, "password": password });
    let response = post_json(app, "/api/login", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    set_cookie_pair(&response).expect("login must set the session cookie")
}

/// Register through the API and return the created user JSON.
pub async fn register(app: &Router, username: &str, password: &str) -> serde_json::Value {
    let body = serde_json::json!({
        "username": username,
        "password": password,
        "email": format!("{username}@x.com"),
    });
    let response = post_json(app, "/api/register", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await
}
