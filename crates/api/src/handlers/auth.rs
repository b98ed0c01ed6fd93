//! Handlers for registration, login, logout and the current user.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderName, StatusCode};
use axum::Json;
use portal_db::models::user::UserResponse;
use serde::Deserialize;

use crate::auth::service::RegisterRequest;
use crate::error::AppResult;
use crate::middleware::auth::{AuthUser, CurrentIdentity};
use crate::state::AppState;

/// A single `Set-Cookie` header to attach to a response.
type SetCookie = [(HeaderName, String); 1];

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /login`.
///
/// Malformed or incomplete bodies are rejected with a 400 `BAD_REQUEST`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/register
///
/// Create a `user`-role account. Returns 201 with the new user; the caller
/// must log in separately.
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let Json(input) = body?;
    let user = state.auth.register(input).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// POST /api/login
///
/// Authenticate with username + password. Sets the session cookie and
/// returns the user.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<(SetCookie, Json<UserResponse>)> {
    let Json(input) = body?;
    let (session, user) = state.auth.login(&input.username, &input.password).await?;
    let cookie = state.config.session.session_cookie(&session.id);
    Ok(([(SET_COOKIE, cookie)], Json(UserResponse::from(&user))))
}

/// POST /api/logout
///
/// Destroy the current session, if any, and clear the cookie. Always 200.
pub async fn logout(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    headers: HeaderMap,
) -> (SetCookie, StatusCode) {
    if let Some(session_id) = state.config.session.session_id_from_headers(&headers) {
        state.auth.logout(&session_id).await;
    }
    if let Some(user) = identity.user() {
        tracing::info!(user_id = user.id, "Logged out");
    }
    ([(SET_COOKIE, state.config.session.clear_cookie())], StatusCode::OK)
}

/// GET /api/user
///
/// The user behind the current session, or 401.
pub async fn current_user(AuthUser(user): AuthUser) -> Json<UserResponse> {
    Json(UserResponse::from(&user))
}
