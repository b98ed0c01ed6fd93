pub mod auth;
pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /register                                        register (public)
/// /login                                           login (public)
/// /logout                                          logout (public, idempotent)
/// /user                                            current user (auth required)
///
/// /users                                           list (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(users::router())
}
