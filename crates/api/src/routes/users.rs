//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// ```text
/// GET /users -> list_users (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/users", get(users::list_users))
}
