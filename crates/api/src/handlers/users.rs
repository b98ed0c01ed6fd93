//! Handlers for the `/users` resource (user management).
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::State;
use axum::Json;
use portal_db::models::user::UserResponse;

use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /api/users
///
/// List every user without password hashes, as a bare JSON array.
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Json<Vec<UserResponse>> {
    let users = state.auth.list_users().await;
    tracing::debug!(admin_id = admin.id, count = users.len(), "Listing users");
    Json(users.iter().map(UserResponse::from).collect())
}
