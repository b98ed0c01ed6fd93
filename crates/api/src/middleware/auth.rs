//! Session-cookie authentication extractors for Axum handlers.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use portal_db::models::user::User;

use super::rbac::require_authenticated;
use crate::auth::service::Identity;
use crate::error::AppError;
use crate::state::AppState;

/// The resolved [`Identity`] for the request's session cookie.
///
/// Anonymous requests are not rejected; use [`AuthUser`] for that.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Identity);

impl FromRequestParts<AppState> for CurrentIdentity {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(CurrentIdentity(resolve_identity(parts, state).await))
    }
}

/// Resolve the session cookie carried by `parts`.
pub(crate) async fn resolve_identity(parts: &Parts, state: &AppState) -> Identity {
    let session_id = state.config.session.session_id_from_headers(&parts.headers);
    state.auth.resolve(session_id.as_deref()).await
}

/// Authenticated user resolved from the session cookie.
///
/// Use this as an extractor parameter in any handler that requires authentication:
///
/// ```ignore
/// async fn my_handler(AuthUser(user): AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = resolve_identity(parts, state).await;
        let user = require_authenticated(&identity)?;
        Ok(AuthUser(user.clone()))
    }
}
