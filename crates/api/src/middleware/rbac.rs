//! Role-based access control.
//!
//! [`require_authenticated`] and [`require_role`] are the gate predicates;
//! [`RequireAdmin`] applies them as an extractor. Role checks are exact-match.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use portal_core::error::CoreError;
use portal_core::roles::Role;
use portal_db::models::user::User;

use super::auth::resolve_identity;
use crate::auth::service::Identity;
use crate::error::AppError;
use crate::state::AppState;

/// Fails with `Unauthorized` when the request is anonymous.
pub fn require_authenticated(identity: &Identity) -> Result<&User, CoreError> {
    identity
        .user()
        .ok_or_else(|| CoreError::Unauthorized("Authentication required".into()))
}

/// Fails with `Unauthorized` when anonymous, then `Forbidden` when the
/// user's role is not exactly `role`.
pub fn require_role(identity: &Identity, role: Role) -> Result<&User, CoreError> {
    let user = require_authenticated(identity)?;
    if user.role != role {
        return Err(CoreError::Forbidden(format!(
            "Unauthorized: {role} role required"
        )));
    }
    Ok(user)
}

/// Requires the `admin` role. Rejects with 401 when anonymous and 403 otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub User);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = resolve_identity(parts, state).await;
        let user = require_role(&identity, Role::Admin)?;
        Ok(RequireAdmin(user.clone()))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Utc;

    use super::*;

    fn user_with_role(role: Role) -> Identity {
        Identity::Authenticated(User {
            id: 1,
            username: "someone".into(),
            email: "someone@x.com".into(),
            password_hash: String::new(),
            role,
            first_name: None,
            last_name: None,
            created_at: Utc::now(),
        })
    }

    #[test]
    fn anonymous_is_unauthenticated() {
        assert_matches!(
            require_authenticated(&Identity::Anonymous),
            Err(CoreError::Unauthorized(_))
        );
    }

    #[test]
    fn authenticated_passes() {
        let identity = user_with_role(Role::User);
        assert_eq!(require_authenticated(&identity).unwrap().id, 1);
    }

    #[test]
    fn user_role_is_forbidden_from_admin() {
        assert_matches!(
            require_role(&user_with_role(Role::User), Role::Admin),
            Err(CoreError::Forbidden(_))
        );
    }

    #[test]
    fn admin_role_passes_admin_check() {
        assert!(require_role(&user_with_role(Role::Admin), Role::Admin).is_ok());
    }

    #[test]
    fn roles_are_not_hierarchical() {
        assert_matches!(
            require_role(&user_with_role(Role::Admin), Role::User),
            Err(CoreError::Forbidden(_))
        );
    }

    #[test]
    fn unauthenticated_short_circuits_before_forbidden() {
        assert_matches!(
            require_role(&Identity::Anonymous, Role::Admin),
            Err(CoreError::Unauthorized(_))
        );
    }
}
