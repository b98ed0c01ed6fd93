//! Authentication and authorization extractors.
//!
//! - [`auth::CurrentIdentity`] -- Resolves the session cookie; never rejects.
//! - [`auth::AuthUser`] -- Requires a live session (401 otherwise).
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role (401, then 403).

pub mod auth;
pub mod rbac;
