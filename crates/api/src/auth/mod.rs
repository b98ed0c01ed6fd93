//! Authentication primitives and orchestration.
//!
//! - [`password`] -- Argon2id credential hashing and constant-time verification.
//! - [`session`] -- Session lifetime config and the session cookie.
//! - [`service`] -- [`service::AuthService`]: register, login, resolve, logout.

pub mod password;
pub mod service;
pub mod session;
