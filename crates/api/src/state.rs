use std::sync::Arc;

use crate::auth::service::AuthService;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// In-memory user and session store.
    pub pool: portal_db::DbPool,
    /// Server configuration (session cookie settings are read by extractors).
    pub config: Arc<ServerConfig>,
    /// Login, logout, registration and session resolution.
    pub auth: Arc<AuthService>,
}
