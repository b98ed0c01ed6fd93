//! Session lifetime configuration and the session cookie.
//!
//! The session id itself is minted by the session store; this module only
//! decides how long a session lives and how its id travels between client
//! and server.

use std::time::Duration;

use axum::http::header::COOKIE;
use axum::http::HeaderMap;

/// Default session lifetime: 24 hours.
const DEFAULT_TTL_SECS: i64 = 86_400;
/// Default interval between expired-session sweeps: 24 hours.
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 86_400;
/// Default session cookie name.
const DEFAULT_COOKIE_NAME: &str = "portal.sid";

/// Configuration for session lifetime and the session cookie.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Lifetime of a session measured from login.
    pub ttl: chrono::Duration,
    /// How often the background sweep removes expired sessions.
    pub sweep_interval: Duration,
    /// Name of the cookie carrying the session id.
    pub cookie_name: String,
    /// Whether to mark the cookie `Secure` (HTTPS only).
    pub cookie_secure: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl: chrono::Duration::seconds(DEFAULT_TTL_SECS),
            sweep_interval: Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            cookie_secure: false,
        }
    }
}

impl SessionConfig {
    /// Load session configuration from environment variables.
    ///
    /// | Env Var                       | Default      |
    /// |-------------------------------|--------------|
    /// | `SESSION_TTL_SECS`            | `86400`      |
    /// | `SESSION_SWEEP_INTERVAL_SECS` | `86400`      |
    /// | `SESSION_COOKIE_NAME`         | `portal.sid` |
    /// | `SESSION_COOKIE_SECURE`       | `false`      |
    ///
    /// # Panics
    ///
    /// Panics if a numeric value does not parse or is not positive.
    pub fn from_env() -> Self {
        let ttl_secs: i64 = std::env::var("SESSION_TTL_SECS")
            .unwrap_or_else(|_| DEFAULT_TTL_SECS.to_string())
            .parse()
            .expect("SESSION_TTL_SECS must be a valid i64");
        assert!(ttl_secs > 0, "SESSION_TTL_SECS must be positive");

        let sweep_secs: u64 = std::env::var("SESSION_SWEEP_INTERVAL_SECS")
            .unwrap_or_else(|_| DEFAULT_SWEEP_INTERVAL_SECS.to_string())
            .parse()
            .expect("SESSION_SWEEP_INTERVAL_SECS must be a valid u64");
        assert!(sweep_secs > 0, "SESSION_SWEEP_INTERVAL_SECS must be positive");

        let cookie_name =
            std::env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| DEFAULT_COOKIE_NAME.into());

        let cookie_secure = std::env::var("SESSION_COOKIE_SECURE")
            .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "yes"))
            .unwrap_or(false);

        Self {
            ttl: chrono::Duration::seconds(ttl_secs),
            sweep_interval: Duration::from_secs(sweep_secs),
            cookie_name,
            cookie_secure,
        }
    }

    /// `Set-Cookie` value that hands `session_id` to the client.
    pub fn session_cookie(&self, session_id: &str) -> String {
        self.cookie_with_max_age(session_id, self.ttl.num_seconds().max(0))
    }

    /// `Set-Cookie` value that makes the client drop the session cookie.
    pub fn clear_cookie(&self) -> String {
        self.cookie_with_max_age("", 0)
    }

    fn cookie_with_max_age(&self, value: &str, max_age: i64) -> String {
        let mut cookie = format!(
            "{}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}",
            self.cookie_name
        );
        if self.cookie_secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    /// Read the session id from the request's `Cookie` headers, if present.
    pub fn session_id_from_headers(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == self.cookie_name)
            .map(|(_, value)| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}
