//! Session entity model and DTOs.

use chrono::{Duration, Utc};
use portal_core::types::{DbId, Timestamp};

/// Server-side proof that a user completed login.
#[derive(Debug, Clone)]
pub struct Session {
    /// Opaque, unguessable identifier handed to the client.
    pub id: String,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

impl Session {
    /// A session is expired once the current time is strictly past `expires_at`.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now > self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// DTO for creating a new session.
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub user_id: DbId,
    /// Lifetime measured from creation.
    pub ttl: Duration,
}
