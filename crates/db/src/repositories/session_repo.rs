//! Repository for server-side sessions.
//!
//! Expiry is checked lazily on every read; [`SessionRepo::cleanup_expired`]
//! exists so a background task can bound memory use.

use chrono::{DateTime, Utc};
use rand::RngCore;

use crate::models::session::{CreateSession, Session};
use crate::Store;

/// Random bytes per session id (256 bits).
const SESSION_ID_BYTES: usize = 32;

/// Provides create, lookup and removal operations for sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session for `input.user_id`, returning the created row.
    pub async fn create(store: &Store, input: &CreateSession) -> Session {
        let now = Utc::now();
        let session = Session {
            id: generate_session_id(),
            user_id: input.user_id,
            created_at: now,
            expires_at: now
                .checked_add_signed(input.ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        };

        store
            .sessions
            .write()
            .await
            .insert(session.id.clone(), session.clone());

        session
    }

    /// Find a session that exists and has not expired.
    pub async fn find_active(store: &Store, id: &str) -> Option<Session> {
        let sessions = store.sessions.read().await;
        sessions.get(id).filter(|s| !s.is_expired()).cloned()
    }

    /// Remove a session. Returns `true` if a row was removed; unknown ids are
    /// a no-op.
    pub async fn destroy(store: &Store, id: &str) -> bool {
        store.sessions.write().await.remove(id).is_some()
    }

    /// Delete expired sessions. Returns the count of deleted rows.
    pub async fn cleanup_expired(store: &Store) -> usize {
        let now = Utc::now();
        let mut sessions = store.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired_at(now));
        before - sessions.len()
    }

    /// Number of stored sessions, expired ones included until swept.
    pub async fn count(store: &Store) -> usize {
        store.sessions.read().await.len()
    }
}

/// Hex-encoded id drawn from the thread-local CSPRNG.
fn generate_session_id() -> String {
    let mut bytes = [0u8; SESSION_ID_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
