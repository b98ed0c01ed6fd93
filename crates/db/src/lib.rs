//! In-memory data store for users and sessions.
//!
//! All state lives in a single [`Store`] that is constructed once at startup
//! and shared through [`DbPool`]. Nothing is persisted: a restart begins
//! with empty tables.

pub mod models;
pub mod repositories;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use portal_core::types::DbId;
use tokio::sync::RwLock;

use crate::models::session::Session;
use crate::models::user::User;

/// Shared handle to the store, cloned into every request's state.
pub type DbPool = Arc<Store>;

/// Errors raised by store mutations.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Username '{0}' is already taken")]
    DuplicateUsername(String),
}

/// User rows keyed by id, plus the id counter.
///
/// Ids come from `next_id` and are never handed out twice, even if a row is
/// later removed.
#[derive(Debug)]
pub(crate) struct UserTable {
    pub(crate) next_id: DbId,
    pub(crate) rows: BTreeMap<DbId, User>,
}

/// Process-wide tables. Each table has its own lock; every mutation happens
/// inside a single write guard.
#[derive(Debug)]
pub struct Store {
    pub(crate) users: RwLock<UserTable>,
    pub(crate) sessions: RwLock<HashMap<String, Session>>,
}

impl Store {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(UserTable {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

/// Create an empty store.
pub fn create_pool() -> DbPool {
    Arc::new(Store::new())
}
