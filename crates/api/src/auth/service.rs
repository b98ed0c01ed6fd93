//! Authentication service: registration, login, logout and session resolution.
//!
//! [`AuthService`] owns no session state of its own. Sessions live in the
//! store behind [`SessionRepo`]; users behind [`UserRepo`]. Every
//! [`AuthService::resolve`] re-reads the user so role changes apply on the
//! next request.

use portal_core::error::CoreError;
use portal_core::roles::Role;
use portal_core::validation::{validate_email, validate_password, validate_username};
use portal_db::models::session::{CreateSession, Session};
use portal_db::models::user::{CreateUser, User};
use portal_db::repositories::{SessionRepo, UserRepo};
use portal_db::DbPool;
use serde::Deserialize;

use crate::auth::password::{CredentialHasher, PasswordError};
use crate::error::AppResult;

/// Message returned for every failed login, whichever factor was wrong.
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Username of the account seeded at startup.
pub const SEED_ADMIN_USERNAME: &str = "admin";

/// Hashed once at startup and verified against when the username is unknown,
/// so both failure paths pay for one key derivation.
const TIMING_DUMMY_PASSWORD: &str = "timing-equalization-only";

/// Who is making the current request.
#[derive(Debug, Clone)]
pub enum Identity {
    Anonymous,
    Authenticated(User),
}

impl Identity {
    pub fn user(&self) -> Option<&User> {
        match self {
            Identity::Anonymous => None,
            Identity::Authenticated(user) => Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Identity::Authenticated(_))
    }
}

/// Request body for `POST /register`.
///
/// There is no role field: self-registration always yields [`Role::User`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Orchestrates the credential hasher, user directory and session store.
pub struct AuthService {
    pool: DbPool,
    hasher: CredentialHasher,
    session_ttl: chrono::Duration,
    dummy_hash: String,
}

impl AuthService {
    pub fn new(
        pool: DbPool,
        hasher: CredentialHasher,
        session_ttl: chrono::Duration,
    ) -> Result<Self, PasswordError> {
        let dummy_hash = hasher.hash(TIMING_DUMMY_PASSWORD)?;
        Ok(Self {
            pool,
            hasher,
            session_ttl,
            dummy_hash,
        })
    }

    /// Create a new `user`-role account. Does not log the user in.
    pub async fn register(&self, input: RegisterRequest) -> AppResult<User> {
        validate_username(&input.username)?;
        validate_password(&input.password)?;
        validate_email(&input.email)?;

        let username = input.username.trim().to_string();

        // Cheap pre-check so a taken name does not cost a key derivation.
        // The authoritative check happens inside `UserRepo::create`.
        if UserRepo::find_by_username(&self.pool, &username).await.is_some() {
            return Err(portal_db::DbError::DuplicateUsername(username).into());
        }

        let password_hash = self.hash_password(input.password).await?;

        let user = UserRepo::create(
            &self.pool,
            &CreateUser {
                username,
                email: input.email.trim().to_string(),
                password_hash,
                role: Some(Role::User),
                first_name: input.first_name,
                last_name: input.last_name,
            },
        )
        .await?;

        tracing::info!(user_id = user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Verify credentials and open a session.
    ///
    /// Unknown usernames and wrong passwords fail identically.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<(Session, User)> {
        let user = UserRepo::find_by_username(&self.pool, username).await;

        let stored_hash = match &user {
            Some(u) => u.password_hash.clone(),
            None => self.dummy_hash.clone(),
        };
        let password_valid = self.verify_password(password.to_string(), stored_hash).await?;

        let user = match user {
            Some(user) if password_valid => user,
            _ => {
                tracing::info!(username = %username, "Login failed");
                return Err(CoreError::Unauthorized(INVALID_CREDENTIALS.into()).into());
            }
        };

        let session = SessionRepo::create(
            &self.pool,
            &CreateSession {
                user_id: user.id,
                ttl: self.session_ttl,
            },
        )
        .await;

        tracing::info!(user_id = user.id, "Login succeeded");
        Ok((session, user))
    }

    /// Resolve a session id to the user it belongs to.
    ///
    /// Missing, unknown and expired sessions, and sessions whose user no
    /// longer exists, all resolve to [`Identity::Anonymous`].
    pub async fn resolve(&self, session_id: Option<&str>) -> Identity {
        let Some(session_id) = session_id else {
            return Identity::Anonymous;
        };
        let Some(session) = SessionRepo::find_active(&self.pool, session_id).await else {
            return Identity::Anonymous;
        };

        match UserRepo::find_by_id(&self.pool, session.user_id).await {
            Some(user) => Identity::Authenticated(user),
            None => {
                tracing::warn!(user_id = session.user_id, "Session refers to a missing user");
                Identity::Anonymous
            }
        }
    }

    /// Destroy a session. Unknown ids are ignored.
    pub async fn logout(&self, session_id: &str) {
        if SessionRepo::destroy(&self.pool, session_id).await {
            tracing::debug!("Session destroyed");
        }
    }

    /// All users in directory order.
    pub async fn list_users(&self) -> Vec<User> {
        UserRepo::list(&self.pool).await
    }

    /// Create the default `admin` account unless that username already exists.
    ///
    /// Returns the created user, or `None` when seeding was skipped.
    pub async fn seed_admin(&self, password: &str) -> AppResult<Option<User>> {
        if UserRepo::find_by_username(&self.pool, SEED_ADMIN_USERNAME)
            .await
            .is_some()
        {
            return Ok(None);
        }

        let password_hash = self.hash_password(password.to_string()).await?;
        let user = UserRepo::create(
            &self.pool,
            &CreateUser {
                username: SEED_ADMIN_USERNAME.to_string(),
                email: "admin@platformnex.com".to_string(),
                password_hash,
                role: Some(Role::Admin),
                first_name: Some("Admin".to_string()),
                last_name: Some("User".to_string()),
            },
        )
        .await?;

        tracing::info!(user_id = user.id, "Seeded admin account");
        Ok(Some(user))
    }

    /// Key derivation is CPU-bound; keep it off the async workers.
    async fn hash_password(&self, password: String) -> AppResult<String> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| CoreError::Internal(format!("Hashing task failed: {e}")))?
            .map_err(|e| CoreError::Internal(format!("Password hashing error: {e}")).into())
    }

    async fn verify_password(&self, password: String, hash: String) -> AppResult<bool> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| CoreError::Internal(format!("Verification task failed: {e}")).into())
    }
}
