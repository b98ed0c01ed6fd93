//! Repository for the user directory.

use chrono::Utc;
use portal_core::types::DbId;

use crate::models::user::{CreateUser, User};
use crate::{DbError, Store};

/// Provides create and lookup operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created record.
    ///
    /// Fails with [`DbError::DuplicateUsername`] when another user already
    /// holds the same username, compared case-insensitively. The check and
    /// the insert share one write guard.
    pub async fn create(store: &Store, input: &CreateUser) -> Result<User, DbError> {
        let mut table = store.users.write().await;

        let taken = table
            .rows
            .values()
            .any(|u| u.username.to_lowercase() == input.username.to_lowercase());
        if taken {
            return Err(DbError::DuplicateUsername(input.username.clone()));
        }

        let id = table.next_id;
        table.next_id += 1;

        let user = User {
            id,
            username: input.username.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            role: input.role.unwrap_or_default(),
            first_name: input.first_name.clone(),
            last_name: input.last_name.clone(),
            created_at: Utc::now(),
        };
        table.rows.insert(id, user.clone());

        tracing::debug!(user_id = id, username = %user.username, "User created");
        Ok(user)
    }

    /// Find a user by id.
    pub async fn find_by_id(store: &Store, id: DbId) -> Option<User> {
        store.users.read().await.rows.get(&id).cloned()
    }

    /// Find a user by username (case-insensitive).
    pub async fn find_by_username(store: &Store, username: &str) -> Option<User> {
        let needle = username.to_lowercase();
        store
            .users
            .read()
            .await
            .rows
            .values()
            .find(|u| u.username.to_lowercase() == needle)
            .cloned()
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(store: &Store, email: &str) -> Option<User> {
        let needle = email.to_lowercase();
        store
            .users
            .read()
            .await
            .rows
            .values()
            .find(|u| u.email.to_lowercase() == needle)
            .cloned()
    }

    /// List all users ordered by id, which is also insertion order.
    pub async fn list(store: &Store) -> Vec<User> {
        store.users.read().await.rows.values().cloned().collect()
    }

    /// Number of users in the directory.
    pub async fn count(store: &Store) -> usize {
        store.users.read().await.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use portal_core::roles::Role;

    fn new_user(username: &str) -> CreateUser {
        CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "deadbeef.cafebabe".to_string(),
            role: None,
            first_name: None,
            last_name: None,
        }
    }

    #[tokio::test]
    async fn create_assigns_monotonic_ids_and_default_role() {
        let store = Store::new();
        let a = UserRepo::create(&store, &new_user("alice")).await.unwrap();
        let b = UserRepo::create(&store, &new_user("bob")).await.unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(a.role, Role::User);
    }

    #[tokio::test]
    async fn duplicate_username_is_case_insensitive() {
        let store = Store::new();
        UserRepo::create(&store, &new_user("Admin")).await.unwrap();

        let result = UserRepo::create(&store, &new_user("admin")).await;
        assert_matches!(result, Err(DbError::DuplicateUsername(name)) if name == "admin");

        // The failed insert must not burn an id.
        let next = UserRepo::create(&store, &new_user("carol")).await.unwrap();
        assert_eq!(next.id, 2);
    }

    #[tokio::test]
    async fn lookups_return_none_on_miss() {
        let store = Store::new();
        assert!(UserRepo::find_by_id(&store, 42).await.is_none());
        assert!(UserRepo::find_by_username(&store, "ghost").await.is_none());
        assert!(UserRepo::find_by_email(&store, "ghost@example.com").await.is_none());
    }

    #[tokio::test]
    async fn lookups_ignore_case() {
        let store = Store::new();
        let created = UserRepo::create(&store, &new_user("Alice")).await.unwrap();

        let by_name = UserRepo::find_by_username(&store, "ALICE").await.unwrap();
        assert_eq!(by_name.id, created.id);

        let by_email = UserRepo::find_by_email(&store, "alice@EXAMPLE.com").await.unwrap();
        assert_eq!(by_email.id, created.id);
    }

    #[tokio::test]
    async fn list_is_in_insertion_order() {
        let store = Store::new();
        for name in ["zed", "amy", "max"] {
            UserRepo::create(&store, &new_user(name)).await.unwrap();
        }

        let names: Vec<_> = UserRepo::list(&store)
            .await
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(names, ["zed", "amy", "max"]);
        assert_eq!(UserRepo::count(&store).await, 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_keep_usernames_unique() {
        let store = crate::create_pool();

        let mut handles = Vec::new();
        for i in 0..32 {
            let store = store.clone();
            // Case variants of one name race against distinct names.
            let name = if i % 2 == 0 {
                if i % 4 == 0 { "Racer".to_string() } else { "rACER".to_string() }
            } else {
                format!("user{i}")
            };
            handles.push(tokio::spawn(async move {
                UserRepo::create(&store, &new_user(&name)).await
            }));
        }

        let mut created = Vec::new();
        let mut duplicates = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(user) => created.push(user),
                Err(DbError::DuplicateUsername(_)) => duplicates += 1,
            }
        }

        let racers = created
            .iter()
            .filter(|u| u.username.eq_ignore_ascii_case("racer"))
            .count();
        assert_eq!(racers, 1);
        assert_eq!(duplicates, 15);
        assert_eq!(created.len(), 17);

        let mut ids: Vec<_> = created.iter().map(|u| u.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=17).collect::<Vec<DbId>>());
        assert_eq!(UserRepo::count(&store).await, 17);
    }

    #[tokio::test]
    async fn explicit_role_is_kept() {
        let store = Store::new();
        let mut input = new_user("root");
        input.role = Some(Role::Admin);
        let user = UserRepo::create(&store, &input).await.unwrap();
        assert_eq!(user.role, Role::Admin);
    }
}
