//! Session store abstraction
//!
//! This module provides the session-binding contract and an in-memory
//! implementation for single-process deployments and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Session store error types.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Failed to reach the backing store
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The backing store did not answer within the bounded deadline
    #[error("Session store timed out after {0:?}")]
    Timeout(Duration),

    /// The backing store answered with an error
    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Server-side binding of a user to its single currently-valid token.
///
/// The store keeps at most one binding per user: `bind` overwrites any
/// existing value, which is what invalidates older tokens on re-login.
/// Two concurrent binds for the same user race and last-write-wins; the
/// losing token is rejected on its next use.
///
/// Implementations must bound every call (seconds-scale) so a stalled
/// backend degrades a request to a fast failure rather than hanging the
/// caller.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Bind `token` as the single valid token for `user_id`.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user the binding belongs to
    /// * `token` - The exact signed token string
    /// * `ttl` - Binding lifetime; equal to the token lifetime
    async fn bind(&self, user_id: Uuid, token: &str, ttl: Duration) -> SessionResult<()>;

    /// Look up the currently bound token for `user_id`.
    ///
    /// # Returns
    ///
    /// `None` when no binding exists or the binding has expired
    async fn active_token(&self, user_id: Uuid) -> SessionResult<Option<String>>;
}

/// In-memory session store.
///
/// This is suitable for single-process applications and testing.
/// For multi-instance deployments, use the Redis backend.
///
/// # Example
///
/// ```rust,no_run
/// use gatehouse_session::{MemorySessionStore, SessionStore};
/// use std::time::Duration;
/// use uuid::Uuid;
///
/// async fn example() {
///     let store = MemorySessionStore::new();
///     let user = Uuid::now_v7();
///     store.bind(user, "token-a", Duration::from_secs(300)).await.unwrap();
///     assert_eq!(store.active_token(user).await.unwrap().as_deref(), Some("token-a"));
/// }
/// ```
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    /// user id -> (token, expiry instant)
    bindings: RwLock<HashMap<Uuid, (String, Instant)>>,
}

impl MemorySessionStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            bindings: RwLock::new(HashMap::new()),
        }
    }

    /// Number of live (unexpired) bindings.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.bindings
            .read()
            .await
            .values()
            .filter(|(_, expires)| *expires > now)
            .count()
    }

    /// Check if the store holds no live bindings.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn bind(&self, user_id: Uuid, token: &str, ttl: Duration) -> SessionResult<()> {
        let expires = Instant::now() + ttl;
        let mut bindings = self.bindings.write().await;
        bindings.insert(user_id, (token.to_string(), expires));

        tracing::debug!(user_id = %user_id, "Session binding replaced");
        Ok(())
    }

    async fn active_token(&self, user_id: Uuid) -> SessionResult<Option<String>> {
        let mut bindings = self.bindings.write().await;
        match bindings.get(&user_id) {
            Some((token, expires)) if *expires > Instant::now() => Ok(Some(token.clone())),
            Some(_) => {
                // Expired entries are dropped on first read past their deadline.
                bindings.remove(&user_id);
                Ok(None)
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_and_lookup() {
        let store = MemorySessionStore::new();
        let user = Uuid::now_v7();

        store.bind(user, "token-a", Duration::from_secs(300)).await.unwrap();

        assert_eq!(
            store.active_token(user).await.unwrap().as_deref(),
            Some("token-a")
        );
    }

    #[tokio::test]
    async fn test_missing_binding_is_none() {
        let store = MemorySessionStore::new();
        assert_eq!(store.active_token(Uuid::now_v7()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_rebind_overwrites_previous_token() {
        let store = MemorySessionStore::new();
        let user = Uuid::now_v7();

        store.bind(user, "token-a", Duration::from_secs(300)).await.unwrap();
        store.bind(user, "token-b", Duration::from_secs(300)).await.unwrap();

        assert_eq!(
            store.active_token(user).await.unwrap().as_deref(),
            Some("token-b")
        );
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_expired_binding_is_dropped() {
        let store = MemorySessionStore::new();
        let user = Uuid::now_v7();

        store.bind(user, "token-a", Duration::from_millis(0)).await.unwrap();

        assert_eq!(store.active_token(user).await.unwrap(), None);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_bindings_are_per_user() {
        let store = MemorySessionStore::new();
        let alice = Uuid::now_v7();
        let bob = Uuid::now_v7();

        store.bind(alice, "token-a", Duration::from_secs(300)).await.unwrap();
        store.bind(bob, "token-b", Duration::from_secs(300)).await.unwrap();

        assert_eq!(
            store.active_token(alice).await.unwrap().as_deref(),
            Some("token-a")
        );
        assert_eq!(
            store.active_token(bob).await.unwrap().as_deref(),
            Some("token-b")
        );
    }
}
