//! Credential store abstraction
//!
//! The contract the relational collaborator implements in production,
//! plus an in-memory implementation for single-process deployments and
//! tests. The store exclusively owns user, role, and permission rows and
//! their associations; session bindings live elsewhere and hold no
//! foreign keys into these tables.

use async_trait::async_trait;
use gatehouse_rbac::PermissionCode;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::entities::{Permission, Role, User};

/// Credential store error types.
///
/// Implementations must bound every call (seconds-scale) and surface a
/// timeout as `Unavailable` rather than hanging the caller.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store is unreachable or timed out
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A unique field is already taken
    #[error("Duplicate {field}: {value}")]
    Conflict {
        /// The unique field
        field: &'static str,
        /// The value that collided
        value: String,
    },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Relational contract for users, roles, and permissions.
///
/// All `find`/`list` operations return aggregates with the role ->
/// permission graph eagerly loaded, so callers never issue follow-up
/// queries to reason about authorization.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Find a user whose username OR email equals `login` (first match).
    async fn find_user_by_login(&self, login: &str) -> StoreResult<Option<User>>;

    /// Find a user by id.
    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// List all users.
    async fn list_users(&self) -> StoreResult<Vec<User>>;

    /// Persist a new user.
    ///
    /// Fails with `Conflict` when the username or email is taken.
    async fn insert_user(&self, user: &User) -> StoreResult<()>;

    /// Persist changes to an existing user.
    async fn update_user(&self, user: &User) -> StoreResult<()>;

    /// Replace a user's role associations with exactly `roles`.
    async fn replace_user_roles(&self, user_id: Uuid, roles: &[Role]) -> StoreResult<()>;

    /// Find the roles whose ids appear in `ids`.
    ///
    /// Unresolvable ids are simply absent from the result; callers
    /// detect them by comparing counts.
    async fn find_roles_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<Role>>;

    /// Persist a new role.
    async fn insert_role(&self, role: &Role) -> StoreResult<()>;

    /// List all roles.
    async fn list_roles(&self) -> StoreResult<Vec<Role>>;

    /// Find the permissions whose ids appear in `ids`.
    async fn find_permissions_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<Permission>>;

    /// Find a permission row by its catalog code.
    async fn find_permission_by_code(&self, code: PermissionCode) -> StoreResult<Option<Permission>>;

    /// Persist a new permission row.
    async fn insert_permission(&self, permission: &Permission) -> StoreResult<()>;

    /// List all permissions.
    async fn list_permissions(&self) -> StoreResult<Vec<Permission>>;
}

/// In-memory credential store.
///
/// This is suitable for single-process applications and testing.
/// Aggregates are stored whole; `replace_user_roles` rewrites the
/// embedded role list the way the relational backend rewrites the
/// association table.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    users: RwLock<HashMap<Uuid, User>>,
    roles: RwLock<HashMap<Uuid, Role>>,
    permissions: RwLock<HashMap<Uuid, Permission>>,
}

impl MemoryCredentialStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_user_by_login(&self, login: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        let mut matches: Vec<&User> = users
            .values()
            .filter(|u| u.username == login || u.email == login)
            .collect();
        matches.sort_by_key(|u| u.created_at);
        Ok(matches.first().map(|u| (*u).clone()))
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let users = self.users.read().await;
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by_key(|u| u.created_at);
        Ok(all)
    }

    async fn insert_user(&self, user: &User) -> StoreResult<()> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.username == user.username) {
            return Err(StoreError::Conflict {
                field: "username",
                value: user.username.clone(),
            });
        }
        if users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict {
                field: "email",
                value: user.email.clone(),
            });
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn update_user(&self, user: &User) -> StoreResult<()> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|u| u.id != user.id && u.username == user.username)
        {
            return Err(StoreError::Conflict {
                field: "username",
                value: user.username.clone(),
            });
        }
        if users
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(StoreError::Conflict {
                field: "email",
                value: user.email.clone(),
            });
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn replace_user_roles(&self, user_id: Uuid, roles: &[Role]) -> StoreResult<()> {
        let mut users = self.users.write().await;
        if let Some(user) = users.get_mut(&user_id) {
            user.roles = roles.to_vec();
            user.updated_at = chrono::Utc::now();
        }
        Ok(())
    }

    async fn find_roles_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<Role>> {
        let roles = self.roles.read().await;
        Ok(ids.iter().filter_map(|id| roles.get(id).cloned()).collect())
    }

    async fn insert_role(&self, role: &Role) -> StoreResult<()> {
        let mut roles = self.roles.write().await;
        if roles.values().any(|r| r.name == role.name) {
            return Err(StoreError::Conflict {
                field: "name",
                value: role.name.clone(),
            });
        }
        roles.insert(role.id, role.clone());
        Ok(())
    }

    async fn list_roles(&self) -> StoreResult<Vec<Role>> {
        let roles = self.roles.read().await;
        let mut all: Vec<Role> = roles.values().cloned().collect();
        all.sort_by_key(|r| r.created_at);
        Ok(all)
    }

    async fn find_permissions_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<Permission>> {
        let permissions = self.permissions.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| permissions.get(id).cloned())
            .collect())
    }

    async fn find_permission_by_code(&self, code: PermissionCode) -> StoreResult<Option<Permission>> {
        let permissions = self.permissions.read().await;
        Ok(permissions.values().find(|p| p.code == code).cloned())
    }

    async fn insert_permission(&self, permission: &Permission) -> StoreResult<()> {
        let mut permissions = self.permissions.write().await;
        permissions.insert(permission.id, permission.clone());
        Ok(())
    }

    async fn list_permissions(&self) -> StoreResult<Vec<Permission>> {
        let permissions = self.permissions.read().await;
        let mut all: Vec<Permission> = permissions.values().cloned().collect();
        all.sort_by_key(|p| p.created_at);
        Ok(all)
    }
}
