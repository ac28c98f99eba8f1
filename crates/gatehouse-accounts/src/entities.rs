//! Account domain models
//!
//! Users, roles, and permissions as the credential store owns them.
//! Users embed their role graph (role -> permission) because every
//! consumer of a loaded user needs the full authorization picture:
//! login snapshots permission codes from it, and the authority checks
//! walk role membership.

use chrono::{DateTime, Utc};
use gatehouse_rbac::{PermissionCode, PermissionSet};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// An atomic capability row, seeded from the process-wide catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Permission {
    /// Unique permission ID
    pub id: Uuid,

    /// Human-readable name
    pub name: String,

    /// Stable string code from the catalog
    pub code: PermissionCode,

    /// What the capability grants
    pub description: String,

    /// When the row was seeded
    pub created_at: DateTime<Utc>,
}

impl Permission {
    /// Create a permission row from a catalog entry.
    ///
    /// # Arguments
    ///
    /// * `code` - The catalog code to materialize
    pub fn from_code(code: PermissionCode) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: code.name().to_string(),
            code,
            description: code.description().to_string(),
            created_at: Utc::now(),
        }
    }
}

/// A named grouping of permissions.
///
/// # Examples
///
/// ```
/// use gatehouse_accounts::Role;
///
/// let role = Role::new("support", "First-line support staff");
/// assert!(role.permissions.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Role {
    /// Unique role ID
    pub id: Uuid,

    /// Role name
    pub name: String,

    /// What the role is for
    pub description: String,

    /// Permissions granted by this role
    #[serde(default)]
    pub permissions: Vec<Permission>,

    /// When the role was created
    pub created_at: DateTime<Utc>,
}

impl Role {
    /// Create a new role with no permissions.
    ///
    /// # Arguments
    ///
    /// * `name` - Role name
    /// * `description` - What the role is for
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            description: description.into(),
            permissions: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Set the permission grants.
    ///
    /// # Arguments
    ///
    /// * `permissions` - The permission rows this role grants
    pub fn with_permissions(mut self, permissions: Vec<Permission>) -> Self {
        self.permissions = permissions;
        self
    }
}

/// An account identity record.
///
/// The password is stored only as a salted digest and never serialized
/// back out. Accounts are never hard-deleted; `is_active` governs the
/// lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID
    pub id: Uuid,

    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// Unique login name
    pub username: String,

    /// Unique email address
    pub email: String,

    /// Salted password digest
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Whether the account may log in
    pub is_active: bool,

    /// Whether the account bypasses all permission checks
    pub is_super_user: bool,

    /// Primary contact number
    pub phone_primary: String,

    /// Secondary contact number
    pub phone_secondary: Option<String>,

    /// Assigned roles with their permission grants
    #[serde(default)]
    pub roles: Vec<Role>,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last modified
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new active, non-privileged account.
    ///
    /// # Arguments
    ///
    /// * `first_name` - Given name
    /// * `last_name` - Family name
    /// * `username` - Unique login name
    /// * `email` - Unique email address
    /// * `password_hash` - Salted digest produced by the password hasher
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            is_active: true,
            is_super_user: false,
            phone_primary: String::new(),
            phone_secondary: None,
            roles: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark the account as a super-user.
    pub fn with_super_user(mut self, is_super_user: bool) -> Self {
        self.is_super_user = is_super_user;
        self
    }

    /// Set the active flag.
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Set the contact numbers.
    ///
    /// # Arguments
    ///
    /// * `primary` - Primary contact number
    /// * `secondary` - Optional secondary contact number
    pub fn with_phones(mut self, primary: impl Into<String>, secondary: Option<String>) -> Self {
        self.phone_primary = primary.into();
        self.phone_secondary = secondary;
        self
    }

    /// Set the assigned roles.
    pub fn with_roles(mut self, roles: Vec<Role>) -> Self {
        self.roles = roles;
        self
    }

    /// Collect the permission codes granted by the role graph.
    ///
    /// This is the snapshot embedded into freshly issued tokens.
    pub fn permission_codes(&self) -> PermissionSet {
        let mut set = PermissionSet::new();
        for role in &self.roles {
            for permission in &role.permissions {
                set.insert(permission.code);
            }
        }
        set
    }

    /// Check whether this user holds a specific permission through any role.
    ///
    /// Super-user status is deliberately not consulted here; bypass
    /// decisions belong to the callers that enforce them.
    pub fn holds_permission(&self, code: PermissionCode) -> bool {
        self.permission_codes().has(code)
    }

    /// Check whether this user already holds every role in `roles`.
    ///
    /// This is the role-containment rule: an actor may only assign roles
    /// it holds itself (super-users excepted, checked by the caller).
    ///
    /// # Arguments
    ///
    /// * `roles` - The roles being assigned
    pub fn holds_all_roles(&self, roles: &[Role]) -> bool {
        let held: HashSet<Uuid> = self.roles.iter().map(|r| r.id).collect();
        roles.iter().all(|role| held.contains(&role.id))
    }
}
