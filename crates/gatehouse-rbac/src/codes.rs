//! # Permission codes
//!
//! The fixed catalog of capabilities recognized by the platform.
//! Every code is a stable string identifier; the set of valid codes is
//! established at process start and is not user-editable.

use serde::{Deserialize, Serialize};

/// One atomic capability, identified by a stable string code.
///
/// The catalog is deliberately explicit: each variant carries its wire
/// code, a human-readable name, and a description, and `all()` exposes
/// the full table for idempotent seeding into a credential store.
///
/// # Example
///
/// ```
/// use gatehouse_rbac::PermissionCode;
///
/// assert_eq!(PermissionCode::CreateUser.as_str(), "create_user");
/// assert_eq!(PermissionCode::parse("create_user"), Some(PermissionCode::CreateUser));
/// assert_eq!(PermissionCode::all().len(), 10);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PermissionCode {
    /// Marker capability for administrative tooling.
    ///
    /// Super-user status itself lives on the account record and bypasses
    /// permission checks entirely; this code exists so the capability can
    /// still be named in role definitions and audit views.
    SuperUser,

    /// Create new user accounts.
    CreateUser,

    /// View user accounts and their role assignments.
    ViewUser,

    /// Perform full updates on any user account.
    UpdateUser,

    /// Deactivate or remove user accounts.
    DeleteUser,

    /// Edit the permission assignments of a user's roles.
    EditPermissionsUser,

    /// Create new roles.
    CreateRole,

    /// View roles and their permission grants.
    ViewRole,

    /// Modify existing role definitions.
    UpdateRole,

    /// Remove roles.
    DeleteRole,
}

impl PermissionCode {
    /// Get the stable string code.
    ///
    /// # Returns
    ///
    /// The wire identifier stored in credential rows and token claims.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperUser => "super_user",
            Self::CreateUser => "create_user",
            Self::ViewUser => "view_user",
            Self::UpdateUser => "update_user",
            Self::DeleteUser => "delete_user",
            Self::EditPermissionsUser => "edit_permissions_user",
            Self::CreateRole => "create_role",
            Self::ViewRole => "view_role",
            Self::UpdateRole => "update_role",
            Self::DeleteRole => "delete_role",
        }
    }

    /// Parse a code from its string representation.
    ///
    /// # Arguments
    ///
    /// * `s` - The string code to parse
    ///
    /// # Returns
    ///
    /// `Some(PermissionCode)` if the string is in the catalog, `None` otherwise
    ///
    /// # Example
    ///
    /// ```
    /// use gatehouse_rbac::PermissionCode;
    ///
    /// assert_eq!(PermissionCode::parse("view_role"), Some(PermissionCode::ViewRole));
    /// assert_eq!(PermissionCode::parse("not_a_code"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|code| code.as_str() == s)
    }

    /// Get a human-readable name for the capability.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SuperUser => "Super User",
            Self::CreateUser => "Create User",
            Self::ViewUser => "View User",
            Self::UpdateUser => "Update User",
            Self::DeleteUser => "Delete User",
            Self::EditPermissionsUser => "Edit User Permissions",
            Self::CreateRole => "Create Role",
            Self::ViewRole => "View Role",
            Self::UpdateRole => "Update Role",
            Self::DeleteRole => "Delete Role",
        }
    }

    /// Get the capability description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::SuperUser => "Marker capability for administrative tooling",
            Self::CreateUser => "Create new user accounts",
            Self::ViewUser => "View user accounts and their role assignments",
            Self::UpdateUser => "Perform full updates on any user account",
            Self::DeleteUser => "Deactivate or remove user accounts",
            Self::EditPermissionsUser => "Edit the permission assignments of a user's roles",
            Self::CreateRole => "Create new roles",
            Self::ViewRole => "View roles and their permission grants",
            Self::UpdateRole => "Modify existing role definitions",
            Self::DeleteRole => "Remove roles",
        }
    }

    /// Get the full catalog, in seeding order.
    ///
    /// # Returns
    ///
    /// Every code the platform recognizes. Seeding iterates this table
    /// directly; there is no runtime introspection.
    pub fn all() -> &'static [PermissionCode] {
        &[
            Self::SuperUser,
            Self::CreateUser,
            Self::ViewUser,
            Self::UpdateUser,
            Self::DeleteUser,
            Self::EditPermissionsUser,
            Self::CreateRole,
            Self::ViewRole,
            Self::UpdateRole,
            Self::DeleteRole,
        ]
    }
}

impl std::fmt::Display for PermissionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        for code in PermissionCode::all() {
            assert_eq!(PermissionCode::parse(code.as_str()), Some(*code));
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(PermissionCode::parse(""), None);
        assert_eq!(PermissionCode::parse("create_widget"), None);
        assert_eq!(PermissionCode::parse("CREATE_USER"), None);
    }

    #[test]
    fn test_catalog_codes_are_unique() {
        let codes: std::collections::HashSet<&str> =
            PermissionCode::all().iter().map(|c| c.as_str()).collect();
        assert_eq!(codes.len(), PermissionCode::all().len());
    }

    #[test]
    fn test_catalog_entries_are_described() {
        for code in PermissionCode::all() {
            assert!(!code.name().is_empty());
            assert!(!code.description().is_empty());
        }
    }

    #[test]
    fn test_display_matches_wire_code() {
        assert_eq!(PermissionCode::UpdateRole.to_string(), "update_role");
    }
}
