//! Update-authority decision
//!
//! Whether an editor may perform a full update on arbitrary accounts or
//! only a simple update on itself is decided here, in one place, so the
//! rule is testable in isolation and the service body stays free of
//! scattered boolean branches.

use gatehouse_rbac::PermissionCode;

use crate::entities::User;

/// How much of an account an editor is allowed to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateAuthority {
    /// May update any account, including roles, username, email, and
    /// super-user elevation (elevation still requires a super-user
    /// editor).
    Full,

    /// May update only their own name, active flag, and contact fields.
    SelfOnly,
}

/// Decide the update authority of an editor.
///
/// `Full` requires super-user status or the `update_user` permission;
/// everyone else is limited to `SelfOnly`.
///
/// # Arguments
///
/// * `editor` - The account performing the update
///
/// # Example
///
/// ```
/// use gatehouse_accounts::{authority::{update_authority, UpdateAuthority}, User};
///
/// let editor = User::new("Ada", "Lovelace", "ada", "ada@example.com", "digest");
/// assert_eq!(update_authority(&editor), UpdateAuthority::SelfOnly);
/// ```
pub fn update_authority(editor: &User) -> UpdateAuthority {
    if editor.is_super_user || editor.holds_permission(PermissionCode::UpdateUser) {
        UpdateAuthority::Full
    } else {
        UpdateAuthority::SelfOnly
    }
}
