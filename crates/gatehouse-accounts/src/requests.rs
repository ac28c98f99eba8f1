//! Request payloads for account operations
//!
//! Wire-facing input types with their field-level validation. Validation
//! returns every violated rule at once so the HTTP boundary can render a
//! complete `{field: message}` detail payload.

use gatehouse_auth::password;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::FieldViolation;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username or email address
    pub username: String,

    /// Plaintext password
    pub password: String,
}

/// Request to create a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// Unique login name
    pub username: String,

    /// Unique email address
    pub email: String,

    /// Plaintext password, hashed before persistence
    pub password: String,

    /// Whether the account may log in
    #[serde(default = "default_active")]
    pub is_active: bool,

    /// Whether the new account is a super-user (requires a super-user creator)
    #[serde(default)]
    pub is_super_user: bool,

    /// Roles to assign, by id
    #[serde(default)]
    pub role_ids: Vec<Uuid>,

    /// Primary contact number
    #[serde(default)]
    pub phone_primary: String,

    /// Secondary contact number
    #[serde(default)]
    pub phone_secondary: Option<String>,
}

fn default_active() -> bool {
    true
}

impl CreateUserRequest {
    /// Validate the request.
    ///
    /// # Returns
    ///
    /// `Ok(())` or every violated rule, including the password-strength
    /// policy
    pub fn validate(&self) -> Result<(), Vec<FieldViolation>> {
        let mut violations = Vec::new();

        if self.first_name.trim().is_empty() {
            violations.push(FieldViolation::new("first_name", "must not be empty"));
        }
        if self.username.trim().is_empty() {
            violations.push(FieldViolation::new("username", "must not be empty"));
        }
        if !self.email.contains('@') {
            violations.push(FieldViolation::new("email", "must be a valid email address"));
        }
        if let Err(policy) = password::validate_strength(&self.password) {
            violations.extend(policy.into_iter().map(FieldViolation::from));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Request to update a user.
///
/// The always-present fields are the ones any account may change about
/// itself. The optional tail (`username`, `email`, `role_ids`,
/// `is_super_user`) applies only under full update authority and is
/// ignored otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// Whether the account may log in
    pub is_active: bool,

    /// Primary contact number
    #[serde(default)]
    pub phone_primary: String,

    /// Secondary contact number
    #[serde(default)]
    pub phone_secondary: Option<String>,

    /// New login name (full update only)
    #[serde(default)]
    pub username: Option<String>,

    /// New email address (full update only)
    #[serde(default)]
    pub email: Option<String>,

    /// Replacement role assignment, by id (full update only)
    #[serde(default)]
    pub role_ids: Option<Vec<Uuid>>,

    /// Elevate the target to super-user (full update only; requires a
    /// super-user editor; never demotes)
    #[serde(default)]
    pub is_super_user: bool,
}

impl UpdateUserRequest {
    /// Validate the request.
    pub fn validate(&self) -> Result<(), Vec<FieldViolation>> {
        let mut violations = Vec::new();

        if self.first_name.trim().is_empty() {
            violations.push(FieldViolation::new("first_name", "must not be empty"));
        }
        if let Some(username) = &self.username {
            if username.trim().is_empty() {
                violations.push(FieldViolation::new("username", "must not be empty"));
            }
        }
        if let Some(email) = &self.email {
            if !email.contains('@') {
                violations.push(FieldViolation::new("email", "must be a valid email address"));
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Request to create a role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoleRequest {
    /// Role name
    pub name: String,

    /// What the role is for
    #[serde(default)]
    pub description: String,

    /// Permissions to grant, by id
    #[serde(default)]
    pub permission_ids: Vec<Uuid>,
}

impl CreateRoleRequest {
    /// Validate the request.
    pub fn validate(&self) -> Result<(), Vec<FieldViolation>> {
        if self.name.trim().is_empty() {
            Err(vec![FieldViolation::new("name", "must not be empty")])
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create() -> CreateUserRequest {
        CreateUserRequest {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            username: "ada".into(),
            email: "ada@example.com".into(),
            password: "Engine-1843!".into(),
            is_active: true,
            is_super_user: false,
            role_ids: vec![],
            phone_primary: String::new(),
            phone_secondary: None,
        }
    }

    #[test]
    fn test_valid_create_request_passes() {
        assert!(valid_create().validate().is_ok());
    }

    #[test]
    fn test_create_request_reports_every_violation() {
        let req = CreateUserRequest {
            first_name: "  ".into(),
            email: "not-an-email".into(),
            password: "weak".into(),
            ..valid_create()
        };

        let violations = req.validate().unwrap_err();
        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["first_name", "email", "uppercase", "symbol"]);
    }

    #[test]
    fn test_update_request_validates_optional_fields_when_present() {
        let req = UpdateUserRequest {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            is_active: true,
            phone_primary: String::new(),
            phone_secondary: None,
            username: Some("".into()),
            email: Some("bad".into()),
            role_ids: None,
            is_super_user: false,
        };

        let violations = req.validate().unwrap_err();
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_role_request_requires_name() {
        let req = CreateRoleRequest {
            name: "".into(),
            description: String::new(),
            permission_ids: vec![],
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_defaults_are_safe() {
        let req: CreateUserRequest = serde_json::from_str(
            r#"{
                "first_name": "Ada",
                "last_name": "Lovelace",
                "username": "ada",
                "email": "ada@example.com",
                "password": "Engine-1843!"
            }"#,
        )
        .unwrap();

        assert!(req.is_active);
        assert!(!req.is_super_user);
        assert!(req.role_ids.is_empty());
    }
}
