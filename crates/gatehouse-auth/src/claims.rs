//! Access-token claims
//!
//! This module defines the signed payload carried inside every bearer
//! token. Claims are an authorization snapshot taken at issuance time:
//! permission changes made to an account afterwards take effect only on
//! the next login.

use chrono::{DateTime, Utc};
use gatehouse_rbac::PermissionSet;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims embedded in an access token.
///
/// The structure is immutable for the token's lifetime. The permission
/// list is denormalized from the subject's role graph when the token is
/// issued and is never re-resolved per request.
///
/// # Wire format
///
/// ```json
/// {
///   "sub": "0190b5a2-…",
///   "iss": "gatehouse",
///   "iat": 1718000000,
///   "exp": 1718000300,
///   "permissions": ["create_user", "view_user"],
///   "isSuperUser": false
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// Subject (user ID)
    pub sub: String,

    /// Issuer
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Permission codes held by the subject at issuance time
    #[serde(default)]
    pub permissions: Vec<String>,

    /// Whether the subject bypasses all permission checks
    #[serde(rename = "isSuperUser", default)]
    pub is_super_user: bool,
}

impl AccessClaims {
    /// Create new claims for a subject.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The subject's unique identifier
    /// * `issuer` - The issuer name stamped into `iss`
    /// * `permissions` - Snapshot of the subject's permission codes
    /// * `is_super_user` - Super-user flag at issuance time
    /// * `ttl` - Token validity duration
    ///
    /// # Returns
    ///
    /// Claims with `iat = now` and `exp = now + ttl`
    pub fn new(
        user_id: Uuid,
        issuer: impl Into<String>,
        permissions: Vec<String>,
        is_super_user: bool,
        ttl: chrono::Duration,
    ) -> Self {
        let now = Utc::now();
        let exp = now + ttl;

        Self {
            sub: user_id.to_string(),
            iss: issuer.into(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            permissions,
            is_super_user,
        }
    }

    /// Get the subject as a UUID.
    pub fn user_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }

    /// Check if the token is expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Get expiration as DateTime.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_default()
    }

    /// Seconds of validity remaining at issuance, as reported to clients.
    pub fn lifetime_seconds(&self) -> i64 {
        self.exp - self.iat
    }

    /// Get the permission snapshot as a set.
    pub fn permission_set(&self) -> PermissionSet {
        PermissionSet::from_strings(self.permissions.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use gatehouse_rbac::PermissionCode;

    #[test]
    fn test_claims_creation() {
        let user_id = Uuid::now_v7();
        let claims = AccessClaims::new(
            user_id,
            "gatehouse",
            vec!["view_user".to_string()],
            false,
            Duration::minutes(5),
        );

        assert_eq!(claims.user_id(), Some(user_id));
        assert_eq!(claims.lifetime_seconds(), 300);
        assert!(!claims.is_expired());
        assert!(!claims.is_super_user);
    }

    #[test]
    fn test_claims_expiration() {
        let mut claims = AccessClaims::new(Uuid::now_v7(), "gatehouse", vec![], false, Duration::minutes(5));
        claims.exp = Utc::now().timestamp() - 3600;

        assert!(claims.is_expired());
    }

    #[test]
    fn test_permission_set_view() {
        let claims = AccessClaims::new(
            Uuid::now_v7(),
            "gatehouse",
            vec!["create_user".to_string(), "view_user".to_string()],
            false,
            Duration::minutes(5),
        );

        assert!(claims.permission_set().has(PermissionCode::CreateUser));
        assert!(!claims.permission_set().has(PermissionCode::DeleteUser));
    }

    #[test]
    fn test_wire_field_names() {
        let claims = AccessClaims::new(Uuid::now_v7(), "gatehouse", vec![], true, Duration::minutes(5));
        let json = serde_json::to_value(&claims).unwrap();

        assert!(json.get("isSuperUser").and_then(|v| v.as_bool()).unwrap());
        assert!(json.get("sub").is_some());
        assert!(json.get("permissions").is_some());
    }
}
