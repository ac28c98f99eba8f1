//! Error types for account operations
//!
//! The taxonomy the HTTP boundary maps to status codes: validation
//! failures carry field-level details, everything else a flat message.
//! No error in this crate is retried automatically.

use gatehouse_auth::{AuthError, PolicyViolation};
use gatehouse_session::SessionError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::store::StoreError;

/// One field-level validation failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldViolation {
    /// The offending field
    pub field: String,

    /// What is wrong with it
    pub message: String,
}

impl FieldViolation {
    /// Create a new violation.
    ///
    /// # Arguments
    ///
    /// * `field` - The offending field
    /// * `message` - What is wrong with it
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<PolicyViolation> for FieldViolation {
    fn from(violation: PolicyViolation) -> Self {
        Self::new(violation.rule, violation.message)
    }
}

/// Account error types.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Malformed input, with per-field details
    #[error("Validation failed")]
    Validation(Vec<FieldViolation>),

    /// Missing, invalid, mismatched, or expired credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but lacking the authority for this mutation
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// An id did not resolve
    #[error("Not found: {0}")]
    NotFound(String),

    /// A unique field is already taken
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The relational or key-value store is unreachable or timed out
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for account operations.
pub type AccountResult<T> = Result<T, AccountError>;

impl AccountError {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            AccountError::Validation(_) => 422,
            AccountError::Unauthorized(_) => 401,
            AccountError::Forbidden(_) => 403,
            AccountError::NotFound(_) => 404,
            AccountError::Conflict(_) => 409,
            AccountError::StoreUnavailable(_) => 503,
            AccountError::Internal(_) => 500,
        }
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            AccountError::Validation(_) => "VALIDATION_ERROR",
            AccountError::Unauthorized(_) => "UNAUTHORIZED",
            AccountError::Forbidden(_) => "FORBIDDEN",
            AccountError::NotFound(_) => "NOT_FOUND",
            AccountError::Conflict(_) => "CONFLICT",
            AccountError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            AccountError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this error should be logged at error level.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            AccountError::StoreUnavailable(_) | AccountError::Internal(_)
        )
    }

    /// Field-level details for validation failures, as a `{field: message}` map.
    ///
    /// # Returns
    ///
    /// `Some(map)` for `Validation`, `None` for every other kind
    pub fn validation_fields(&self) -> Option<BTreeMap<String, String>> {
        match self {
            AccountError::Validation(violations) => Some(
                violations
                    .iter()
                    .map(|v| (v.field.clone(), v.message.clone()))
                    .collect(),
            ),
            _ => None,
        }
    }
}

impl From<StoreError> for AccountError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict { field, value } => {
                AccountError::Conflict(format!("{} '{}' is already taken", field, value))
            }
            StoreError::Unavailable(msg) => AccountError::StoreUnavailable(msg),
        }
    }
}

impl From<SessionError> for AccountError {
    fn from(err: SessionError) -> Self {
        AccountError::StoreUnavailable(err.to_string())
    }
}

impl From<AuthError> for AccountError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::TokenExpired | AuthError::InvalidToken(_) => {
                AccountError::Unauthorized(err.to_string())
            }
            AuthError::ConfigError(_) | AuthError::Internal(_) => {
                AccountError::Internal(err.to_string())
            }
        }
    }
}
