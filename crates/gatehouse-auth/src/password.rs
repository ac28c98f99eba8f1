//! Password hashing and strength policy
//!
//! Hashes are salted Argon2id digests in PHC string format. Verification
//! never surfaces an error to the login path: a malformed digest simply
//! fails to verify.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Password hashing failed")]
    Hash,
}

/// One violated rule of the password-strength policy.
///
/// Violations carry a stable field key so the HTTP boundary can render a
/// `{field: message}` detail payload with every failing criterion at once.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PolicyViolation {
    /// Stable key identifying the rule (e.g. `uppercase`)
    pub rule: &'static str,

    /// Human-readable message
    pub message: &'static str,
}

/// Hash a plaintext password into a salted Argon2id digest.
///
/// # Arguments
///
/// * `password` - The plaintext to hash
///
/// # Returns
///
/// PHC-format digest string, or `PasswordError::Hash` on internal
/// randomness/parameter failure
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(15_000, 2, 1, None).map_err(|_| PasswordError::Hash)?,
    );

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| PasswordError::Hash)
}

/// Verify a plaintext password against a stored digest.
///
/// Returns `false` on mismatch or a malformed digest; the comparison
/// inside the verifier is constant-time.
///
/// # Arguments
///
/// * `hash` - The stored PHC-format digest
/// * `password` - The plaintext to check
pub fn verify_password(hash: &str, password: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Validate a password against the strength policy.
///
/// The policy requires at least one uppercase letter and at least one
/// symbol or punctuation character. Both rules must hold; every violated
/// rule is reported so callers can surface all failing criteria at once.
///
/// # Arguments
///
/// * `password` - The plaintext to validate
///
/// # Returns
///
/// `Ok(())` if the password satisfies the policy, otherwise the list of
/// violated rules
pub fn validate_strength(password: &str) -> Result<(), Vec<PolicyViolation>> {
    let mut has_upper = false;
    let mut has_symbol = false;

    for c in password.chars() {
        if c.is_uppercase() {
            has_upper = true;
        }
        if !c.is_alphanumeric() && !c.is_whitespace() {
            has_symbol = true;
        }
    }

    let mut violations = Vec::new();
    if !has_upper {
        violations.push(PolicyViolation {
            rule: "uppercase",
            message: "password must contain at least one uppercase letter",
        });
    }
    if !has_symbol {
        violations.push(PolicyViolation {
            rule: "symbol",
            message: "password must contain at least one symbol",
        });
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
