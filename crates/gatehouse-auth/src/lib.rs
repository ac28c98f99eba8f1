//! # Gatehouse Authentication
//!
//! This crate provides password verification and signed-token issuance
//! for the Gatehouse platform.
//!
//! ## Overview
//!
//! The gatehouse-auth crate handles:
//! - **Passwords**: salted Argon2id hashing, constant-time verification,
//!   and the strength policy
//! - **Tokens**: HS256-signed claims with a denormalized permission
//!   snapshot
//! - **Claims**: the immutable payload identifying a subject and its
//!   authorization snapshot
//!
//! ## Usage
//!
//! ```rust
//! use gatehouse_auth::{TokenIssuer, password};
//! use uuid::Uuid;
//!
//! // Hash and verify a password
//! let digest = password::hash_password("Hunter-2!").unwrap();
//! assert!(password::verify_password(&digest, "Hunter-2!"));
//!
//! // Issue and validate a token
//! let issuer = TokenIssuer::with_secret("a-shared-secret-of-reasonable-length").unwrap();
//! let issued = issuer.issue(Uuid::now_v7(), vec!["view_user".into()], false).unwrap();
//! let claims = issuer.decode(&issued.token).unwrap();
//! assert_eq!(claims.permissions, vec!["view_user".to_string()]);
//! ```
//!
//! ## Cross-crate integration
//!
//! This crate integrates with:
//! - `gatehouse-rbac`: permission snapshots inside claims
//! - `gatehouse-session`: issued tokens are bound server-side, one per user
//! - `gatehouse-gate`: per-request verification of presented tokens

pub mod claims;
pub mod error;
pub mod jwt;
pub mod password;

// Re-export main types
pub use claims::AccessClaims;
pub use error::{AuthError, AuthResult};
pub use jwt::{AuthConfig, IssuedToken, TokenIssuer};
pub use password::{hash_password, validate_strength, verify_password, PasswordError, PolicyViolation};
