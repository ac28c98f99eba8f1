//! # Gatehouse Gate
//!
//! This crate provides per-request authorization for the Gatehouse
//! platform: bearer-token extraction, signature and expiry verification,
//! single-active-session enforcement, and permission checks.
//!
//! ## Overview
//!
//! The gatehouse-gate crate handles:
//! - **Extraction**: the mandatory `Bearer ` prefix
//! - **Verification**: signature, expiry, and issuer via the token issuer
//! - **Session check**: the presented token must be the subject's single
//!   active binding, byte-for-byte
//! - **Permissions**: super-user bypass, otherwise a logical OR over the
//!   endpoint's required codes
//!
//! The sequence is terminal on first failure and every rejection maps to
//! HTTP 401. The gate performs no writes and no retries.
//!
//! ## Usage
//!
//! The routing layer builds one gate at startup and attaches a
//! `RouteGuard` per protected endpoint:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use gatehouse_auth::TokenIssuer;
//! use gatehouse_gate::AuthorizationGate;
//! use gatehouse_rbac::PermissionCode;
//! use gatehouse_session::MemorySessionStore;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let gate = AuthorizationGate::new(
//!     Arc::new(TokenIssuer::with_secret("a-shared-secret-of-reasonable-length")?),
//!     Arc::new(MemorySessionStore::new()),
//! );
//!
//! let list_users = gate.require(&[PermissionCode::ViewUser]);
//! let create_users = gate.require(&[PermissionCode::CreateUser]);
//! let any_session = gate.require(&[]);
//! # Ok(())
//! # }
//! ```

pub mod gate;

// Re-export main types
pub use gate::{AuthorizationGate, GateError, GateResult, RouteGuard};
