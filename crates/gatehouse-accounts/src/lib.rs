//! # Gatehouse Accounts
//!
//! This crate provides account management and role/permission resolution
//! for the Gatehouse platform.
//!
//! ## Overview
//!
//! The gatehouse-accounts crate handles:
//! - **Entities**: users, roles, and permissions with their associations
//! - **Credential store**: the relational contract plus an in-memory
//!   backend for single-process use and tests
//! - **Account service**: login, user and role management, startup
//!   seeding
//! - **Authority**: the full-vs-self-only update decision
//!
//! ## Authorization rules
//!
//! - Login failures are indistinguishable: unknown account, wrong
//!   password, and inactive account all yield one generic message.
//! - Role-containment: an actor may only assign roles it already holds;
//!   super-users are exempt.
//! - Only super-users create or elevate super-users.
//! - Editors without full update authority may update only themselves,
//!   and only the non-privileged fields.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use gatehouse_accounts::{AccountService, BootstrapConfig, MemoryCredentialStore};
//! use gatehouse_auth::TokenIssuer;
//! use gatehouse_session::MemorySessionStore;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = AccountService::new(
//!         Arc::new(MemoryCredentialStore::new()),
//!         Arc::new(MemorySessionStore::new()),
//!         TokenIssuer::with_secret("a-shared-secret-of-reasonable-length")?,
//!         BootstrapConfig::default(),
//!     );
//!     service.seed().await?;
//!     Ok(())
//! }
//! ```

pub mod authority;
pub mod entities;
pub mod error;
pub mod requests;
pub mod service;
pub mod store;

// Re-export main types
pub use authority::{update_authority, UpdateAuthority};
pub use entities::{Permission, Role, User};
pub use error::{AccountError, AccountResult, FieldViolation};
pub use requests::{CreateRoleRequest, CreateUserRequest, LoginRequest, UpdateUserRequest};
pub use service::{AccountService, BootstrapConfig, LoginGrant};
pub use store::{CredentialStore, MemoryCredentialStore, StoreError, StoreResult};
