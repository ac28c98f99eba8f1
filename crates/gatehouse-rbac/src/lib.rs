//! # Gatehouse RBAC (Role-Based Access Control)
//!
//! This crate provides the permission primitives shared across the
//! Gatehouse platform crates.
//!
//! ## Overview
//!
//! The gatehouse-rbac crate handles:
//! - **Permission codes**: the fixed, process-wide catalog of capabilities
//! - **Permission sets**: collections of codes for roles, users, and tokens
//!
//! ## Architecture
//!
//! ```text
//! PermissionCode = one atomic capability, identified by a stable string
//!
//! Examples:
//!   "create_user"   - Create new accounts
//!   "update_role"   - Modify role definitions
//! ```
//!
//! The catalog is a static table established at startup: codes are never
//! user-editable, and persistence layers seed their permission rows from
//! `PermissionCode::all()`.
//!
//! ## Usage
//!
//! ```rust
//! use gatehouse_rbac::{PermissionCode, PermissionSet};
//!
//! let mut set = PermissionSet::new();
//! set.insert(PermissionCode::CreateUser);
//!
//! assert!(set.has(PermissionCode::CreateUser));
//! assert!(set.contains_any(&[PermissionCode::CreateUser, PermissionCode::ViewUser]));
//! ```

pub mod codes;
pub mod set;

// Re-export main types
pub use codes::PermissionCode;
pub use set::PermissionSet;
