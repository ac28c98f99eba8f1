//! # Gatehouse Sessions
//!
//! This crate provides server-side session binding for the Gatehouse
//! platform: a key-value mapping from a user id to the single
//! currently-valid signed token.
//!
//! ## Overview
//!
//! The gatehouse-session crate handles:
//! - **Binding**: `SET key value TTL` semantics, one key per user
//! - **Lookup**: the read the authorization gate performs per request
//! - **Backends**: in-memory for single-process use and tests, Redis
//!   (feature `redis`) for multi-instance deployments
//!
//! ## Invariant
//!
//! At most one valid token per user at any time. Binding a new token
//! overwrites the previous one, which is what makes re-login silently
//! invalidate older tokens even before they expire. Concurrent binds for
//! the same user race and last-write-wins.
//!
//! ## Features
//!
//! - `redis`: Redis backend using the `redis` crate's tokio support

pub mod store;

#[cfg(feature = "redis")]
pub mod redis;

// Re-export main types
pub use store::{MemorySessionStore, SessionError, SessionResult, SessionStore};

#[cfg(feature = "redis")]
pub use crate::redis::RedisSessionStore;
