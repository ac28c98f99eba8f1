//! # Permission sets
//!
//! Collections of permission codes for roles, users, and token claims.
//! A set built from a token's claims is checked against an endpoint's
//! required codes; a set built from a user's role graph is the snapshot
//! embedded into freshly issued tokens.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::codes::PermissionCode;

/// A set of permission codes.
///
/// Codes are stored as their stable string representation so the set can
/// be populated both from typed catalog entries and from the string
/// arrays carried inside token claims. Unknown strings are retained:
/// a token minted by a newer process may carry codes this process does
/// not know, and they must survive a round trip.
///
/// # Example
///
/// ```
/// use gatehouse_rbac::{PermissionCode, PermissionSet};
///
/// let mut set = PermissionSet::new();
/// set.insert(PermissionCode::ViewUser);
/// set.insert(PermissionCode::CreateUser);
///
/// assert!(set.has(PermissionCode::ViewUser));
/// assert_eq!(set.len(), 2);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PermissionSet {
    /// The codes in this set (stored as strings for wire compatibility).
    codes: HashSet<String>,
}

impl PermissionSet {
    /// Create a new empty permission set.
    pub fn new() -> Self {
        Self {
            codes: HashSet::new(),
        }
    }

    /// Build a set from catalog entries.
    ///
    /// # Arguments
    ///
    /// * `codes` - The typed codes to include
    pub fn from_codes(codes: &[PermissionCode]) -> Self {
        let mut set = Self::new();
        for code in codes {
            set.insert(*code);
        }
        set
    }

    /// Build a set from raw string codes, e.g. a token's `permissions` claim.
    ///
    /// # Arguments
    ///
    /// * `codes` - An iterator of string codes
    pub fn from_strings<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            codes: codes.into_iter().map(Into::into).collect(),
        }
    }

    /// Add a catalog code to the set.
    ///
    /// # Arguments
    ///
    /// * `code` - The code to add
    pub fn insert(&mut self, code: PermissionCode) {
        self.codes.insert(code.as_str().to_string());
    }

    /// Add a raw string code to the set.
    ///
    /// # Arguments
    ///
    /// * `code` - The string code to add
    pub fn insert_str(&mut self, code: impl Into<String>) {
        self.codes.insert(code.into());
    }

    /// Check whether the set contains a catalog code.
    ///
    /// # Arguments
    ///
    /// * `code` - The code to check for
    pub fn has(&self, code: PermissionCode) -> bool {
        self.codes.contains(code.as_str())
    }

    /// Check whether the set grants at least one of the required codes.
    ///
    /// An empty requirement list grants nothing here; callers that treat
    /// "no requirement" as allow-all must short-circuit before asking.
    ///
    /// # Arguments
    ///
    /// * `required` - The codes an endpoint accepts (logical OR)
    pub fn contains_any(&self, required: &[PermissionCode]) -> bool {
        required.iter().any(|code| self.has(*code))
    }

    /// Check whether the set grants every code in another set.
    ///
    /// # Arguments
    ///
    /// * `other` - The set that must be fully covered
    pub fn contains_all(&self, other: &PermissionSet) -> bool {
        other.codes.iter().all(|code| self.codes.contains(code))
    }

    /// Merge another set into this one.
    ///
    /// # Arguments
    ///
    /// * `other` - The set to merge
    pub fn merge(&mut self, other: &PermissionSet) {
        for code in &other.codes {
            self.codes.insert(code.clone());
        }
    }

    /// Get the codes as a sorted vector of strings.
    ///
    /// Sorted so that two identical sets serialize identically, which
    /// keeps issued-token snapshots deterministic.
    pub fn to_vec(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.codes.iter().cloned().collect();
        codes.sort();
        codes
    }

    /// Get the count of codes.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl FromIterator<PermissionCode> for PermissionSet {
    fn from_iter<T: IntoIterator<Item = PermissionCode>>(iter: T) -> Self {
        let mut set = PermissionSet::new();
        for code in iter {
            set.insert(code);
        }
        set
    }
}
