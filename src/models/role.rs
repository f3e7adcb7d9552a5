//! Role model.
//!
//! A role is one category of on-call duty that must be staffed every
//! day (e.g., Primary, Secondary). The set is closed and fixed for a
//! run, but its size is configuration, not a hard-coded pair.
//!
//! Roles are addressed by index throughout the model; the index also
//! defines the role order used when flattening days into day-slots.

use serde::{Deserialize, Serialize};

/// The closed set of duty roles for one scheduling run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSet {
    names: Vec<String>,
}

impl RoleSet {
    /// Creates a role set from ordered role names.
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// The conventional two-role on-call set.
    pub fn primary_secondary() -> Self {
        Self::new(vec!["Primary".into(), "Secondary".into()])
    }

    /// A single-role set.
    pub fn single(name: impl Into<String>) -> Self {
        Self::new(vec![name.into()])
    }

    /// Number of roles.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the set has no roles.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Role name at the given index.
    pub fn name(&self, index: usize) -> &str {
        &self.names[index]
    }

    /// Role names in role order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Looks up a role index by name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}

impl Default for RoleSet {
    fn default() -> Self {
        Self::primary_secondary()
    }
}
