//! Person model.
//!
//! A person is a candidate for on-call shifts: an identifier, a display
//! name, and two sets of calendar day indices — days they prefer to work
//! and days they cannot work.
//!
//! # Precedence
//! Unavailability is a hard fact; preference is advisory. If a day
//! appears in both sets, the day is excluded and the preference for it
//! is discarded.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A person who can be assigned on-call shifts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    /// Unique identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Calendar day indices this person would like to work.
    pub preferred_days: BTreeSet<usize>,
    /// Calendar day indices this person cannot work. Overrides preference.
    pub unavailable_days: BTreeSet<usize>,
}

impl Person {
    /// Creates a person with no declared preferences or unavailability.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            preferred_days: BTreeSet::new(),
            unavailable_days: BTreeSet::new(),
        }
    }

    /// Adds preferred day indices.
    pub fn with_preferred(mut self, days: impl IntoIterator<Item = usize>) -> Self {
        self.preferred_days.extend(days);
        self
    }

    /// Adds unavailable day indices.
    pub fn with_unavailable(mut self, days: impl IntoIterator<Item = usize>) -> Self {
        self.unavailable_days.extend(days);
        self
    }

    /// Whether this person cannot work the given day.
    #[inline]
    pub fn is_unavailable(&self, day: usize) -> bool {
        self.unavailable_days.contains(&day)
    }

    /// Whether this person prefers the given day.
    ///
    /// A day that is also unavailable never counts as preferred, even
    /// if both sets were populated from raw input.
    #[inline]
    pub fn prefers(&self, day: usize) -> bool {
        self.preferred_days.contains(&day) && !self.unavailable_days.contains(&day)
    }
}
