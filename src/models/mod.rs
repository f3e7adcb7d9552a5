//! Rostering domain models.
//!
//! Core data types for one scheduling run: the labeled calendar, the
//! people with resolved preferences and unavailability, the closed role
//! set, and the per-run configuration. All types are read-only inputs
//! to the constraint formulation once constructed.

mod calendar;
mod config;
mod person;
mod role;

pub use calendar::{Day, RosterCalendar, WeekendPolicy};
pub use config::{CapacityPolicy, FairnessScope, RosterConfig};
pub use person::Person;
pub use role::RoleSet;
