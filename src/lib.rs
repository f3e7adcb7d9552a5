//! On-call rostering core.
//!
//! Assigns people to recurring daily on-call roles across a multi-week
//! calendar, subject to hard availability rules and soft preferences.
//! The heart of the crate is the constraint formulation: the domain
//! model and the translation into a precise batch of hard constraints
//! plus a preference-weighted objective for a generic combinatorial
//! solver. The search itself is an external collaborator behind the
//! [`solver::SolverAdapter`] trait.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Day`, `RosterCalendar`, `Person`,
//!   `RoleSet`, `RosterConfig`
//! - **`availability`**: Raw weekly day-name declarations → calendar
//!   day-index sets (unavailability overrides preference)
//! - **`formulation`**: `RosterModelBuilder` — variables, hard
//!   constraints, and the preference objective
//! - **`solver`**: The external-solver seam and its status/solution types
//! - **`assemble`**: Solver output → per-day roster and per-person
//!   statistics
//! - **`validation`**: Input integrity checks (duplicate IDs, role
//!   references, window bounds, week columns)
//! - **`pipeline`**: The stages wired in their only legal order
//!
//! # Pipeline
//!
//! ```text
//! config + records
//!   → validate → calendar → availability → formulation
//!   → (external solve) → assembly
//! ```
//!
//! Data flows strictly forward; Infeasible and Unknown solver outcomes
//! are first-class results, never errors.

pub mod assemble;
pub mod availability;
pub mod error;
pub mod formulation;
pub mod models;
pub mod pipeline;
pub mod solver;
pub mod validation;
