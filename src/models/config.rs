//! Per-run roster configuration.
//!
//! Holds every process-wide parameter for a single scheduling run:
//! date range, weekend policy, role set, consecutive-shift cap, fairness
//! partitions, envelope capacity policy, and the optional solver timeout.
//! Created once per run and never mutated during model construction.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{RoleSet, WeekendPolicy};

/// A categorical partition of calendar days balanced independently.
///
/// Fairness envelopes are computed and enforced per scope, so balance
/// holds at every granularity rather than only in aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FairnessScope {
    /// Every day in the calendar.
    Calendar,
    /// Non-weekend days only.
    Weekdays,
    /// Weekend days only.
    Weekends,
}

/// How fairness envelopes account for declared unavailability.
///
/// With `Nominal`, total shifts divide evenly across all people; a person
/// unavailable for most of the range can make the model infeasible. With
/// `Available`, each person's envelope is capped at the shifts they can
/// actually reach and the surplus is redistributed to the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CapacityPolicy {
    /// Divide total shifts over head count, ignoring unavailability.
    Nominal,
    /// Cap each person's envelope at their reachable shift count.
    Available,
}

/// Process-wide parameters for one scheduling run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    /// First day of the roster (inclusive).
    pub start: NaiveDate,
    /// Last day of the roster (inclusive).
    pub end: NaiveDate,
    /// Which weekdays count as weekend.
    pub weekend_policy: WeekendPolicy,
    /// The closed set of daily duty roles.
    pub roles: RoleSet,
    /// Maximum shifts one person may hold in any `window_len` slots.
    pub max_in_window: u32,
    /// Sliding window length in day-slots, ordered (date, role) across
    /// the whole calendar. The window never resets at week boundaries.
    pub window_len: usize,
    /// Partitions balanced independently.
    pub fairness_scopes: Vec<FairnessScope>,
    /// Role index pairs whose per-person counts may differ by at most 1.
    pub balanced_roles: Vec<(usize, usize)>,
    /// Envelope capacity policy.
    pub capacity_policy: CapacityPolicy,
    /// Wall-clock budget handed to the solver adapter. `None` = no limit.
    pub solver_timeout: Option<Duration>,
}

impl RosterConfig {
    /// Creates a configuration with the conventional on-call defaults:
    /// Friday+Saturday weekend, Primary/Secondary roles balanced against
    /// each other, at most 3 shifts in any 8 consecutive day-slots
    /// (four days at two roles), all three fairness scopes, nominal
    /// capacity, no solver timeout.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            weekend_policy: WeekendPolicy::default(),
            roles: RoleSet::primary_secondary(),
            max_in_window: 3,
            window_len: 8,
            fairness_scopes: vec![
                FairnessScope::Calendar,
                FairnessScope::Weekdays,
                FairnessScope::Weekends,
            ],
            balanced_roles: vec![(0, 1)],
            capacity_policy: CapacityPolicy::Nominal,
            solver_timeout: None,
        }
    }

    /// Replaces the role set and drops balanced pairs that no longer fit.
    pub fn with_roles(mut self, roles: RoleSet) -> Self {
        self.balanced_roles
            .retain(|&(a, b)| a < roles.len() && b < roles.len());
        self.roles = roles;
        self
    }

    /// Sets the weekend policy.
    pub fn with_weekend_policy(mut self, policy: WeekendPolicy) -> Self {
        self.weekend_policy = policy;
        self
    }

    /// Sets the consecutive-shift cap: at most `max` shifts in any
    /// `window` consecutive day-slots.
    pub fn with_window_cap(mut self, max: u32, window: usize) -> Self {
        self.max_in_window = max;
        self.window_len = window;
        self
    }

    /// Replaces the fairness scopes.
    pub fn with_fairness_scopes(mut self, scopes: Vec<FairnessScope>) -> Self {
        self.fairness_scopes = scopes;
        self
    }

    /// Replaces the balanced role pairs.
    pub fn with_balanced_roles(mut self, pairs: Vec<(usize, usize)>) -> Self {
        self.balanced_roles = pairs;
        self
    }

    /// Sets the envelope capacity policy.
    pub fn with_capacity_policy(mut self, policy: CapacityPolicy) -> Self {
        self.capacity_policy = policy;
        self
    }

    /// Sets the solver wall-clock budget.
    pub fn with_solver_timeout(mut self, timeout: Duration) -> Self {
        self.solver_timeout = Some(timeout);
        self
    }
}
