//! Solver adapter boundary.
//!
//! The combinatorial search itself is an external collaborator. This
//! module defines the seam: a trait accepting the declared variables,
//! constraints, and objective, and the result types it must return.
//!
//! Infeasible and Unknown are valid terminal outcomes of a well-formed
//! run, not failures — callers decide whether to relax configuration
//! and retry as a brand-new run. The core never retries.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::formulation::RosterModel;

/// Terminal status of one solve call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    /// A provably objective-maximal assignment was found.
    Optimal,
    /// A feasible assignment was found; optimality unproven.
    Feasible,
    /// No assignment satisfies all hard constraints.
    Infeasible,
    /// The time budget expired before feasibility was decided.
    Unknown,
}

impl SolveStatus {
    /// Whether this status carries a concrete assignment.
    #[inline]
    pub fn has_assignment(self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

/// Solver execution parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Wall-clock budget. The adapter must return [`SolveStatus::Unknown`]
    /// once it expires rather than hang. `None` = no limit.
    pub timeout: Option<Duration>,
}

impl SolverConfig {
    /// No timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the wall-clock budget.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// The outcome of one solve call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    /// Terminal status.
    pub status: SolveStatus,
    /// Per-variable 0/1 values, indexed like the model's variables.
    /// Empty unless `status.has_assignment()`.
    pub values: Vec<bool>,
    /// Objective value of `values` (0 when no assignment).
    pub objective: i64,
}

impl Solution {
    /// A solution carrying a concrete assignment.
    pub fn with_assignment(status: SolveStatus, values: Vec<bool>, objective: i64) -> Self {
        Self {
            status,
            values,
            objective,
        }
    }

    /// The infeasible outcome.
    pub fn infeasible() -> Self {
        Self {
            status: SolveStatus::Infeasible,
            values: Vec::new(),
            objective: 0,
        }
    }

    /// The timed-out outcome.
    pub fn unknown() -> Self {
        Self {
            status: SolveStatus::Unknown,
            values: Vec::new(),
            objective: 0,
        }
    }

    /// Whether a concrete assignment is available.
    #[inline]
    pub fn is_solution_found(&self) -> bool {
        self.status.has_assignment()
    }
}

/// External solver seam.
///
/// Implementations receive the full declarative model as a batch and
/// block until done or until the configured budget expires. The core
/// treats the call as opaque; separate runs share no state, so distinct
/// models may be solved concurrently without synchronization.
pub trait SolverAdapter {
    /// Solves the model, honoring `config.timeout` if set.
    fn solve(&self, model: &RosterModel, config: &SolverConfig) -> Solution;
}
