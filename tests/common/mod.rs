//! Test support: a tiny exhaustive solver behind the adapter seam.
//!
//! The production crate never searches; tests need something that does.
//! This backtracking solver enumerates all feasible assignments of small
//! models (pruning with constraint bounds) and keeps the best objective,
//! so it returns provably optimal solutions — or Infeasible / Unknown —
//! through the same `SolverAdapter` contract a real solver would use.

use std::time::Instant;

use oncall_roster::formulation::RosterModel;
use oncall_roster::solver::{Solution, SolveStatus, SolverAdapter, SolverConfig};

/// Exhaustive backtracking solver for small test instances.
pub struct ExhaustiveSolver;

impl SolverAdapter for ExhaustiveSolver {
    fn solve(&self, model: &RosterModel, config: &SolverConfig) -> Solution {
        let deadline = config.timeout.map(|t| Instant::now() + t);
        let mut search = Search {
            model,
            deadline,
            timed_out: false,
            values: vec![false; model.var_count()],
            best: None,
        };
        search.descend(0);

        match search.best {
            Some((values, objective)) => {
                // A timeout mid-search means optimality is unproven
                let status = if search.timed_out {
                    SolveStatus::Feasible
                } else {
                    SolveStatus::Optimal
                };
                Solution::with_assignment(status, values, objective)
            }
            None if search.timed_out => Solution::unknown(),
            None => Solution::infeasible(),
        }
    }
}

struct Search<'a> {
    model: &'a RosterModel,
    deadline: Option<Instant>,
    timed_out: bool,
    values: Vec<bool>,
    best: Option<(Vec<bool>, i64)>,
}

impl Search<'_> {
    /// Assigns shifts in slot order, one person per shift.
    fn descend(&mut self, slot: usize) {
        if self.timed_out {
            return;
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                self.timed_out = true;
                return;
            }
        }

        if slot == self.model.slot_count() {
            let objective = self.model.objective_value(&self.values);
            if self.best.as_ref().map_or(true, |(_, b)| objective > *b) {
                self.best = Some((self.values.clone(), objective));
            }
            return;
        }

        let (day, role) = self.model.slot_day_role(slot);
        for person in 0..self.model.num_people {
            for q in 0..self.model.num_people {
                self.values[self.model.var(q, day, role)] = q == person;
            }
            if self.bounds_ok(slot + 1) {
                self.descend(slot + 1);
            }
        }
        for q in 0..self.model.num_people {
            self.values[self.model.var(q, day, role)] = false;
        }
    }

    /// Sound bound check: prunes a partial assignment only when no
    /// completion can land every constraint inside its band.
    fn bounds_ok(&self, decided_slots: usize) -> bool {
        let slot_count = self.model.slot_count();
        for c in &self.model.constraints {
            let mut sum = 0i64;
            let mut reachable_up = 0i64;
            let mut reachable_down = 0i64;
            for &(var, coef) in &c.terms {
                if var % slot_count < decided_slots {
                    if self.values[var] {
                        sum += coef;
                    }
                } else if coef > 0 {
                    reachable_up += coef;
                } else {
                    reachable_down += coef;
                }
            }
            if sum + reachable_up < c.min || sum + reachable_down > c.max {
                return false;
            }
        }
        true
    }
}
