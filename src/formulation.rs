//! Constraint formulation for the rostering problem.
//!
//! Translates the calendar, people, and configuration into a declarative
//! model for an external combinatorial solver: one boolean decision
//! variable per (person, day, role), a batch of banded linear
//! constraints, and a preference-weighted linear objective. The crate
//! never searches; it only states the problem precisely.
//!
//! # Constraints
//!
//! | Kind | Meaning |
//! |------|---------|
//! | `Coverage` | every (day, role) shift gets exactly one person |
//! | `Availability` | variables on a person's unavailable days are forced to 0 |
//! | `SingleRolePerDay` | a person holds at most one role per day |
//! | `Fairness` | per-person shift counts stay inside the `[floor, ceil]` envelope of each configured partition |
//! | `RoleBalance` | per-person counts of paired roles differ by at most 1 |
//! | `ConsecutiveCap` | at most `K` shifts in any `W` consecutive day-slots, sliding across the whole calendar |
//!
//! Day-slots are (day, role) pairs ordered by (date, role order). The
//! consecutive-cap window slides continuously across week boundaries;
//! there is no reset at week starts.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{CapacityPolicy, FairnessScope, Person, RosterCalendar, RosterConfig};

/// Classification of emitted constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintKind {
    /// Exactly one person per shift.
    Coverage,
    /// Forced zero on an unavailable day.
    Availability,
    /// At most one role per person per day.
    SingleRolePerDay,
    /// Per-partition fairness envelope.
    Fairness,
    /// Paired role counts within ±1.
    RoleBalance,
    /// Sliding-window consecutive-shift cap.
    ConsecutiveCap,
}

/// A banded linear constraint: `min <= sum(coef * var) <= max`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearConstraint {
    /// What rule this constraint encodes.
    pub kind: ConstraintKind,
    /// (variable index, coefficient) terms.
    pub terms: Vec<(usize, i64)>,
    /// Lower bound (inclusive).
    pub min: i64,
    /// Upper bound (inclusive).
    pub max: i64,
}

impl LinearConstraint {
    /// Evaluates the left-hand side against a 0/1 assignment.
    pub fn evaluate(&self, values: &[bool]) -> i64 {
        self.terms
            .iter()
            .map(|&(var, coef)| if values[var] { coef } else { 0 })
            .sum()
    }

    /// Whether the assignment satisfies this constraint.
    pub fn is_satisfied(&self, values: &[bool]) -> bool {
        let lhs = self.evaluate(values);
        self.min <= lhs && lhs <= self.max
    }
}

/// The declarative model handed to the solver adapter.
///
/// Variables are implicit: index `(person * num_days + day) * num_roles
/// + role`, all boolean. Owned by one run and discarded after assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterModel {
    /// Number of people.
    pub num_people: usize,
    /// Number of calendar days.
    pub num_days: usize,
    /// Number of roles.
    pub num_roles: usize,
    /// Hard constraint batch (C1–C6).
    pub constraints: Vec<LinearConstraint>,
    /// Maximize `sum(weight * var)` over these terms.
    pub objective: Vec<(usize, i64)>,
}

impl RosterModel {
    /// Variable index for a (person, day, role) triple.
    #[inline]
    pub fn var(&self, person: usize, day: usize, role: usize) -> usize {
        (person * self.num_days + day) * self.num_roles + role
    }

    /// Total number of decision variables.
    #[inline]
    pub fn var_count(&self) -> usize {
        self.num_people * self.num_days * self.num_roles
    }

    /// Number of day-slots (shifts) in the calendar.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.num_days * self.num_roles
    }

    /// Day-slot index for a (day, role) pair, ordered (date, role order).
    #[inline]
    pub fn slot(&self, day: usize, role: usize) -> usize {
        day * self.num_roles + role
    }

    /// Inverse of [`slot`](Self::slot).
    #[inline]
    pub fn slot_day_role(&self, slot: usize) -> (usize, usize) {
        (slot / self.num_roles, slot % self.num_roles)
    }

    /// Objective value of a 0/1 assignment.
    pub fn objective_value(&self, values: &[bool]) -> i64 {
        self.objective
            .iter()
            .map(|&(var, weight)| if values[var] { weight } else { 0 })
            .sum()
    }

    /// Constraints of one kind.
    pub fn constraints_of_kind(
        &self,
        kind: ConstraintKind,
    ) -> impl Iterator<Item = &LinearConstraint> {
        self.constraints.iter().filter(move |c| c.kind == kind)
    }

    /// Whether a 0/1 assignment satisfies every hard constraint.
    pub fn is_feasible(&self, values: &[bool]) -> bool {
        self.constraints.iter().all(|c| c.is_satisfied(values))
    }
}

/// Builds a [`RosterModel`] from domain objects.
///
/// Borrows the configuration, calendar, and people for the duration of
/// one run; `build` is a pure function of those inputs.
///
/// # Example
/// ```
/// use oncall_roster::formulation::RosterModelBuilder;
/// use oncall_roster::models::{Person, RosterCalendar, RosterConfig, WeekendPolicy};
/// use chrono::NaiveDate;
///
/// let config = RosterConfig::new(
///     NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 9, 15).unwrap(),
/// );
/// let calendar =
///     RosterCalendar::build(config.start, config.end, &config.weekend_policy).unwrap();
/// let people = vec![
///     Person::new("p1", "Avery"),
///     Person::new("p2", "Blake"),
///     Person::new("p3", "Carol"),
/// ];
///
/// let model = RosterModelBuilder::new(&config, &calendar, &people).build();
/// assert_eq!(model.var_count(), 3 * 14 * 2);
/// ```
pub struct RosterModelBuilder<'a> {
    config: &'a RosterConfig,
    calendar: &'a RosterCalendar,
    people: &'a [Person],
}

impl<'a> RosterModelBuilder<'a> {
    /// Creates a builder over validated inputs.
    pub fn new(
        config: &'a RosterConfig,
        calendar: &'a RosterCalendar,
        people: &'a [Person],
    ) -> Self {
        Self {
            config,
            calendar,
            people,
        }
    }

    /// Builds the full constraint batch and objective.
    pub fn build(&self) -> RosterModel {
        let mut model = RosterModel {
            num_people: self.people.len(),
            num_days: self.calendar.len(),
            num_roles: self.config.roles.len(),
            constraints: Vec::new(),
            objective: Vec::new(),
        };

        self.add_coverage(&mut model);
        self.add_availability(&mut model);
        self.add_single_role_per_day(&mut model);
        self.add_fairness(&mut model);
        self.add_role_balance(&mut model);
        self.add_window_cap(&mut model);
        self.add_objective(&mut model);

        debug!(
            variables = model.var_count(),
            constraints = model.constraints.len(),
            objective_terms = model.objective.len(),
            "roster model built"
        );

        model
    }

    /// C1: every shift has exactly one assignee.
    fn add_coverage(&self, model: &mut RosterModel) {
        for day in 0..model.num_days {
            for role in 0..model.num_roles {
                let terms = (0..model.num_people)
                    .map(|p| (model.var(p, day, role), 1))
                    .collect();
                model.constraints.push(LinearConstraint {
                    kind: ConstraintKind::Coverage,
                    terms,
                    min: 1,
                    max: 1,
                });
            }
        }
    }

    /// C2: variables on a person's unavailable days are forced to zero.
    fn add_availability(&self, model: &mut RosterModel) {
        for (p, person) in self.people.iter().enumerate() {
            for &day in &person.unavailable_days {
                for role in 0..model.num_roles {
                    model.constraints.push(LinearConstraint {
                        kind: ConstraintKind::Availability,
                        terms: vec![(model.var(p, day, role), 1)],
                        min: 0,
                        max: 0,
                    });
                }
            }
        }
    }

    /// C3: at most one role per person per day.
    fn add_single_role_per_day(&self, model: &mut RosterModel) {
        for p in 0..model.num_people {
            for day in 0..model.num_days {
                let terms = (0..model.num_roles)
                    .map(|role| (model.var(p, day, role), 1))
                    .collect();
                model.constraints.push(LinearConstraint {
                    kind: ConstraintKind::SingleRolePerDay,
                    terms,
                    min: 0,
                    max: 1,
                });
            }
        }
    }

    /// C4: per-partition fairness envelopes, one band per person.
    fn add_fairness(&self, model: &mut RosterModel) {
        for &scope in &self.config.fairness_scopes {
            let days = self.partition_days(scope);
            let envelopes = self.fairness_envelopes(&days, model.num_roles);

            for (p, &(low, high)) in envelopes.iter().enumerate() {
                let mut terms = Vec::with_capacity(days.len() * model.num_roles);
                for &day in &days {
                    for role in 0..model.num_roles {
                        terms.push((model.var(p, day, role), 1));
                    }
                }
                model.constraints.push(LinearConstraint {
                    kind: ConstraintKind::Fairness,
                    terms,
                    min: low,
                    max: high,
                });
            }
        }
    }

    /// C5: paired role counts within ±1, as a single two-sided band.
    fn add_role_balance(&self, model: &mut RosterModel) {
        for &(role_a, role_b) in &self.config.balanced_roles {
            for p in 0..model.num_people {
                let mut terms = Vec::with_capacity(model.num_days * 2);
                for day in 0..model.num_days {
                    terms.push((model.var(p, day, role_a), 1));
                    terms.push((model.var(p, day, role_b), -1));
                }
                model.constraints.push(LinearConstraint {
                    kind: ConstraintKind::RoleBalance,
                    terms,
                    min: -1,
                    max: 1,
                });
            }
        }
    }

    /// C6: at most `K` shifts in any `W` consecutive day-slots.
    ///
    /// Slots are ordered (date, role order) across the entire calendar,
    /// so every window that crosses a week boundary is emitted too.
    fn add_window_cap(&self, model: &mut RosterModel) {
        let window = self.config.window_len;
        let slots = model.slot_count();
        if window == 0 || slots < window {
            return;
        }

        for p in 0..model.num_people {
            for start in 0..=(slots - window) {
                let terms = (start..start + window)
                    .map(|s| {
                        let (day, role) = model.slot_day_role(s);
                        (model.var(p, day, role), 1)
                    })
                    .collect();
                model.constraints.push(LinearConstraint {
                    kind: ConstraintKind::ConsecutiveCap,
                    terms,
                    min: 0,
                    max: i64::from(self.config.max_in_window),
                });
            }
        }
    }

    /// Objective: +1 for every shift on one of the assignee's preferred
    /// days. Unavailable days never carry weight — their variables are
    /// already forced to zero and the preference is discarded.
    fn add_objective(&self, model: &mut RosterModel) {
        for (p, person) in self.people.iter().enumerate() {
            for day in 0..model.num_days {
                if !person.prefers(day) {
                    continue;
                }
                for role in 0..model.num_roles {
                    model.objective.push((model.var(p, day, role), 1));
                }
            }
        }
    }

    /// Day indices belonging to a fairness scope.
    fn partition_days(&self, scope: FairnessScope) -> Vec<usize> {
        self.calendar
            .days()
            .iter()
            .enumerate()
            .filter(|(_, d)| match scope {
                FairnessScope::Calendar => true,
                FairnessScope::Weekdays => !d.is_weekend,
                FairnessScope::Weekends => d.is_weekend,
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Per-person `[floor, ceil]` envelopes for one partition.
    ///
    /// Nominal: every person gets `[total/n, total/n (+1)]`. Available:
    /// each band is additionally capped at the person's reachable shift
    /// count in the partition (one per available day, since a person
    /// holds at most one role per day), and the upper capacity lost to
    /// caps is redistributed round-robin to uncapped people.
    fn fairness_envelopes(&self, days: &[usize], num_roles: usize) -> Vec<(i64, i64)> {
        let n = self.people.len();
        if n == 0 {
            return Vec::new();
        }

        let total = (days.len() * num_roles) as i64;
        let floor = total / n as i64;
        let ceil = if total % n as i64 == 0 { floor } else { floor + 1 };

        match self.config.capacity_policy {
            CapacityPolicy::Nominal => vec![(floor, ceil); n],
            CapacityPolicy::Available => {
                let caps: Vec<i64> = self
                    .people
                    .iter()
                    .map(|person| {
                        days.iter().filter(|&&d| !person.is_unavailable(d)).count() as i64
                    })
                    .collect();

                let mut lows: Vec<i64> = caps.iter().map(|&c| floor.min(c)).collect();
                let mut highs: Vec<i64> = caps.iter().map(|&c| ceil.min(c)).collect();

                // Capped people shed load; raise uncapped ceilings until
                // the partition can be covered again (or nobody can take more,
                // in which case the model is genuinely infeasible).
                let mut deficit = total - highs.iter().sum::<i64>();
                while deficit > 0 {
                    let mut progressed = false;
                    for (high, &cap) in highs.iter_mut().zip(&caps) {
                        if deficit > 0 && *high < cap {
                            *high += 1;
                            deficit -= 1;
                            progressed = true;
                        }
                    }
                    if !progressed {
                        break;
                    }
                }

                lows.iter_mut().zip(&highs).for_each(|(low, &high)| {
                    *low = (*low).min(high);
                });

                lows.into_iter().zip(highs).collect()
            }
        }
    }
}
