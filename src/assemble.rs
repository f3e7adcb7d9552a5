//! Roster assembly.
//!
//! Decodes a solver assignment back into the domain: a per-day,
//! per-role roster table plus per-person summary statistics for
//! reporting. Infeasible and Unknown outcomes assemble into an empty
//! roster carrying the status — never a panic or an error.
//!
//! Coverage guarantees each shift has exactly one assignee; a solution
//! violating that is a broken solver contract and is surfaced as
//! [`RosterError::MalformedSolution`].

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::RosterError;
use crate::formulation::RosterModel;
use crate::models::{Person, RoleSet, RosterCalendar};
use crate::solver::{Solution, SolveStatus};

/// One staffed shift in the final roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftAssignment {
    /// Calendar day index.
    pub day_index: usize,
    /// Calendar date (denormalized for reporting).
    pub date: chrono::NaiveDate,
    /// 1-based week number.
    pub week_number: u32,
    /// Role index within the run's role set.
    pub role_index: usize,
    /// Role name (denormalized for reporting).
    pub role: String,
    /// Assignee identifier.
    pub person_id: String,
    /// Assignee display name.
    pub person_name: String,
}

/// Per-person shift statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonSummary {
    /// Person identifier.
    pub person_id: String,
    /// Display name.
    pub name: String,
    /// Total assigned shifts.
    pub total_shifts: u32,
    /// Shifts on non-weekend days.
    pub weekday_shifts: u32,
    /// Shifts on weekend days.
    pub weekend_shifts: u32,
    /// Shift counts per role, in role order.
    pub shifts_per_role: Vec<u32>,
    /// Assigned shifts falling on a declared preferred day.
    pub preferred_granted: u32,
}

/// The result of one scheduling run.
///
/// Constructed exactly once from the solver's output and never mutated
/// afterward. When `status` carries no assignment the roster is empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    /// Terminal solve status.
    pub status: SolveStatus,
    /// Staffed shifts in (date, role order).
    pub assignments: Vec<ShiftAssignment>,
    /// Per-person statistics, in person order.
    pub summaries: Vec<PersonSummary>,
    /// Total preferred-day shifts granted (the maximized objective).
    pub preference_score: i64,
}

impl Roster {
    /// Whether the run produced a concrete roster.
    pub fn is_solved(&self) -> bool {
        self.status.has_assignment()
    }

    /// Number of staffed shifts.
    pub fn shift_count(&self) -> usize {
        self.assignments.len()
    }

    /// The assignment for a given (day, role), if the roster is solved.
    pub fn assignment_for(&self, day_index: usize, role_index: usize) -> Option<&ShiftAssignment> {
        self.assignments
            .iter()
            .find(|a| a.day_index == day_index && a.role_index == role_index)
    }

    /// All shifts held by one person.
    pub fn assignments_for_person(&self, person_id: &str) -> Vec<&ShiftAssignment> {
        self.assignments
            .iter()
            .filter(|a| a.person_id == person_id)
            .collect()
    }

    /// The summary row for one person.
    pub fn summary_for(&self, person_id: &str) -> Option<&PersonSummary> {
        self.summaries.iter().find(|s| s.person_id == person_id)
    }
}

/// Decodes a solve outcome into a [`Roster`].
///
/// On Optimal/Feasible, finds the unique assignee of every shift and
/// aggregates per-person counts. On Infeasible/Unknown, returns an
/// empty roster with the status.
pub fn assemble(
    model: &RosterModel,
    calendar: &RosterCalendar,
    people: &[Person],
    roles: &RoleSet,
    solution: &Solution,
) -> Result<Roster, RosterError> {
    if !solution.is_solution_found() {
        info!(status = ?solution.status, "no assignment to assemble");
        return Ok(Roster {
            status: solution.status,
            assignments: Vec::new(),
            summaries: Vec::new(),
            preference_score: 0,
        });
    }

    let mut assignments = Vec::with_capacity(model.slot_count());
    let mut summaries: Vec<PersonSummary> = people
        .iter()
        .map(|p| PersonSummary {
            person_id: p.id.clone(),
            name: p.name.clone(),
            total_shifts: 0,
            weekday_shifts: 0,
            weekend_shifts: 0,
            shifts_per_role: vec![0; roles.len()],
            preferred_granted: 0,
        })
        .collect();

    for day in 0..model.num_days {
        for role in 0..model.num_roles {
            let assignees: Vec<usize> = (0..model.num_people)
                .filter(|&p| solution.values[model.var(p, day, role)])
                .collect();
            let &[p] = assignees.as_slice() else {
                return Err(RosterError::MalformedSolution {
                    day,
                    role,
                    assigned: assignees.len(),
                });
            };

            let cal_day = calendar.day(day);
            assignments.push(ShiftAssignment {
                day_index: day,
                date: cal_day.date,
                week_number: cal_day.week_number,
                role_index: role,
                role: roles.name(role).to_string(),
                person_id: people[p].id.clone(),
                person_name: people[p].name.clone(),
            });

            let summary = &mut summaries[p];
            summary.total_shifts += 1;
            if cal_day.is_weekend {
                summary.weekend_shifts += 1;
            } else {
                summary.weekday_shifts += 1;
            }
            summary.shifts_per_role[role] += 1;
            if people[p].prefers(day) {
                summary.preferred_granted += 1;
            }
        }
    }

    let preference_score = summaries
        .iter()
        .map(|s| i64::from(s.preferred_granted))
        .sum();

    info!(
        status = ?solution.status,
        shifts = assignments.len(),
        preference_score,
        "roster assembled"
    );

    Ok(Roster {
        status: solution.status,
        assignments,
        summaries,
        preference_score,
    })
}
