//! Fatal error types.
//!
//! Only genuinely fatal conditions live here: malformed configuration,
//! invalid input batches, and broken solver output. Model-level outcomes
//! (Infeasible, Unknown) are first-class results carried by
//! [`SolveStatus`](crate::solver::SolveStatus), never errors.

use chrono::NaiveDate;
use thiserror::Error;

use crate::validation::ValidationError;

/// Fatal rostering error.
#[derive(Error, Debug)]
pub enum RosterError {
    /// The configured date range contains no days.
    #[error("empty date range: start {start} is after end {end}")]
    EmptyDateRange { start: NaiveDate, end: NaiveDate },

    /// Configuration or input records failed validation.
    #[error("invalid roster input: {0:?}")]
    InvalidInput(Vec<ValidationError>),

    /// The solver reported a solution that breaks the coverage contract.
    #[error("malformed solver output: shift (day {day}, role {role}) has {assigned} assignees")]
    MalformedSolution {
        day: usize,
        role: usize,
        assigned: usize,
    },
}
