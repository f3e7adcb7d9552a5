//! The one-run scheduling pipeline.
//!
//! Wires the stages together in their only legal order: validate →
//! calendar → availability → formulation → solve → assembly. Each stage
//! consumes the previous stage's output, so invoking a later stage
//! without the earlier ones is unrepresentable rather than a runtime
//! check.
//!
//! Model construction is sequential and CPU-bound; the solve call is
//! the only potentially long-running step and is bounded by the
//! configured timeout. Each run owns its model and configuration, so
//! separate runs may proceed concurrently without synchronization.

use tracing::info;

use crate::assemble::{assemble, Roster};
use crate::availability::{resolve_availability, AvailabilityRecord};
use crate::error::RosterError;
use crate::formulation::RosterModelBuilder;
use crate::models::{RosterCalendar, RosterConfig};
use crate::solver::{SolverAdapter, SolverConfig};
use crate::validation::{validate_config, validate_records};

/// Runs one complete scheduling pass.
///
/// Fatal conditions (bad configuration, bad records, broken solver
/// output) surface as [`RosterError`]. Infeasible and Unknown outcomes
/// are *not* errors: they come back as an empty [`Roster`] carrying the
/// status, and the caller decides whether to relax the configuration
/// and retry as a brand-new run.
pub fn generate_roster<S: SolverAdapter>(
    config: &RosterConfig,
    records: &[AvailabilityRecord],
    solver: &S,
) -> Result<Roster, RosterError> {
    validate_config(config).map_err(RosterError::InvalidInput)?;

    let calendar = RosterCalendar::build(config.start, config.end, &config.weekend_policy)?;
    validate_records(records, calendar.week_count()).map_err(RosterError::InvalidInput)?;

    let people = resolve_availability(records, &calendar);
    info!(
        days = calendar.len(),
        weeks = calendar.week_count(),
        people = people.len(),
        roles = config.roles.len(),
        "roster inputs resolved"
    );

    let model = RosterModelBuilder::new(config, &calendar, &people).build();

    let solver_config = SolverConfig {
        timeout: config.solver_timeout,
    };
    let solution = solver.solve(&model, &solver_config);
    info!(status = ?solution.status, objective = solution.objective, "solve finished");

    assemble(&model, &calendar, &people, &config.roles, &solution)
}
