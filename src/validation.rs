//! Input validation for a scheduling run.
//!
//! Checks structural integrity of the configuration and the ingested
//! availability records before any model is built or solved. Detects:
//! - Duplicate person IDs
//! - An empty respondent batch
//! - An empty role set
//! - Balanced-role pairs referencing roles outside the set
//! - A degenerate consecutive-shift cap or window
//! - Week-column counts that disagree with the calendar
//! - No fairness scopes to balance
//!
//! All issues are collected and reported together; validation never
//! stops at the first problem.

use std::collections::HashSet;

use crate::availability::AvailabilityRecord;
use crate::models::RosterConfig;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two records share the same person ID.
    DuplicateId,
    /// No availability records were supplied.
    NoRespondents,
    /// The role set is empty.
    EmptyRoleSet,
    /// A balanced-role pair references a role outside the set.
    InvalidRoleReference,
    /// The cap or window length cannot constrain anything.
    InvalidWindow,
    /// A record's week-column count disagrees with the calendar.
    WeekColumnMismatch,
    /// No fairness scopes are configured.
    NoFairnessScopes,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the run configuration.
///
/// The date range itself is checked by the calendar builder; everything
/// else about the configuration is checked here.
pub fn validate_config(config: &RosterConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if config.roles.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyRoleSet,
            "role set has no roles",
        ));
    }

    for &(a, b) in &config.balanced_roles {
        if a >= config.roles.len() || b >= config.roles.len() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidRoleReference,
                format!(
                    "balanced pair ({a}, {b}) references a role outside the {}-role set",
                    config.roles.len()
                ),
            ));
        }
    }

    if config.window_len == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidWindow,
            "window length must be at least 1 day-slot",
        ));
    }
    if config.max_in_window == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidWindow,
            "consecutive-shift cap must be at least 1",
        ));
    }

    if config.fairness_scopes.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoFairnessScopes,
            "at least one fairness scope is required",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates an ingested record batch against the calendar's week count.
pub fn validate_records(records: &[AvailabilityRecord], week_count: u32) -> ValidationResult {
    let mut errors = Vec::new();

    if records.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoRespondents,
            "no availability records supplied",
        ));
    }

    let mut seen = HashSet::new();
    for record in records {
        if !seen.insert(record.person_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("duplicate person ID: {}", record.person_id),
            ));
        }

        for (label, lists) in [
            ("availability", &record.available_by_week),
            ("unavailability", &record.unavailable_by_week),
        ] {
            if lists.len() as u32 > week_count {
                errors.push(ValidationError::new(
                    ValidationErrorKind::WeekColumnMismatch,
                    format!(
                        "person '{}' has {} {label} week-columns but the calendar spans {} weeks",
                        record.person_id,
                        lists.len(),
                        week_count
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
