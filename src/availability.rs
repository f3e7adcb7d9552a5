//! Availability resolution.
//!
//! Maps each person's raw weekly day-name declarations onto calendar
//! day indices. Each week's declaration is independent: "Monday" in the
//! week-2 list marks only the Monday that falls in week 2 of the range.
//!
//! # Tolerance
//! Day names come from free-text form responses, so normalization
//! accepts mixed case, surrounding whitespace, three-letter
//! abbreviations, and observed misspellings of "Wednesday". A token
//! that still cannot be resolved is skipped with a warning rather than
//! rejecting the whole record.
//!
//! # Precedence
//! A day declared both preferred and unavailable is excluded: the
//! preference is discarded for that day.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::warn;

use crate::models::{Person, RosterCalendar};

/// One person's raw form response, one optional day-name list per week.
///
/// Produced by an external ingestion collaborator. Lists are
/// semicolon-separated weekday names; `None` means the week's question
/// was left blank.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AvailabilityRecord {
    /// Unique person identifier.
    pub person_id: String,
    /// Display name.
    pub display_name: String,
    /// Preferred-day lists, indexed by week (week 1 first).
    pub available_by_week: Vec<Option<String>>,
    /// Unavailable-day lists, indexed by week (week 1 first).
    pub unavailable_by_week: Vec<Option<String>>,
}

impl AvailabilityRecord {
    /// Creates an empty record for a person.
    pub fn new(person_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            person_id: person_id.into(),
            display_name: display_name.into(),
            available_by_week: Vec::new(),
            unavailable_by_week: Vec::new(),
        }
    }

    /// Appends one week's preferred-day list.
    pub fn with_available_week(mut self, list: Option<&str>) -> Self {
        self.available_by_week.push(list.map(str::to_owned));
        self
    }

    /// Appends one week's unavailable-day list.
    pub fn with_unavailable_week(mut self, list: Option<&str>) -> Self {
        self.unavailable_by_week.push(list.map(str::to_owned));
        self
    }
}

/// Normalizes a raw day-name token to a weekday.
///
/// Accepts full names, three-letter abbreviations, and common
/// misspellings ("Wednsday", "Wendsday"). Case- and
/// whitespace-insensitive. Returns `None` for anything else.
pub fn parse_weekday(token: &str) -> Option<Weekday> {
    match token.trim().to_ascii_lowercase().as_str() {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" | "tues" => Some(Weekday::Tue),
        "wednesday" | "wednsday" | "wendsday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" | "thurs" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Resolves raw records into people with calendar day-index sets.
///
/// For every week in range, each named weekday is intersected with the
/// days belonging to that week number. Unavailability wins over
/// preference on conflicting days. Output order follows input order.
pub fn resolve_availability(
    records: &[AvailabilityRecord],
    calendar: &RosterCalendar,
) -> Vec<Person> {
    records
        .iter()
        .map(|record| {
            let preferred = resolve_day_lists(&record.available_by_week, calendar, record);
            let unavailable = resolve_day_lists(&record.unavailable_by_week, calendar, record);

            // Unavailability is a hard fact; drop conflicting preferences
            let preferred: BTreeSet<usize> =
                preferred.difference(&unavailable).copied().collect();

            Person {
                id: record.person_id.clone(),
                name: record.display_name.clone(),
                preferred_days: preferred,
                unavailable_days: unavailable,
            }
        })
        .collect()
}

/// Maps one per-week list stack to calendar day indices.
fn resolve_day_lists(
    lists: &[Option<String>],
    calendar: &RosterCalendar,
    record: &AvailabilityRecord,
) -> BTreeSet<usize> {
    let mut days = BTreeSet::new();

    for (week_offset, list) in lists.iter().enumerate() {
        let Some(list) = list else { continue };
        let week_number = week_offset as u32 + 1;
        let week_indices = calendar.indices_in_week(week_number);

        for token in list.split(';') {
            if token.trim().is_empty() {
                continue;
            }
            let Some(weekday) = parse_weekday(token) else {
                warn!(
                    person = %record.person_id,
                    week = week_number,
                    token = token.trim(),
                    "unresolvable weekday name skipped"
                );
                continue;
            };
            for &i in &week_indices {
                if calendar.day(i).weekday == weekday {
                    days.insert(i);
                }
            }
        }
    }

    days
}
