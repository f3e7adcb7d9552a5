//! Roster calendar model.
//!
//! Turns an inclusive date range into an ordered sequence of labeled
//! days: weekday index, weekend flag, and 1-based week number. Weeks
//! are contiguous runs of 7 days counted from the range start, so the
//! final week may be partial.
//!
//! # Weekend Policy
//! Which weekdays count as "weekend" is a policy choice, not a fact of
//! the calendar. On-call rotations often treat Friday+Saturday as the
//! weekend (the night before a day off is the busy one).

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::RosterError;

/// Which weekdays count as weekend for fairness purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekendPolicy {
    weekend_days: Vec<Weekday>,
}

impl WeekendPolicy {
    /// Friday + Saturday weekend (typical on-call semantics).
    pub fn fri_sat() -> Self {
        Self {
            weekend_days: vec![Weekday::Fri, Weekday::Sat],
        }
    }

    /// Saturday + Sunday weekend.
    pub fn sat_sun() -> Self {
        Self {
            weekend_days: vec![Weekday::Sat, Weekday::Sun],
        }
    }

    /// Custom weekend day set.
    pub fn custom(days: Vec<Weekday>) -> Self {
        Self { weekend_days: days }
    }

    /// Whether a weekday falls on the weekend under this policy.
    pub fn is_weekend(&self, weekday: Weekday) -> bool {
        self.weekend_days.contains(&weekday)
    }
}

impl Default for WeekendPolicy {
    fn default() -> Self {
        Self::fri_sat()
    }
}

/// One calendar day in the roster range.
///
/// Immutable once the calendar is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    /// Calendar date.
    pub date: NaiveDate,
    /// Day of week.
    pub weekday: Weekday,
    /// Whether this day is a weekend under the configured policy.
    pub is_weekend: bool,
    /// 1-based week number: days 0..6 from the range start are week 1.
    pub week_number: u32,
}

impl Day {
    /// Zero-based weekday index (0 = Monday … 6 = Sunday).
    #[inline]
    pub fn weekday_index(&self) -> u32 {
        self.weekday.num_days_from_monday()
    }
}

/// The ordered sequence of days covered by one scheduling run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterCalendar {
    days: Vec<Day>,
}

impl RosterCalendar {
    /// Builds the calendar for an inclusive date range.
    ///
    /// Deterministic, pure function of its inputs. Fails if `start`
    /// is after `end`.
    pub fn build(
        start: NaiveDate,
        end: NaiveDate,
        policy: &WeekendPolicy,
    ) -> Result<Self, RosterError> {
        if start > end {
            return Err(RosterError::EmptyDateRange { start, end });
        }

        let num_days = (end - start).num_days() + 1;
        let mut days = Vec::with_capacity(num_days as usize);
        for i in 0..num_days {
            let date = start + Duration::days(i);
            let weekday = date.weekday();
            days.push(Day {
                date,
                weekday,
                is_weekend: policy.is_weekend(weekday),
                week_number: (i / 7) as u32 + 1,
            });
        }

        Ok(Self { days })
    }

    /// All days in ascending date order.
    pub fn days(&self) -> &[Day] {
        &self.days
    }

    /// The day at a given index.
    pub fn day(&self, index: usize) -> &Day {
        &self.days[index]
    }

    /// Number of days in the range.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Whether the calendar holds no days (never true for a built calendar).
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Number of weeks spanned, counting a trailing partial week.
    pub fn week_count(&self) -> u32 {
        self.days.last().map(|d| d.week_number).unwrap_or(0)
    }

    /// Day indices belonging to a given 1-based week number.
    pub fn indices_in_week(&self, week_number: u32) -> Vec<usize> {
        self.days
            .iter()
            .enumerate()
            .filter(|(_, d)| d.week_number == week_number)
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of weekend days in the range.
    pub fn weekend_day_count(&self) -> usize {
        self.days.iter().filter(|d| d.is_weekend).count()
    }

    /// Number of non-weekend days in the range.
    pub fn weekday_day_count(&self) -> usize {
        self.days.len() - self.weekend_day_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_build_range() {
        // 2024-09-02 is a Monday
        let cal = RosterCalendar::build(
            date(2024, 9, 2),
            date(2024, 9, 15),
            &WeekendPolicy::fri_sat(),
        )
        .unwrap();

        assert_eq!(cal.len(), 14);
        assert_eq!(cal.day(0).date, date(2024, 9, 2));
        assert_eq!(cal.day(13).date, date(2024, 9, 15));
        assert_eq!(cal.day(0).weekday, Weekday::Mon);
        assert_eq!(cal.day(0).weekday_index(), 0);
        assert_eq!(cal.day(6).weekday_index(), 6); // Sunday
    }

    #[test]
    fn test_week_numbering() {
        let cal = RosterCalendar::build(
            date(2024, 9, 4), // Wednesday: weeks anchor on the start, not Monday
            date(2024, 9, 20),
            &WeekendPolicy::fri_sat(),
        )
        .unwrap();

        assert_eq!(cal.day(0).week_number, 1);
        assert_eq!(cal.day(6).week_number, 1);
        assert_eq!(cal.day(7).week_number, 2);
        assert_eq!(cal.day(13).week_number, 2);
        assert_eq!(cal.day(14).week_number, 3); // Partial final week
        assert_eq!(cal.week_count(), 3);
        assert_eq!(cal.indices_in_week(3), vec![14, 15, 16]);
    }

    #[test]
    fn test_weekend_policies() {
        let fri_sat = RosterCalendar::build(
            date(2024, 9, 2),
            date(2024, 9, 8),
            &WeekendPolicy::fri_sat(),
        )
        .unwrap();
        // Mon..Sun: Fri (idx 4) and Sat (idx 5) are weekend
        assert!(!fri_sat.day(3).is_weekend);
        assert!(fri_sat.day(4).is_weekend);
        assert!(fri_sat.day(5).is_weekend);
        assert!(!fri_sat.day(6).is_weekend);
        assert_eq!(fri_sat.weekend_day_count(), 2);
        assert_eq!(fri_sat.weekday_day_count(), 5);

        let sat_sun = RosterCalendar::build(
            date(2024, 9, 2),
            date(2024, 9, 8),
            &WeekendPolicy::sat_sun(),
        )
        .unwrap();
        assert!(!sat_sun.day(4).is_weekend);
        assert!(sat_sun.day(5).is_weekend);
        assert!(sat_sun.day(6).is_weekend);
    }

    #[test]
    fn test_single_day_range() {
        let cal = RosterCalendar::build(
            date(2024, 9, 2),
            date(2024, 9, 2),
            &WeekendPolicy::default(),
        )
        .unwrap();
        assert_eq!(cal.len(), 1);
        assert_eq!(cal.week_count(), 1);
    }

    #[test]
    fn test_reversed_range_rejected() {
        let err = RosterCalendar::build(
            date(2024, 9, 15),
            date(2024, 9, 2),
            &WeekendPolicy::default(),
        )
        .unwrap_err();
        assert!(matches!(err, RosterError::EmptyDateRange { .. }));
    }

    #[test]
    fn test_custom_weekend() {
        let policy = WeekendPolicy::custom(vec![Weekday::Sun]);
        let cal =
            RosterCalendar::build(date(2024, 9, 2), date(2024, 9, 8), &policy).unwrap();
        assert_eq!(cal.weekend_day_count(), 1);
        assert!(cal.day(6).is_weekend);
    }
}
