//! End-to-end pipeline tests: raw records through the exhaustive test
//! solver to an assembled roster, asserting the invariants every
//! produced roster must satisfy (coverage, availability, single role
//! per day, fairness envelopes, role balance, the sliding consecutive
//! cap, and objective correctness).

mod common;

use chrono::NaiveDate;
use common::ExhaustiveSolver;
use oncall_roster::assemble::Roster;
use oncall_roster::availability::{resolve_availability, AvailabilityRecord};
use oncall_roster::models::{
    CapacityPolicy, Person, RoleSet, RosterCalendar, RosterConfig,
};
use oncall_roster::pipeline::generate_roster;
use oncall_roster::solver::SolveStatus;
use std::time::Duration;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Coverage: every (day, role) shift staffed exactly once.
fn assert_coverage(roster: &Roster, num_days: usize, num_roles: usize) {
    assert_eq!(roster.shift_count(), num_days * num_roles);
    for day in 0..num_days {
        for role in 0..num_roles {
            let staffed = roster
                .assignments
                .iter()
                .filter(|a| a.day_index == day && a.role_index == role)
                .count();
            assert_eq!(staffed, 1, "shift (day {day}, role {role}) staffed {staffed} times");
        }
    }
}

/// Availability: nobody works a day they declared unavailable.
fn assert_availability(roster: &Roster, people: &[Person]) {
    for person in people {
        for a in roster.assignments_for_person(&person.id) {
            assert!(
                !person.is_unavailable(a.day_index),
                "{} assigned on unavailable day {}",
                person.id,
                a.day_index
            );
        }
    }
}

/// No double-role: at most one role per person per day.
fn assert_single_role_per_day(roster: &Roster, people: &[Person], num_days: usize) {
    for person in people {
        for day in 0..num_days {
            let held = roster
                .assignments_for_person(&person.id)
                .iter()
                .filter(|a| a.day_index == day)
                .count();
            assert!(held <= 1, "{} holds {held} roles on day {day}", person.id);
        }
    }
}

/// Consecutive cap: at most `max` shifts in any `window` consecutive
/// day-slots, sliding across the whole calendar.
fn assert_window_cap(
    roster: &Roster,
    people: &[Person],
    num_days: usize,
    num_roles: usize,
    max: usize,
    window: usize,
) {
    let slots: Vec<&str> = (0..num_days * num_roles)
        .map(|slot| {
            roster
                .assignment_for(slot / num_roles, slot % num_roles)
                .map(|a| a.person_id.as_str())
                .unwrap()
        })
        .collect();

    for person in people {
        for start in 0..slots.len().saturating_sub(window - 1) {
            let held = slots[start..start + window]
                .iter()
                .filter(|&&id| id == person.id)
                .count();
            assert!(
                held <= max,
                "{} holds {held} shifts in window starting at slot {start}",
                person.id
            );
        }
    }
}

/// Objective correctness: the reported score equals the count of
/// assigned shifts whose day the assignee prefers.
fn assert_preference_score(roster: &Roster, people: &[Person]) {
    let recomputed: i64 = people
        .iter()
        .map(|person| {
            roster
                .assignments_for_person(&person.id)
                .iter()
                .filter(|a| person.prefers(a.day_index))
                .count() as i64
        })
        .sum();
    assert_eq!(roster.preference_score, recomputed);
}

#[test]
fn three_people_one_week_single_role() {
    // 7 shifts over 3 people: fairness envelope [2, 3]; must be solvable.
    let config = RosterConfig::new(date(2024, 9, 2), date(2024, 9, 8))
        .with_roles(RoleSet::single("Duty"))
        .with_window_cap(3, 4);
    let records = vec![
        AvailabilityRecord::new("p1", "Avery"),
        AvailabilityRecord::new("p2", "Blake"),
        AvailabilityRecord::new("p3", "Carol"),
    ];
    let calendar =
        RosterCalendar::build(config.start, config.end, &config.weekend_policy).unwrap();
    let people = resolve_availability(&records, &calendar);

    let roster = generate_roster(&config, &records, &ExhaustiveSolver).unwrap();
    assert_eq!(roster.status, SolveStatus::Optimal);

    assert_coverage(&roster, 7, 1);
    assert_availability(&roster, &people);
    assert_window_cap(&roster, &people, 7, 1, 3, 4);
    for summary in &roster.summaries {
        assert!(
            (2..=3).contains(&summary.total_shifts),
            "{} outside envelope: {}",
            summary.person_id,
            summary.total_shifts
        );
    }
}

#[test]
fn fully_unavailable_person_with_available_capacity() {
    // Person A cannot work at all; under the Available capacity policy
    // their envelope collapses to [0, 0] and B absorbs every shift.
    let config = RosterConfig::new(date(2024, 9, 2), date(2024, 9, 5))
        .with_roles(RoleSet::single("Duty"))
        .with_window_cap(4, 4)
        .with_capacity_policy(CapacityPolicy::Available);
    let records = vec![
        AvailabilityRecord::new("a", "Avery")
            .with_unavailable_week(Some("Monday;Tuesday;Wednesday;Thursday")),
        AvailabilityRecord::new("b", "Blake"),
    ];
    let calendar =
        RosterCalendar::build(config.start, config.end, &config.weekend_policy).unwrap();
    let people = resolve_availability(&records, &calendar);

    let roster = generate_roster(&config, &records, &ExhaustiveSolver).unwrap();
    assert!(roster.is_solved());
    assert_coverage(&roster, 4, 1);
    assert_availability(&roster, &people);
    assert_eq!(roster.summary_for("a").unwrap().total_shifts, 0);
    assert_eq!(roster.summary_for("b").unwrap().total_shifts, 4);
}

#[test]
fn fully_unavailable_person_with_nominal_capacity() {
    // Same instance under Nominal capacity: the even split demands two
    // shifts of a person who can take none. Infeasible, and surfaced as
    // a status rather than an error.
    let config = RosterConfig::new(date(2024, 9, 2), date(2024, 9, 5))
        .with_roles(RoleSet::single("Duty"))
        .with_window_cap(4, 4)
        .with_capacity_policy(CapacityPolicy::Nominal);
    let records = vec![
        AvailabilityRecord::new("a", "Avery")
            .with_unavailable_week(Some("Monday;Tuesday;Wednesday;Thursday")),
        AvailabilityRecord::new("b", "Blake"),
    ];

    let roster = generate_roster(&config, &records, &ExhaustiveSolver).unwrap();
    assert_eq!(roster.status, SolveStatus::Infeasible);
    assert!(roster.assignments.is_empty());
    assert!(roster.summaries.is_empty());
}

#[test]
fn window_cap_slides_across_week_boundary() {
    // 9 days spans the day-7 week boundary; the cap must hold for every
    // window, including those straddling it.
    let config = RosterConfig::new(date(2024, 9, 2), date(2024, 9, 10))
        .with_roles(RoleSet::single("Duty"))
        .with_window_cap(3, 4);
    let records = vec![
        AvailabilityRecord::new("p1", "Avery"),
        AvailabilityRecord::new("p2", "Blake"),
    ];
    let calendar =
        RosterCalendar::build(config.start, config.end, &config.weekend_policy).unwrap();
    let people = resolve_availability(&records, &calendar);

    let roster = generate_roster(&config, &records, &ExhaustiveSolver).unwrap();
    assert!(roster.is_solved());
    assert_coverage(&roster, 9, 1);
    assert_window_cap(&roster, &people, 9, 1, 3, 4);
}

#[test]
fn two_roles_balance_and_single_role_per_day() {
    // 3 days at two roles over 3 people: everyone lands on 2 shifts with
    // per-role counts within ±1, and nobody doubles up within a day.
    let config = RosterConfig::new(date(2024, 9, 2), date(2024, 9, 4)).with_window_cap(3, 4);
    let records = vec![
        AvailabilityRecord::new("p1", "Avery"),
        AvailabilityRecord::new("p2", "Blake"),
        AvailabilityRecord::new("p3", "Carol"),
    ];
    let calendar =
        RosterCalendar::build(config.start, config.end, &config.weekend_policy).unwrap();
    let people = resolve_availability(&records, &calendar);

    let roster = generate_roster(&config, &records, &ExhaustiveSolver).unwrap();
    assert!(roster.is_solved());
    assert_coverage(&roster, 3, 2);
    assert_single_role_per_day(&roster, &people, 3);
    assert_window_cap(&roster, &people, 3, 2, 3, 4);
    for summary in &roster.summaries {
        assert_eq!(summary.total_shifts, 2);
        let diff =
            i64::from(summary.shifts_per_role[0]) - i64::from(summary.shifts_per_role[1]);
        assert!(diff.abs() <= 1, "{} role imbalance {diff}", summary.person_id);
    }
}

#[test]
fn preferences_maximized_and_conflict_discarded() {
    // Avery prefers Mon-Wed and also Saturday — but is unavailable
    // Saturday, so that preference is void. The optimal roster grants
    // the three weekday preferences and never schedules Avery on
    // Saturday.
    let config = RosterConfig::new(date(2024, 9, 2), date(2024, 9, 8))
        .with_roles(RoleSet::single("Duty"))
        .with_window_cap(3, 4);
    let records = vec![
        AvailabilityRecord::new("a", "Avery")
            .with_available_week(Some("Monday;Tuesday;Wednsday;Saturday"))
            .with_unavailable_week(Some("Saturday")),
        AvailabilityRecord::new("b", "Blake"),
    ];
    let calendar =
        RosterCalendar::build(config.start, config.end, &config.weekend_policy).unwrap();
    let people = resolve_availability(&records, &calendar);

    let roster = generate_roster(&config, &records, &ExhaustiveSolver).unwrap();
    assert_eq!(roster.status, SolveStatus::Optimal);
    assert_coverage(&roster, 7, 1);
    assert_availability(&roster, &people);
    assert_preference_score(&roster, &people);

    // Saturday is day 5: void preference, hard exclusion
    assert_ne!(
        roster.assignment_for(5, 0).unwrap().person_id,
        "a",
        "assigned on an unavailable day"
    );
    // All three real preferences are grantable and granted
    assert_eq!(roster.preference_score, 3);
    assert_eq!(roster.summary_for("a").unwrap().preferred_granted, 3);
}

#[test]
fn impossible_coverage_surfaces_infeasible() {
    // One person, unavailable on one of two days: coverage cannot hold.
    let config = RosterConfig::new(date(2024, 9, 2), date(2024, 9, 3))
        .with_roles(RoleSet::single("Duty"));
    let records = vec![
        AvailabilityRecord::new("only", "Only One").with_unavailable_week(Some("Monday"))
    ];

    let roster = generate_roster(&config, &records, &ExhaustiveSolver).unwrap();
    assert_eq!(roster.status, SolveStatus::Infeasible);
    assert!(!roster.is_solved());
    assert!(roster.assignments.is_empty());
}

#[test]
fn exhausted_time_budget_surfaces_unknown() {
    let config = RosterConfig::new(date(2024, 9, 2), date(2024, 9, 15))
        .with_solver_timeout(Duration::ZERO);
    let records = vec![
        AvailabilityRecord::new("p1", "Avery"),
        AvailabilityRecord::new("p2", "Blake"),
        AvailabilityRecord::new("p3", "Carol"),
    ];

    let roster = generate_roster(&config, &records, &ExhaustiveSolver).unwrap();
    assert_eq!(roster.status, SolveStatus::Unknown);
    assert!(roster.assignments.is_empty());
}

#[test]
fn weekend_fairness_balanced_separately() {
    // Two full weeks, single role: 4 weekend shifts (Fri+Sat policy)
    // over 2 people means exactly 2 weekend shifts each — aggregate
    // balance alone would allow 4/0.
    let config = RosterConfig::new(date(2024, 9, 2), date(2024, 9, 15))
        .with_roles(RoleSet::single("Duty"))
        .with_window_cap(3, 4);
    let records = vec![
        AvailabilityRecord::new("p1", "Avery"),
        AvailabilityRecord::new("p2", "Blake"),
    ];

    let roster = generate_roster(&config, &records, &ExhaustiveSolver).unwrap();
    assert!(roster.is_solved());
    for summary in &roster.summaries {
        assert_eq!(summary.total_shifts, 7);
        assert_eq!(summary.weekend_shifts, 2);
        assert_eq!(summary.weekday_shifts, 5);
    }
}
