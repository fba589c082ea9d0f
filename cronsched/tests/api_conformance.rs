//! API conformance test — verifies the public `Schedule` surface.
//!
//! This is a compile-time + runtime check: if any method is missing, the code
//! won't compile. The runtime assertions verify return types.

use cronsched::{Field, Matcher, Schedule, ScheduleError};

#[test]
fn static_parse() {
    let result = Schedule::parse("0 9 * * *");
    assert!(result.is_ok());
}

#[test]
fn static_validate() {
    assert!(Schedule::validate("0 9 * * *").is_ok());
    assert!(Schedule::validate("not a schedule").is_err());
}

#[test]
fn from_str() {
    let result: Result<Schedule, ScheduleError> = "*/5 * * * *".parse();
    assert!(result.is_ok());
}

#[test]
fn instance_next_occurrence_from() {
    let schedule = Schedule::parse("0 9 * * *").unwrap();
    let now: jiff::Zoned = "2026-02-06T12:00:00+00:00[UTC]".parse().unwrap();
    let result: jiff::Zoned = schedule.next_occurrence_from(&now).unwrap();
    assert_eq!(result.to_string(), "2026-02-07T09:00:00+00:00[UTC]");
}

#[test]
fn instance_next_occurrence() {
    let schedule = Schedule::parse("* * * * *").unwrap();
    let before = jiff::Zoned::now();
    let result: jiff::Zoned = schedule.next_occurrence().unwrap();
    assert!(result > before);
}

#[test]
fn instance_next_after() {
    let schedule = Schedule::parse("0 9 * * *").unwrap();
    let reference: jiff::civil::DateTime = "2026-02-06T12:00:00".parse().unwrap();
    let result: jiff::civil::DateTime = schedule.next_after(reference).unwrap();
    assert_eq!(result.to_string(), "2026-02-07T09:00:00");
}

#[test]
fn instance_next_n_from() {
    let schedule = Schedule::parse("0 9 * * *").unwrap();
    let now: jiff::Zoned = "2026-02-06T12:00:00+00:00[UTC]".parse().unwrap();
    let results: Vec<jiff::Zoned> = schedule.next_n_from(&now, 3).unwrap();
    assert_eq!(results.len(), 3);
}

#[test]
fn instance_matches() {
    let schedule = Schedule::parse("0 9 * * *").unwrap();
    let dt: jiff::Zoned = "2026-02-07T09:00:00+00:00[UTC]".parse().unwrap();
    let result: bool = schedule.matches(&dt);
    assert!(result);
    let civil: jiff::civil::DateTime = "2026-02-07T09:01:00".parse().unwrap();
    assert!(!schedule.matches_datetime(civil));
}

#[test]
fn instance_to_string() {
    let schedule = Schedule::parse("0  9 * *   *").unwrap();
    let result: String = schedule.to_string();
    assert_eq!(result, "0 9 * * *");
}

#[test]
fn getters() {
    let schedule = Schedule::parse("0 9 1-5 * 1").unwrap();
    let minute: &Matcher = schedule.minute();
    assert_eq!(minute.first(), 0);
    assert_eq!(schedule.matcher(Field::DayOfMonth), schedule.day_of_month());
    assert_eq!(schedule.hour().to_string(), "9");
    assert_eq!(schedule.month().to_string(), "*");
    assert_eq!(schedule.day_of_week().to_string(), "1");
}

#[test]
fn error_display_rich() {
    let err = Schedule::parse("0 3 * 13 *").unwrap_err();
    assert!(err.is_parse_error());
    assert_eq!(
        err.display_rich(),
        "error: month value 13 out of range [1, 12]\n  0 3 * 13 *\n        ^^"
    );
}
