//! cronsched — five-field cron schedules.
//!
//! Parses `minute hour day-of-month month day-of-week` expressions into
//! per-field matchers and computes the next wall-clock minute satisfying
//! all five.
//!
//! # Examples
//!
//! ```
//! use cronsched::Schedule;
//!
//! let schedule: Schedule = "0 9 * * 1-5".parse().unwrap();
//! let now: jiff::Zoned = "2024-01-06T10:00:00+00:00[UTC]".parse().unwrap();
//! let next = schedule.next_occurrence_from(&now).unwrap();
//! assert_eq!(next.to_string(), "2024-01-08T09:00:00+00:00[UTC]");
//! ```

#[cfg(feature = "config")]
pub mod config;
pub mod display;
pub mod error;
pub mod eval;
pub mod field;
pub mod matcher;
pub mod parser;
pub mod schedule;

pub use error::{ScheduleError, Span};
pub use eval::{BoundedOccurrences, Occurrences};
pub use field::{Bounds, Field};
pub use matcher::Matcher;
pub use schedule::Schedule;

use jiff::civil::DateTime;
use jiff::Zoned;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// --- Schedule convenience methods ---

impl Schedule {
    /// Parse a five-field cron expression.
    pub fn parse(input: &str) -> Result<Self, ScheduleError> {
        parser::parse(input)
    }

    /// Check that `input` is a well-formed expression without keeping it.
    pub fn validate(input: &str) -> Result<(), ScheduleError> {
        parser::parse(input).map(|_| ())
    }

    /// First matching minute strictly after `reference`, on the civil clock.
    pub fn next_after(&self, reference: DateTime) -> Result<DateTime, ScheduleError> {
        eval::next_after(self, reference)
    }

    /// Next occurrence strictly after `now`, in `now`'s time zone.
    pub fn next_occurrence_from(&self, now: &Zoned) -> Result<Zoned, ScheduleError> {
        eval::next_from(self, now)
    }

    /// Next occurrence after the current system time.
    pub fn next_occurrence(&self) -> Result<Zoned, ScheduleError> {
        eval::next_from(self, &Zoned::now())
    }

    /// Compute the next `n` occurrences after `now`.
    pub fn next_n_from(&self, now: &Zoned, n: usize) -> Result<Vec<Zoned>, ScheduleError> {
        eval::next_n_from(self, now, n)
    }

    /// Returns a lazy iterator of occurrences starting after `from`.
    /// The iterator is unbounded for repeating schedules and ends after
    /// the first error.
    pub fn occurrences(&self, from: &Zoned) -> Occurrences<'_> {
        Occurrences::new(self, from.clone())
    }

    /// Returns a bounded iterator of occurrences where `from < occurrence <= to`.
    pub fn between(&self, from: &Zoned, to: &Zoned) -> BoundedOccurrences<'_> {
        eval::between(self, from, to)
    }

    /// Check if a datetime falls on a scheduled minute, using its wall clock.
    pub fn matches(&self, datetime: &Zoned) -> bool {
        eval::matches_datetime(self, datetime.datetime())
    }

    /// Check if a civil datetime falls on a scheduled minute.
    pub fn matches_datetime(&self, datetime: DateTime) -> bool {
        eval::matches_datetime(self, datetime)
    }
}

impl FromStr for Schedule {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Schedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(6))?;
        map.serialize_entry("expression", &self.to_string())?;
        map.serialize_entry("minute", &self.minute)?;
        map.serialize_entry("hour", &self.hour)?;
        map.serialize_entry("day_of_month", &self.day_of_month)?;
        map.serialize_entry("month", &self.month)?;
        map.serialize_entry("day_of_week", &self.day_of_week)?;
        map.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Schedule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Deserialize from the expression string
        let s = String::deserialize(deserializer)?;
        Schedule::parse(&s).map_err(serde::de::Error::custom)
    }
}
