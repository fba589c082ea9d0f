//! Next-occurrence engine.
//!
//! Minute, hour, day of month and month are advanced in that order, each
//! field absorbing the carry owed by the one below it. Day of week is not
//! advanced at all: it filters the resulting candidate, and a rejected
//! candidate restarts the search at midnight of the following day.

use jiff::civil::{Date, DateTime, Time};
use jiff::{Span, Zoned};
use tracing::{debug, trace, warn};

use crate::error::ScheduleError;
use crate::schedule::Schedule;

/// Searches give up once the candidate is this far past the reference.
pub const SEARCH_HORIZON_YEARS: i16 = 10;

/// Calendar position over the advanced fields. `month0` is zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursor {
    year: i16,
    month0: u8,
    day: u8,
    hour: u8,
    minute: u8,
}

impl Cursor {
    fn from_datetime(dt: DateTime) -> Self {
        Self {
            year: dt.year(),
            month0: (dt.month() - 1) as u8,
            day: dt.day() as u8,
            hour: dt.hour() as u8,
            minute: dt.minute() as u8,
        }
    }

    /// `None` when the day does not exist in the month (e.g. 31 April).
    fn to_datetime(self) -> Option<DateTime> {
        let date = Date::new(self.year, self.month0 as i8 + 1, self.day as i8).ok()?;
        let time = Time::new(self.hour as i8, self.minute as i8, 0, 0).ok()?;
        Some(date.to_datetime(time))
    }
}

/// First whole minute strictly after `reference`.
fn minute_after(reference: DateTime) -> Result<DateTime, ScheduleError> {
    reference
        .date()
        .at(reference.hour(), reference.minute(), 0, 0)
        .checked_add(Span::new().minutes(1))
        .map_err(|e| ScheduleError::eval(format!("reference {reference} out of range: {e}")))
}

/// One carry-propagating pass over minute, hour, day of month and month.
///
/// The result is at or after `from` but may name a day that does not exist
/// in its month.
fn advance(schedule: &Schedule, from: Cursor) -> Cursor {
    let mut next = from;

    let c = from.minute;
    next.minute = schedule.minute.next(c);
    let carry = u8::from(!schedule.minute.has_next(c));

    let c = from.hour + carry;
    next.hour = schedule.hour.next(c);
    let carry = u8::from(!schedule.hour.has_next(c));
    if next.hour != from.hour {
        next.minute = schedule.minute.first();
    }

    let c = from.day + carry;
    next.day = schedule.day_of_month.next(c);
    // Lifts the zero-based month into the matcher's one-based range, plus one
    // more when the day wrapped.
    let carry = if schedule.day_of_month.has_next(c) { 1 } else { 2 };
    if next.day != from.day {
        next.hour = schedule.hour.first();
        next.minute = schedule.minute.first();
    }

    let c = from.month0 + carry;
    next.month0 = schedule.month.next(c) - 1;
    if !schedule.month.has_next(c) {
        next.year += 1;
    }
    if next.month0 != from.month0 || next.year != from.year {
        next.day = schedule.day_of_month.first();
        next.hour = schedule.hour.first();
        next.minute = schedule.minute.first();
    }

    next
}

/// Midnight of the first day after `candidate` worth trying again.
fn retry_point(candidate: Cursor) -> Result<DateTime, ScheduleError> {
    let day = match candidate.to_datetime() {
        Some(dt) => dt.date().tomorrow(),
        None => Date::new(candidate.year, candidate.month0 as i8 + 1, 1)
            .and_then(|first| first.last_of_month().tomorrow()),
    };
    day.map(|d| d.to_datetime(Time::midnight()))
        .map_err(|e| ScheduleError::eval(format!("date out of range: {e}")))
}

fn unreachable(schedule: &Schedule, reference: DateTime) -> ScheduleError {
    warn!(%schedule, %reference, "schedule has no reachable occurrence");
    ScheduleError::unreachable(format!(
        "schedule '{schedule}' has no occurrence within {SEARCH_HORIZON_YEARS} years of {reference}"
    ))
}

/// Compute the first minute strictly after `reference` that satisfies every
/// field of `schedule`, on the wall clock.
pub fn next_after(schedule: &Schedule, reference: DateTime) -> Result<DateTime, ScheduleError> {
    let horizon = reference
        .checked_add(Span::new().years(SEARCH_HORIZON_YEARS))
        .unwrap_or(DateTime::MAX);
    let mut cursor = Cursor::from_datetime(minute_after(reference)?);
    let mut retries = 0u32;

    loop {
        let candidate = advance(schedule, cursor);
        trace!(?cursor, ?candidate, "advanced fields");

        if let Some(dt) = candidate.to_datetime() {
            let weekday = dt.weekday().to_sunday_zero_offset() as u8;
            if schedule.day_of_week.matches(weekday) {
                if dt > horizon {
                    return Err(unreachable(schedule, reference));
                }
                debug!(%reference, next = %dt, retries, "found next occurrence");
                return Ok(dt);
            }
            debug!(candidate = %dt, weekday, "day of week rejected candidate");
        } else {
            debug!(?candidate, "candidate day does not exist in its month");
        }

        let retry = retry_point(candidate)?;
        if retry > horizon {
            return Err(unreachable(schedule, reference));
        }
        retries += 1;
        cursor = Cursor::from_datetime(retry);
    }
}

/// Compute the next occurrence strictly after `now`, on `now`'s wall clock
/// and in `now`'s time zone.
pub fn next_from(schedule: &Schedule, now: &Zoned) -> Result<Zoned, ScheduleError> {
    let tz = now.time_zone();
    let mut civil = now.datetime();
    loop {
        civil = next_after(schedule, civil)?;
        let zoned = civil
            .to_zoned(tz.clone())
            .map_err(|e| ScheduleError::eval(format!("cannot place {civil} in time zone: {e}")))?;
        // A repeated wall-clock hour can map back before `now`.
        if zoned > *now {
            return Ok(zoned);
        }
    }
}

/// Compute the next `n` occurrences after `now`.
pub fn next_n_from(schedule: &Schedule, now: &Zoned, n: usize) -> Result<Vec<Zoned>, ScheduleError> {
    Occurrences::new(schedule, now.clone()).take(n).collect()
}

/// Whether the minute containing `datetime` satisfies every field.
pub fn matches_datetime(schedule: &Schedule, datetime: DateTime) -> bool {
    schedule.minute.matches(datetime.minute() as u8)
        && schedule.hour.matches(datetime.hour() as u8)
        && schedule.day_of_month.matches(datetime.day() as u8)
        && schedule.month.matches(datetime.month() as u8)
        && schedule
            .day_of_week
            .matches(datetime.weekday().to_sunday_zero_offset() as u8)
}

/// Lazy iterator over occurrences strictly after a given instant.
///
/// Stops after yielding the first error.
pub struct Occurrences<'a> {
    schedule: &'a Schedule,
    current: Zoned,
    done: bool,
}

impl<'a> Occurrences<'a> {
    /// Create a new iterator starting after `from`.
    pub fn new(schedule: &'a Schedule, from: Zoned) -> Self {
        Self {
            schedule,
            current: from,
            done: false,
        }
    }
}

impl Iterator for Occurrences<'_> {
    type Item = Result<Zoned, ScheduleError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match next_from(self.schedule, &self.current) {
            Ok(dt) => {
                self.current = dt.clone();
                Some(Ok(dt))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Bounded iterator for occurrences where from < occurrence <= to.
pub struct BoundedOccurrences<'a> {
    inner: Occurrences<'a>,
    to: Zoned,
}

impl<'a> BoundedOccurrences<'a> {
    /// Create a new bounded iterator for occurrences in the range (from, to].
    pub fn new(schedule: &'a Schedule, from: Zoned, to: Zoned) -> Self {
        Self {
            inner: Occurrences::new(schedule, from),
            to,
        }
    }
}

impl Iterator for BoundedOccurrences<'_> {
    type Item = Result<Zoned, ScheduleError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.inner.next()? {
            Ok(dt) if dt <= self.to => Some(Ok(dt)),
            Ok(_) => {
                self.inner.done = true;
                None
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// Create a bounded iterator of occurrences in the range (from, to].
pub fn between<'a>(schedule: &'a Schedule, from: &Zoned, to: &Zoned) -> BoundedOccurrences<'a> {
    BoundedOccurrences::new(schedule, from.clone(), to.clone())
}
