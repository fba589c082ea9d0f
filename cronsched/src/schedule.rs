use crate::field::Field;
use crate::matcher::Matcher;

/// A parsed five-field cron schedule.
///
/// Immutable after construction; share it freely between threads.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Schedule {
    pub(crate) minute: Matcher,
    pub(crate) hour: Matcher,
    pub(crate) day_of_month: Matcher,
    pub(crate) month: Matcher,
    pub(crate) day_of_week: Matcher,
}

impl Schedule {
    /// Assemble a schedule from already-validated matchers, in field order.
    pub fn new(
        minute: Matcher,
        hour: Matcher,
        day_of_month: Matcher,
        month: Matcher,
        day_of_week: Matcher,
    ) -> Self {
        Self {
            minute,
            hour,
            day_of_month,
            month,
            day_of_week,
        }
    }

    pub fn minute(&self) -> &Matcher {
        &self.minute
    }

    pub fn hour(&self) -> &Matcher {
        &self.hour
    }

    pub fn day_of_month(&self) -> &Matcher {
        &self.day_of_month
    }

    pub fn month(&self) -> &Matcher {
        &self.month
    }

    pub fn day_of_week(&self) -> &Matcher {
        &self.day_of_week
    }

    pub fn matcher(&self, field: Field) -> &Matcher {
        match field {
            Field::Minute => &self.minute,
            Field::Hour => &self.hour,
            Field::DayOfMonth => &self.day_of_month,
            Field::Month => &self.month,
            Field::DayOfWeek => &self.day_of_week,
        }
    }
}
