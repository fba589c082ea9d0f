use std::fmt;

/// Inclusive legal range of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min: u8,
    pub max: u8,
}

impl Bounds {
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: u32) -> bool {
        value >= u32::from(self.min) && value <= u32::from(self.max)
    }
}

/// One of the five cron positions, in expression order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Minute,
    Hour,
    DayOfMonth,
    Month,
    DayOfWeek,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Minute,
        Field::Hour,
        Field::DayOfMonth,
        Field::Month,
        Field::DayOfWeek,
    ];

    /// Legal values for this field. Day of week counts Sunday as 0.
    pub const fn bounds(self) -> Bounds {
        match self {
            Field::Minute => Bounds::new(0, 59),
            Field::Hour => Bounds::new(0, 23),
            Field::DayOfMonth => Bounds::new(1, 31),
            Field::Month => Bounds::new(1, 12),
            Field::DayOfWeek => Bounds::new(0, 6),
        }
    }

    /// Name used in error messages ("missing hours", "day of month value ...").
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Minute => "minutes",
            Field::Hour => "hours",
            Field::DayOfMonth => "day of month",
            Field::Month => "month",
            Field::DayOfWeek => "day of week",
        }
    }

    /// Zero-based position within the expression.
    pub fn index(self) -> usize {
        match self {
            Field::Minute => 0,
            Field::Hour => 1,
            Field::DayOfMonth => 2,
            Field::Month => 3,
            Field::DayOfWeek => 4,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
