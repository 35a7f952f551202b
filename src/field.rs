use crate::{calendar::Unit, error::InvalidCause, utils};
use std::fmt::Display;

/// Minimum valid year.
pub const MIN_YEAR: PatternValueType = 1970;
/// Maximum valid year, also the horizon of every search.
pub const MAX_YEAR: PatternValueType = 2099;

/// Integer type of every field value.
pub type PatternValueType = u16;

/// Positional field of a cron expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// Seconds, `0-59`.
    Second,
    /// Minutes, `0-59`.
    Minute,
    /// Hours, `0-23`.
    Hour,
    /// Day of month, `1-31`.
    DayOfMonth,
    /// Month, `1-12` or `JAN-DEC`.
    Month,
    /// Day of week, `0-6` or `SUN-SAT`, `7` is Sunday as well.
    DayOfWeek,
    /// Year, `1970-2099`.
    Year,
}

impl Field {
    /// All fields in their positional order.
    pub const ALL: [Field; 7] = [
        Self::Second,
        Self::Minute,
        Self::Hour,
        Self::DayOfMonth,
        Self::Month,
        Self::DayOfWeek,
        Self::Year,
    ];

    const MONTHS: [(&'static str, PatternValueType); 12] = [
        ("jan", 1),
        ("feb", 2),
        ("mar", 3),
        ("apr", 4),
        ("may", 5),
        ("jun", 6),
        ("jul", 7),
        ("aug", 8),
        ("sep", 9),
        ("oct", 10),
        ("nov", 11),
        ("dec", 12),
    ];
    const DAYS_OF_WEEK: [(&'static str, PatternValueType); 8] = [
        ("sun", 0),
        ("mon", 1),
        ("tue", 2),
        ("wed", 3),
        ("thu", 4),
        ("fri", 5),
        ("sat", 6),
        ("7", 0),
    ];

    /// Name of the field as used in error messages.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::DayOfMonth => "day_of_month",
            Self::Month => "month",
            Self::DayOfWeek => "day_of_week",
            Self::Year => "year",
        }
    }

    /// Declared `(min, max)` bounds of the field.
    pub const fn min_max(&self) -> (PatternValueType, PatternValueType) {
        match self {
            Self::Second | Self::Minute => (0, 59),
            Self::Hour => (0, 23),
            Self::DayOfMonth => (1, 31),
            Self::Month => (1, 12),
            Self::DayOfWeek => (0, 6),
            Self::Year => (MIN_YEAR, MAX_YEAR),
        }
    }

    /// Field specific aliases, lower case.
    pub const fn aliases(&self) -> &'static [(&'static str, PatternValueType)] {
        match self {
            Self::Month => &Self::MONTHS,
            Self::DayOfWeek => &Self::DAYS_OF_WEEK,
            _ => &[],
        }
    }

    /// Calendar unit which the field constrains.
    pub(crate) const fn unit(&self) -> Unit {
        match self {
            Self::Second => Unit::Second,
            Self::Minute => Unit::Minute,
            Self::Hour => Unit::Hour,
            Self::DayOfMonth | Self::DayOfWeek => Unit::Day,
            Self::Month => Unit::Month,
            Self::Year => Unit::Year,
        }
    }

    /// Resolves aliases and converts `input` into a value within the field's bounds.
    pub(crate) fn parse(&self, input: &str) -> Result<PatternValueType, InvalidCause> {
        let (min, max) = self.min_max();

        if let Some(value) = utils::parse_string_value(input, self.aliases()) {
            return Ok(value);
        }

        match input.parse::<PatternValueType>() {
            Ok(_) => utils::parse_digital_value(input, min, max).ok_or_else(|| InvalidCause::OutOfBounds {
                field: *self,
                token: input.to_owned(),
                min,
                max,
            }),
            Err(_) => Err(InvalidCause::UnknownValue {
                field: *self,
                token: input.to_owned(),
                min,
                max,
            }),
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
