use crate::{field::Field, utils};
use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, TimeDelta, Timelike};

/// Calendar unit which a date can be truncated to or advanced by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Unit {
    /// Whole second.
    Second,
    /// Whole minute.
    Minute,
    /// Whole hour.
    Hour,
    /// Whole day.
    Day,
    /// Whole month.
    Month,
    /// Whole year.
    Year,
}

/// Calendar arithmetic on local date/time values.
///
/// All operations return new values, the receiver is never changed.
pub trait CalendarExt: Sized {
    /// Returns the start of the `unit` which contains this value,
    /// i.e. every smaller unit is reset to its minimum.
    fn truncated_to(&self, unit: Unit) -> Self;

    /// Returns the start of the `unit` which is `amount` units after the one containing this value.
    ///
    /// Returns `None` on overflow.
    fn advanced(&self, unit: Unit, amount: u32) -> Option<Self>;
}

impl CalendarExt for NaiveDateTime {
    fn truncated_to(&self, unit: Unit) -> Self {
        let date = match unit {
            Unit::Month => self.date().with_day(1),
            Unit::Year => NaiveDate::from_ymd_opt(self.year(), 1, 1),
            _ => Some(self.date()),
        }
        .unwrap_or(self.date());

        let (hour, minute, second) = match unit {
            Unit::Second => (self.hour(), self.minute(), self.second()),
            Unit::Minute => (self.hour(), self.minute(), 0),
            Unit::Hour => (self.hour(), 0, 0),
            Unit::Day | Unit::Month | Unit::Year => (0, 0, 0),
        };

        date.and_hms_opt(hour, minute, second).unwrap_or(*self)
    }

    fn advanced(&self, unit: Unit, amount: u32) -> Option<Self> {
        let start = self.truncated_to(unit);
        let amount = i64::from(amount);
        match unit {
            Unit::Second => start.checked_add_signed(TimeDelta::try_seconds(amount)?),
            Unit::Minute => start.checked_add_signed(TimeDelta::try_minutes(amount)?),
            Unit::Hour => start.checked_add_signed(TimeDelta::try_hours(amount)?),
            Unit::Day => start.checked_add_signed(TimeDelta::try_days(amount)?),
            Unit::Month => start.checked_add_months(Months::new(u32::try_from(amount).ok()?)),
            Unit::Year => start.checked_add_months(Months::new(u32::try_from(amount.checked_mul(12)?).ok()?)),
        }
    }
}

/// Current value of the unit constrained by `field`.
///
/// Month is 1-based, day of week is 0-based starting from Sunday.
pub(crate) fn unit_value(field: Field, date: &NaiveDateTime) -> i32 {
    match field {
        Field::Second => date.second() as i32,
        Field::Minute => date.minute() as i32,
        Field::Hour => date.hour() as i32,
        Field::DayOfMonth => date.day() as i32,
        Field::Month => date.month() as i32,
        Field::DayOfWeek => date.weekday().num_days_from_sunday() as i32,
        Field::Year => date.year(),
    }
}

/// Smallest value of the unit constrained by `field`.
pub(crate) fn unit_min(field: Field) -> i32 {
    i32::from(field.min_max().0)
}

/// Largest value of the unit constrained by `field`, in the context of `date`.
pub(crate) fn unit_max(field: Field, date: &NaiveDateTime) -> i32 {
    match field {
        Field::DayOfMonth => i32::from(utils::days_in_month(date.year(), date.month() as u16)),
        _ => i32::from(field.min_max().1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn dt(input: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f").unwrap()
    }

    #[rstest]
    #[case("2024-03-15T10:20:30.5", Unit::Second, "2024-03-15T10:20:30")]
    #[case("2024-03-15T10:20:30", Unit::Minute, "2024-03-15T10:20:00")]
    #[case("2024-03-15T10:20:30", Unit::Hour, "2024-03-15T10:00:00")]
    #[case("2024-03-15T10:20:30", Unit::Day, "2024-03-15T00:00:00")]
    #[case("2024-03-15T10:20:30", Unit::Month, "2024-03-01T00:00:00")]
    #[case("2024-03-15T10:20:30", Unit::Year, "2024-01-01T00:00:00")]
    fn test_truncated_to(#[case] input: &str, #[case] unit: Unit, #[case] expected: &str) {
        assert_eq!(dt(input).truncated_to(unit), dt(expected));
    }

    #[rstest]
    #[case("2024-03-15T10:20:30", Unit::Second, 45, "2024-03-15T10:21:15")]
    #[case("2024-03-15T10:20:30", Unit::Minute, 40, "2024-03-15T11:00:00")]
    #[case("2024-03-15T23:20:30", Unit::Hour, 1, "2024-03-16T00:00:00")]
    #[case("2024-02-28T10:20:30", Unit::Day, 1, "2024-02-29T00:00:00")]
    #[case("2023-02-28T10:20:30", Unit::Day, 1, "2023-03-01T00:00:00")]
    #[case("2024-01-31T10:20:30", Unit::Month, 1, "2024-02-01T00:00:00")]
    #[case("2024-11-30T10:20:30", Unit::Month, 3, "2025-02-01T00:00:00")]
    #[case("2024-02-29T10:20:30", Unit::Year, 1, "2025-01-01T00:00:00")]
    fn test_advanced(#[case] input: &str, #[case] unit: Unit, #[case] amount: u32, #[case] expected: &str) {
        assert_eq!(dt(input).advanced(unit, amount), Some(dt(expected)));
    }

    #[test]
    fn test_unit_accessors() {
        // Sunday
        let date = dt("2024-02-25T13:14:15");

        assert_eq!(unit_value(Field::Second, &date), 15);
        assert_eq!(unit_value(Field::Minute, &date), 14);
        assert_eq!(unit_value(Field::Hour, &date), 13);
        assert_eq!(unit_value(Field::DayOfMonth, &date), 25);
        assert_eq!(unit_value(Field::Month, &date), 2);
        assert_eq!(unit_value(Field::DayOfWeek, &date), 0);
        assert_eq!(unit_value(Field::Year, &date), 2024);

        assert_eq!(unit_max(Field::DayOfMonth, &date), 29);
        assert_eq!(unit_max(Field::DayOfWeek, &date), 6);
        assert_eq!(unit_max(Field::Hour, &date), 23);
        assert_eq!(unit_min(Field::DayOfMonth), 1);
        assert_eq!(unit_min(Field::Minute), 0);
    }
}
