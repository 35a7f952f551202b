/// Common utility functions.
use crate::{field::PatternValueType, options::February};

/// Converts string into unsigned number with bounds validation.
pub(crate) fn parse_digital_value(
    input: &str,
    min: PatternValueType,
    max: PatternValueType,
) -> Option<PatternValueType> {
    let value = input.parse::<PatternValueType>();
    if let Ok(value) = value {
        if value < min || value > max {
            None
        } else {
            Some(value)
        }
    } else {
        None
    }
}

/// Looks up mnemonic value representation in the alias table.
pub(crate) fn parse_string_value(input: &str, aliases: &[(&str, PatternValueType)]) -> Option<PatternValueType> {
    if input.is_empty() {
        None
    } else {
        aliases
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(input))
            .map(|(_, value)| *value)
    }
}

/// Returns `true` if provided year is leap.
#[inline]
pub(crate) fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Returns number of days in specified month.
pub(crate) fn days_in_month(year: i32, month: PatternValueType) -> PatternValueType {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

/// Returns the last day of month, taking into account how February should be treated.
pub(crate) fn last_day_of_month(year: i32, month: PatternValueType, february: February) -> PatternValueType {
    match (month, february) {
        (2, February::AlwaysShort) => 28,
        _ => days_in_month(year, month),
    }
}

/// Calculates day of week (`0` is Sunday) for specified date.
pub(crate) fn day_of_week(year: i32, month: PatternValueType, day: PatternValueType) -> PatternValueType {
    let month_offset: i32 = if is_leap_year(year) {
        [0, 3, 4, 0, 2, 5, 0, 3, 6, 1, 4, 6]
    } else {
        [0, 3, 3, 6, 1, 4, 6, 2, 5, 0, 3, 5]
    }[usize::from(month.clamp(1, 12) - 1)];

    let year = year - 1;
    let dow = i32::from(day)
        + month_offset
        + 5 * year.rem_euclid(4)
        + 4 * year.rem_euclid(100)
        + 6 * year.rem_euclid(400);

    dow.rem_euclid(7) as PatternValueType
}

/// Returns day in the month for the last specified day of the week.
pub(crate) fn last_dow(
    year: i32,
    month: PatternValueType,
    dow: PatternValueType,
    february: February,
) -> PatternValueType {
    let last_day = last_day_of_month(year, month, february);
    let last_dow = day_of_week(year, month, last_day);

    last_day - (last_dow + 7 - dow % 7) % 7
}

/// Returns date (day in the month) of the specified N-th day of the week, if the month has it.
pub(crate) fn nth_dow(
    year: i32,
    month: PatternValueType,
    dow: PatternValueType,
    n: PatternValueType,
) -> Option<PatternValueType> {
    let first_dow = day_of_week(year, month, 1);
    let day = 1 + (dow % 7 + 7 - first_dow) % 7 + (n.checked_sub(1)?) * 7;

    (day <= days_in_month(year, month)).then_some(day)
}

/// Returns date of the weekday (not Sundays or Saturday) nearest to the specified date in the same month.
///
/// Returns `None` if the month is shorter than `day`.
pub(crate) fn nearest_weekday(year: i32, month: PatternValueType, day: PatternValueType) -> Option<PatternValueType> {
    let days_in_month = days_in_month(year, month);
    if day == 0 || day > days_in_month {
        return None;
    }

    let dow = day_of_week(year, month, day);

    // middle of the week
    let weekday = if dow > 0 && dow < 6 {
        day
    } else if dow == 0 {
        // sunday
        if day == days_in_month {
            day - 2
        } else {
            day + 1
        }
    } else {
        // saturday
        if day > 1 {
            day - 1
        } else {
            day + 2
        }
    };

    Some(weekday)
}

/// Returns the last weekday (Monday to Friday) of the month.
pub(crate) fn last_weekday(year: i32, month: PatternValueType, february: February) -> PatternValueType {
    let last_day = last_day_of_month(year, month, february);
    match day_of_week(year, month, last_day) {
        6 => last_day - 1,
        0 => last_day - 2,
        _ => last_day,
    }
}
