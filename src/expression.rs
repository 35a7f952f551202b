use crate::{
    error::{CronError, InvalidCause},
    field::Field,
    pattern::FieldPattern,
    Result,
};
use std::{fmt::Display, str::FromStr};

/// Minimal number of fields in an expression.
const MIN_FIELDS: usize = 4;
/// Maximal number of fields in an expression.
const MAX_FIELDS: usize = 6;

/// Predefined shorthands and their equivalents.
const SHORTHANDS: [(&str, &str); 7] = [
    ("@yearly", "0 0 1 1 ?"),
    ("@annually", "0 0 1 1 ?"),
    ("@monthly", "0 0 1 * ?"),
    ("@weekly", "0 0 ? * 0"),
    ("@daily", "0 0 * * ?"),
    ("@midnight", "0 0 * * ?"),
    ("@hourly", "0 * * * ?"),
];

/// Single parsed and validated cron expression, one alternative of a [`Cron`](crate::Cron).
///
/// Accepted formats, with whitespace separated fields:
/// - `minute hour day_of_month month`, day of week is `?` and year is `*`;
/// - `minute hour day_of_month month day_of_week`, year is `*`;
/// - `minute hour day_of_month month day_of_week year`;
/// - one of the shorthands: `@yearly`, `@annually`, `@monthly`, `@weekly`, `@daily`, `@midnight`, `@hourly`.
///
/// Seconds can't be specified, every event happens at the start of a minute.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Expression {
    second: FieldPattern,
    minute: FieldPattern,
    hour: FieldPattern,
    day_of_month: FieldPattern,
    month: FieldPattern,
    day_of_week: FieldPattern,
    year: FieldPattern,
}

impl Expression {
    /// Parses and validates provided `input`.
    ///
    /// Returns [`CronError`] in a case provided expression is unparsable or has format errors.
    pub fn parse(input: &str) -> Result<Self> {
        let error = |cause| CronError::new(input, cause);

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(error(InvalidCause::Empty));
        }

        let expanded = SHORTHANDS
            .iter()
            .find(|(shorthand, _)| shorthand.eq_ignore_ascii_case(trimmed))
            .map_or(trimmed, |(_, expression)| *expression);

        let mut elements = expanded.split_whitespace().collect::<Vec<_>>();
        if !(MIN_FIELDS..=MAX_FIELDS).contains(&elements.len()) {
            return Err(error(InvalidCause::FieldCount {
                min: MIN_FIELDS,
                max: MAX_FIELDS,
                found: elements.len(),
            }));
        }

        // Augment with defaults: seconds first, then day of week and year.
        elements.insert(0, "0");
        if elements.len() == 5 {
            elements.push("?");
        }
        if elements.len() == 6 {
            elements.push("*");
        }

        let parse = |field: Field| FieldPattern::parse(field, elements[field as usize]).map_err(error);

        Ok(Self {
            second: FieldPattern::Omit,
            minute: parse(Field::Minute)?,
            hour: parse(Field::Hour)?,
            day_of_month: parse(Field::DayOfMonth)?,
            month: parse(Field::Month)?,
            day_of_week: parse(Field::DayOfWeek)?,
            year: parse(Field::Year)?,
        })
    }

    /// Returns pattern of the specified field.
    pub fn pattern(&self, field: Field) -> &FieldPattern {
        match field {
            Field::Second => &self.second,
            Field::Minute => &self.minute,
            Field::Hour => &self.hour,
            Field::DayOfMonth => &self.day_of_month,
            Field::Month => &self.month,
            Field::DayOfWeek => &self.day_of_week,
            Field::Year => &self.year,
        }
    }
}

impl FromStr for Expression {
    type Err = CronError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Display for Expression {
    /// Canonical six fields form, which parses back into the same expression.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.minute, self.hour, self.day_of_month, self.month, self.day_of_week, self.year
        )
    }
}
