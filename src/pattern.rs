use crate::{
    calendar::unit_value,
    error::InvalidCause,
    field::{Field, PatternValueType},
    options::CronOptions,
    utils,
};
use chrono::{Datelike, NaiveDateTime};
use std::{collections::BTreeSet, fmt::Display};

/// Parsed form of a single field of a cron expression.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldPattern {
    /// `*`, any value.
    All,
    /// `?`, value doesn't matter.
    Omit,
    /// `L`, the last day of the month.
    LastDay,
    /// `LW`, the last weekday (Monday to Friday) of the month.
    LastWeekdayOfMonth,
    /// Comma-separated list of values, ranges, steps and day specific items.
    Items(PatternItems),
}

/// Additive parts of a list pattern, the field matches if any of them matches.
#[derive(Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PatternItems {
    values: BTreeSet<PatternValueType>,
    ranges: Vec<Range>,
    steps: Vec<Step>,
    nth_weekdays: Vec<NthWeekday>,
    nearest_weekdays: Vec<PatternValueType>,
    last_weekdays: Vec<PatternValueType>,
}

/// Inclusive range `from-to`.
///
/// Day of week range which ends at Sunday has `to == 7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Range {
    /// First value of the range.
    pub from: PatternValueType,
    /// Last value of the range.
    pub to: PatternValueType,
}

/// Repeating values `from-to/step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Step {
    /// First value of the series.
    pub from: PatternValueType,
    /// Upper bound of the series.
    pub to: PatternValueType,
    /// Distance between values.
    pub step: PatternValueType,
}

/// `day_of_week#instance`, i.e. the 3rd Friday of the month is `5#3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NthWeekday {
    /// Day of week, `0` is Sunday.
    pub day_of_week: PatternValueType,
    /// Instance of the day in the month, `1-5`.
    pub instance: PatternValueType,
}

const DAYS_OF_MONTH_OR_WEEK: &str = "day_of_month or day_of_week";

impl FieldPattern {
    /// Parses a raw field token.
    pub(crate) fn parse(field: Field, input: &str) -> Result<Self, InvalidCause> {
        let input = input.trim().to_lowercase();

        match input.as_str() {
            "*" => return Ok(Self::All),
            "?" if is_day_field(field) => return Ok(Self::Omit),
            "?" => {
                return Err(InvalidCause::OperatorNotAllowed {
                    operator: "?",
                    allowed: DAYS_OF_MONTH_OR_WEEK,
                    field,
                })
            }
            _ => {}
        }

        let parts = input.split(',').collect::<Vec<_>>();
        let single = parts.len() == 1;
        let not_alone = |token: &str| InvalidCause::NotAlone {
            field,
            token: token.to_uppercase(),
        };

        let mut items = PatternItems::default();
        for part in parts {
            if part.contains('/') {
                items.steps.push(parse_step(field, part)?);
            } else if part.contains('-') {
                items.ranges.push(parse_range(field, part)?);
            } else if part.contains('#') {
                if field != Field::DayOfWeek {
                    return Err(InvalidCause::OperatorNotAllowed {
                        operator: "#",
                        allowed: "day_of_week",
                        field,
                    });
                }
                items.nth_weekdays.push(parse_nth_weekday(part)?);
            } else if part == "l" {
                if !is_day_field(field) {
                    return Err(InvalidCause::OperatorNotAllowed {
                        operator: "L",
                        allowed: DAYS_OF_MONTH_OR_WEEK,
                        field,
                    });
                }
                if !single {
                    return Err(not_alone(part));
                }
                return Ok(Self::LastDay);
            } else if part == "lw" {
                if field != Field::DayOfMonth {
                    return Err(InvalidCause::OperatorNotAllowed {
                        operator: "LW",
                        allowed: "day_of_month",
                        field,
                    });
                }
                if !single {
                    return Err(not_alone(part));
                }
                return Ok(Self::LastWeekdayOfMonth);
            } else if field == Field::DayOfMonth && part.contains('w') {
                let day = part.strip_suffix('w').ok_or_else(|| InvalidCause::Malformed {
                    field,
                    kind: "nearest weekday",
                    token: part.to_owned(),
                })?;
                items.nearest_weekdays.push(field.parse(day)?);
            } else if field == Field::DayOfWeek && part.ends_with('l') {
                let dow = part.strip_suffix('l').unwrap_or(part);
                items.last_weekdays.push(field.parse(dow)?);
            } else if part == "*" || part == "?" {
                return Err(not_alone(part));
            } else {
                items.values.insert(field.parse(part)?);
            }
        }

        Ok(Self::Items(items))
    }

    /// Returns `true` if the unit constrained by `field` has an acceptable value in the `date`.
    pub fn matches(&self, field: Field, date: &NaiveDateTime, options: &CronOptions) -> bool {
        let (year, month, day) = (date.year(), date.month() as PatternValueType, date.day() as PatternValueType);
        match self {
            Self::All => true,
            Self::Omit => field != Field::Second || unit_value(field, date) == 0,
            Self::LastDay => day == utils::last_day_of_month(year, month, options.february),
            Self::LastWeekdayOfMonth => day == utils::last_weekday(year, month, options.february),
            Self::Items(items) => items.matches(field, date, options),
        }
    }
}

impl PatternItems {
    /// Explicit values, sorted and unique.
    pub fn values(&self) -> &BTreeSet<PatternValueType> {
        &self.values
    }

    /// Ranges in order of appearance.
    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    /// Steps in order of appearance.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// `#` items in order of appearance.
    pub fn nth_weekdays(&self) -> &[NthWeekday] {
        &self.nth_weekdays
    }

    /// Target days of `W` items in order of appearance.
    pub fn nearest_weekdays(&self) -> &[PatternValueType] {
        &self.nearest_weekdays
    }

    /// Days of week of `L` suffixed items in order of appearance.
    pub fn last_weekdays(&self) -> &[PatternValueType] {
        &self.last_weekdays
    }

    fn matches(&self, field: Field, date: &NaiveDateTime, options: &CronOptions) -> bool {
        let value = unit_value(field, date);
        let (year, month, day) = (date.year(), date.month() as PatternValueType, date.day() as PatternValueType);
        let dow = date.weekday().num_days_from_sunday() as PatternValueType;

        self.values.iter().any(|v| i32::from(*v) == value)
            || self.ranges.iter().any(|r| r.contains(field, value))
            || self.steps.iter().any(|s| s.contains(field, value))
            || self
                .nth_weekdays
                .iter()
                .any(|n| n.day_of_week == dow && utils::nth_dow(year, month, dow, n.instance) == Some(day))
            || self
                .nearest_weekdays
                .iter()
                .any(|target| utils::nearest_weekday(year, month, *target) == Some(day))
            || self
                .last_weekdays
                .iter()
                .any(|d| utils::last_dow(year, month, *d, options.february) == day)
    }
}

impl Range {
    /// Returns `true` if `value` is within the range, Sunday (`0`) matches `to == 7` of day of week ranges.
    pub(crate) fn contains(&self, field: Field, value: i32) -> bool {
        let within = |v: i32| i32::from(self.from) <= v && v <= i32::from(self.to);
        within(value) || (field == Field::DayOfWeek && value == 0 && within(7))
    }
}

impl Step {
    /// Returns `true` if `value` is one of the series values, Sunday (`0`) matches `7` in day of week steps.
    pub(crate) fn contains(&self, field: Field, value: i32) -> bool {
        let hit = |v: i32| {
            i32::from(self.from) <= v && v <= i32::from(self.to) && (v - i32::from(self.from)) % i32::from(self.step) == 0
        };
        hit(value) || (field == Field::DayOfWeek && value == 0 && hit(7))
    }

    /// Returns the first series value which is greater than or equal to `value`.
    pub(crate) fn next_from(&self, value: i32) -> Option<i32> {
        let (from, to, step) = (i32::from(self.from), i32::from(self.to), i32::from(self.step));
        let next = if value <= from {
            from
        } else {
            let misalignment = (value - from) % step;
            if misalignment == 0 {
                value
            } else {
                value + step - misalignment
            }
        };

        (next <= to).then_some(next)
    }
}

#[inline]
fn is_day_field(field: Field) -> bool {
    matches!(field, Field::DayOfMonth | Field::DayOfWeek)
}

/// Parses `a-b` where the end `0` of day of week is turned into `7`.
fn parse_bounds(field: Field, input: &str, kind: &'static str) -> Result<Range, InvalidCause> {
    let malformed = || InvalidCause::Malformed {
        field,
        kind,
        token: input.to_owned(),
    };
    let (from, to) = input.split_once('-').ok_or_else(malformed)?;
    if to.contains('-') {
        return Err(malformed());
    }

    let from = field.parse(from)?;
    let to = match field.parse(to)? {
        0 if field == Field::DayOfWeek => 7,
        to => to,
    };
    if from > to {
        return Err(InvalidCause::InvalidRange {
            field,
            token: input.to_owned(),
        });
    }

    Ok(Range { from, to })
}

fn parse_range(field: Field, input: &str) -> Result<Range, InvalidCause> {
    parse_bounds(field, input, "range")
}

fn parse_step(field: Field, input: &str) -> Result<Step, InvalidCause> {
    let (min, max) = field.min_max();
    let malformed = || InvalidCause::Malformed {
        field,
        kind: "step",
        token: input.to_owned(),
    };

    let (base, step) = input.split_once('/').ok_or_else(malformed)?;
    if step.contains('/') {
        return Err(malformed());
    }

    let Range { from, to } = if base == "*" {
        Range { from: min, to: max }
    } else if base.contains('-') {
        parse_bounds(field, base, "step")?
    } else {
        Range {
            from: field.parse(base)?,
            to: max,
        }
    };

    let step = step.parse::<PatternValueType>().map_err(|_| malformed())?;
    if step == 0 || step > max {
        return Err(InvalidCause::InvalidStep {
            field,
            token: input.to_owned(),
            max,
        });
    }

    Ok(Step { from, to, step })
}

fn parse_nth_weekday(input: &str) -> Result<NthWeekday, InvalidCause> {
    let field = Field::DayOfWeek;
    let (dow, instance) = input.split_once('#').ok_or_else(|| InvalidCause::Malformed {
        field,
        kind: "nth weekday",
        token: input.to_owned(),
    })?;

    let day_of_week = field.parse(dow)?;
    let instance = utils::parse_digital_value(instance, 1, 5).ok_or_else(|| InvalidCause::InvalidNthInstance {
        token: input.to_owned(),
    })?;

    Ok(NthWeekday { day_of_week, instance })
}

impl Display for FieldPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "*"),
            Self::Omit => write!(f, "?"),
            Self::LastDay => write!(f, "L"),
            Self::LastWeekdayOfMonth => write!(f, "LW"),
            Self::Items(items) => write!(f, "{items}"),
        }
    }
}

impl Display for PatternItems {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values = self
            .values
            .iter()
            .map(|v| v.to_string())
            .chain(self.ranges.iter().map(|r| format!("{}-{}", r.from, r.to)))
            .chain(self.steps.iter().map(|s| format!("{}-{}/{}", s.from, s.to, s.step)))
            .chain(
                self.nth_weekdays
                    .iter()
                    .map(|n| format!("{}#{}", n.day_of_week, n.instance)),
            )
            .chain(self.nearest_weekdays.iter().map(|d| format!("{d}W")))
            .chain(self.last_weekdays.iter().map(|d| format!("{d}L")))
            .collect::<Vec<_>>()
            .join(",");
        write!(f, "{values}")
    }
}
