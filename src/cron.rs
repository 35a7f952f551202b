use crate::{
    calendar::{CalendarExt, Unit},
    error::{CronError, InvalidCause},
    expression::Expression,
    options::CronOptions,
    stepper, Result,
};
use chrono::{DateTime, Local, LocalResult, NaiveDateTime, Offset, TimeZone};
use std::{collections::HashSet, fmt::Display, str::FromStr};
use tracing::{debug, trace};

/// Separator of alternative expressions.
const ALTERNATIVES_SEPARATOR: char = '|';

/// Cron schedule made of one or more `|`-separated alternative expressions.
///
/// The schedule fires when any of the alternatives fires.
/// For expression format please refer to [`Expression`] and the [crate documentation](crate).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "CronRecord"))]
#[cfg_attr(feature = "serde", serde(into = "CronRecord"))]
pub struct Cron {
    input: String,
    options: CronOptions,
    expressions: Vec<Expression>,
}

impl Cron {
    /// Parses and validates provided `input` with default [`CronOptions`].
    ///
    /// Alternative way to construct [`Cron`] is to use one of `try_from` or `from_str` methods.
    ///
    /// Returns [`CronError`] in a case provided input is unparsable or has format errors.
    pub fn new(input: impl Into<String>) -> Result<Self> {
        Self::with_options(input, CronOptions::default())
    }

    /// Parses and validates provided `input`, which will be evaluated with the specified `options`.
    pub fn with_options(input: impl Into<String>, options: CronOptions) -> Result<Self> {
        let input = input.into();
        let expressions = parse_alternatives(&input)?;

        Ok(Self {
            input,
            options,
            expressions,
        })
    }

    /// Replaces expressions of this instance with the parsed `input`.
    ///
    /// On error the instance stays unchanged.
    pub fn parse(&mut self, input: impl Into<String>) -> Result<()> {
        let input = input.into();
        self.expressions = parse_alternatives(&input)?;
        self.input = input;

        Ok(())
    }

    /// The string this instance was parsed from.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Options this instance is evaluated with.
    pub fn options(&self) -> &CronOptions {
        &self.options
    }

    /// Parsed unique alternatives in order of their first appearance.
    pub fn expressions(&self) -> &[Expression] {
        &self.expressions
    }

    /// Returns time of the next event strictly after `from`.
    ///
    /// The schedule is evaluated against local date and time of `from`, the result has the same timezone.
    /// Local times which don't exist because of DST transitions are skipped,
    /// ambiguous local times fire at each of their instants.
    ///
    /// Returns `None` if there is no event before the end of [`MAX_YEAR`](crate::MAX_YEAR).
    pub fn next_date<Tz: TimeZone>(&self, from: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        let next = self.next_date_from_local(from, from.naive_local())?;
        let (offset, next_offset) = (from.offset().fix(), next.offset().fix());
        if offset == next_offset {
            return Some(next);
        }

        // Offset changes between `from` and `next`: local times repeated after the change
        // are earlier in local terms than `from` itself.
        let shifted = self.next_date_from_local(from, from.naive_utc() + next_offset);
        match shifted {
            Some(shifted) if shifted < next => Some(shifted),
            _ => Some(next),
        }
    }

    /// Steps local time starting from `local` until it maps to an instant after `from`.
    fn next_date_from_local<Tz: TimeZone>(
        &self,
        from: &DateTime<Tz>,
        mut local: NaiveDateTime,
    ) -> Option<DateTime<Tz>> {
        let timezone = from.timezone();
        loop {
            let next = self.next_naive_date(&local)?;
            let instant = match timezone.from_local_datetime(&next) {
                LocalResult::Single(instant) => (instant > *from).then_some(instant),
                LocalResult::Ambiguous(first, second) => [first, second].into_iter().filter(|i| i > from).min(),
                LocalResult::None => None,
            };
            if instant.is_some() {
                return instant;
            }
            trace!(%next, "local time is skipped");
            local = next;
        }
    }

    /// Returns local time of the next event strictly after `from`.
    pub fn next_naive_date(&self, from: &NaiveDateTime) -> Option<NaiveDateTime> {
        self.expressions
            .iter()
            .filter_map(|expression| stepper::next_date(expression, from, true, &self.options))
            .min()
    }

    /// Returns time of the next event from now, in the local timezone.
    pub fn next_date_from_now(&self) -> Option<DateTime<Local>> {
        self.next_date(&Local::now())
    }

    /// Returns `true` if `at` is the time of an event, seconds and fractions of `at` are ignored.
    pub fn matches<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> bool {
        self.matches_naive(&at.naive_local())
    }

    /// Returns `true` if local time `at` is the time of an event, seconds and fractions of `at` are ignored.
    pub fn matches_naive(&self, at: &NaiveDateTime) -> bool {
        let at = at.truncated_to(Unit::Minute);
        self.expressions
            .iter()
            .any(|expression| stepper::next_date(expression, &at, false, &self.options) == Some(at))
    }

    /// Returns `true` if the current minute is the time of an event.
    pub fn matches_now(&self) -> bool {
        self.matches(&Local::now())
    }

    /// Returns iterator of events strictly after `from`.
    #[inline]
    pub fn iter<Tz: TimeZone>(&self, from: &DateTime<Tz>) -> impl Iterator<Item = DateTime<Tz>> {
        CronIterator {
            next: self.next_date(from),
            cron: self.clone(),
        }
    }

    /// Consumes [`Cron`] and returns iterator of events strictly after `from`.
    #[inline]
    pub fn into_iter<Tz: TimeZone>(self, from: &DateTime<Tz>) -> impl Iterator<Item = DateTime<Tz>> {
        let next = self.next_date(from);
        CronIterator { cron: self, next }
    }
}

/// Splits `input` into unique alternatives and parses each of them.
fn parse_alternatives(input: &str) -> Result<Vec<Expression>> {
    let mut seen = HashSet::new();
    let alternatives = input
        .split(ALTERNATIVES_SEPARATOR)
        .map(str::trim)
        .filter(|alternative| !alternative.is_empty())
        .filter(|alternative| seen.insert(*alternative))
        .collect::<Vec<_>>();

    if alternatives.is_empty() {
        debug!(input, "rejected empty cron expression");
        return Err(CronError::new(input, InvalidCause::Empty));
    }

    alternatives
        .into_iter()
        .map(|alternative| {
            Expression::parse(alternative).map_err(|error| {
                debug!(input, %error, "rejected cron expression");
                CronError::new(input, error.cause().clone())
            })
        })
        .collect()
}

/// Contains iterator state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CronIterator<Tz: TimeZone> {
    cron: Cron,
    next: Option<DateTime<Tz>>,
}

impl<Tz: TimeZone> Iterator for CronIterator<Tz> {
    type Item = DateTime<Tz>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = self.cron.next_date(&current);
        Some(current)
    }
}

/// Serialized form of [`Cron`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct CronRecord {
    input: String,
    #[serde(default)]
    options: CronOptions,
}

#[cfg(feature = "serde")]
impl From<Cron> for CronRecord {
    fn from(value: Cron) -> Self {
        Self {
            input: value.input,
            options: value.options,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<CronRecord> for Cron {
    type Error = CronError;

    fn try_from(value: CronRecord) -> Result<Self> {
        Self::with_options(value.input, value.options)
    }
}

impl From<Cron> for String {
    fn from(value: Cron) -> Self {
        value.input
    }
}

impl From<&Cron> for String {
    fn from(value: &Cron) -> Self {
        value.input.clone()
    }
}

impl TryFrom<String> for Cron {
    type Error = CronError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&String> for Cron {
    type Error = CronError;

    fn try_from(value: &String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Cron {
    type Error = CronError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl FromStr for Cron {
    type Err = CronError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl Display for Cron {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.input)
    }
}
