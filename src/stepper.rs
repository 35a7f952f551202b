//! Fixed-point search of the next date which satisfies every field of an expression.
//!
//! Each iteration looks for the first field (in order of the smallest unit) which doesn't accept
//! the candidate date, and moves the candidate forward to the start of the nearest unit value
//! which does. Lower units are reset by that move, higher ones may carry over, so the loop
//! re-checks from the smallest unit until nothing needs a change.

use crate::{
    calendar::{unit_max, unit_min, unit_value, CalendarExt, Unit},
    expression::Expression,
    field::{Field, PatternValueType, MAX_YEAR},
    options::CronOptions,
    pattern::{FieldPattern, PatternItems},
    utils,
};
use chrono::{Datelike, NaiveDateTime, TimeDelta};
use tracing::{debug, trace};

/// Order in which fields are brought into compliance.
const STEPPING_ORDER: [Field; 7] = [
    Field::Second,
    Field::Minute,
    Field::Hour,
    Field::DayOfMonth,
    Field::DayOfWeek,
    Field::Month,
    Field::Year,
];

/// Outcome of a single iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Every field accepts the date.
    Stable,
    /// Date was moved forward to satisfy one of the fields.
    Changed(NaiveDateTime),
    /// Field can't be satisfied at all.
    Failed,
}

/// Returns the earliest date, starting from `from` (inclusively), which satisfies every field of the `expression`.
///
/// Sub-second part of `from` is dropped, and if `add_one_second` is set the search starts one second later,
/// so the result is strictly after `from`.
///
/// Returns `None` if there is no such date up to the end of [`MAX_YEAR`].
pub(crate) fn next_date(
    expression: &Expression,
    from: &NaiveDateTime,
    add_one_second: bool,
    options: &CronOptions,
) -> Option<NaiveDateTime> {
    let mut current = from.truncated_to(Unit::Second);
    if add_one_second {
        current = current.checked_add_signed(TimeDelta::seconds(1))?;
    }

    loop {
        if current.year() > i32::from(MAX_YEAR) {
            debug!(expression = %expression, from = %from, "no upcoming date until the end of {}", MAX_YEAR);
            return None;
        }

        match step(expression, &current, options) {
            Step::Stable => return Some(current),
            Step::Failed => {
                debug!(expression = %expression, from = %from, "expression can't be satisfied");
                return None;
            }
            Step::Changed(next) => {
                if next <= current {
                    debug!(expression = %expression, %current, %next, "search doesn't move forward");
                    return None;
                }
                trace!(%current, %next, "next candidate");
                current = next;
            }
        }
    }
}

/// Brings the first non-compliant field into compliance.
fn step(expression: &Expression, date: &NaiveDateTime, options: &CronOptions) -> Step {
    for field in STEPPING_ORDER {
        let pattern = expression.pattern(field);
        if pattern.matches(field, date, options) {
            continue;
        }

        let advanced = match pattern {
            // The only field where "doesn't matter" still means the start of the unit.
            FieldPattern::Omit => date.advanced(Unit::Minute, 1),
            FieldPattern::LastDay => {
                let last_day = utils::last_day_of_month(date.year(), month(date), options.february);
                date.advanced(Unit::Day, days_until(date, last_day))
            }
            FieldPattern::LastWeekdayOfMonth => {
                let last_weekday = utils::last_weekday(date.year(), month(date), options.february);
                date.advanced(Unit::Day, days_until(date, last_weekday))
            }
            FieldPattern::Items(items) => match distance(field, items, date, options) {
                Some(distance) => date.advanced(field.unit(), distance),
                None => return Step::Failed,
            },
            FieldPattern::All => continue,
        };

        trace!(%field, %pattern, %date, "field requires a change");
        return advanced.map_or(Step::Failed, Step::Changed);
    }

    Step::Stable
}

/// Smallest forward distance, in units of the `field`, to the value accepted by any of `items`.
fn distance(field: Field, items: &PatternItems, date: &NaiveDateTime, options: &CronOptions) -> Option<u32> {
    let value = unit_value(field, date);
    let (min, max) = (unit_min(field), unit_max(field, date));
    let forward = |target: i32| forward_distance(value, target, min, max);

    let (year, month) = (date.year(), month(date));
    // Sunday at the end of day of week steps is 7.
    let ceiling = if field == Field::DayOfWeek { max + 1 } else { max };

    let values = items.values().iter().map(|v| forward(i32::from(*v)));
    let ranges = items.ranges().iter().map(|r| forward(i32::from(r.from)));
    let steps = items
        .steps()
        .iter()
        .map(|s| {
            let next = s.next_from(value).filter(|next| *next <= ceiling);
            forward(next.unwrap_or(i32::from(s.from)))
        });
    let nth_weekdays = items.nth_weekdays().iter().map(|n| {
        let target = utils::nth_dow(year, month, n.day_of_week, n.instance);
        days_until(date, target.unwrap_or(0))
    });
    let nearest_weekdays = items.nearest_weekdays().iter().map(|target| {
        let target = utils::nearest_weekday(year, month, *target);
        days_until(date, target.unwrap_or(0))
    });
    let last_weekdays = items
        .last_weekdays()
        .iter()
        .map(|dow| days_until(date, utils::last_dow(year, month, *dow, options.february)));

    values
        .chain(ranges)
        .chain(steps)
        .chain(nth_weekdays)
        .chain(nearest_weekdays)
        .chain(last_weekdays)
        .filter(|distance| *distance > 0)
        .min()
}

/// Distance from `value` to `target` moving forward only, wrapping past `max` back to `min`.
#[inline]
fn forward_distance(value: i32, target: i32, min: i32, max: i32) -> u32 {
    let distance = if target > value {
        target - value
    } else {
        (max - value) + (target - min) + 1
    };

    distance.max(0).unsigned_abs()
}

/// Days from `date` to `day` of the same month, or to the first day of the next month if `day` isn't ahead.
#[inline]
fn days_until(date: &NaiveDateTime, day: PatternValueType) -> u32 {
    let today = date.day();
    let target = u32::from(day);
    if target > today {
        target - today
    } else {
        u32::from(utils::days_in_month(date.year(), month(date))) - today + 1
    }
}

#[inline]
fn month(date: &NaiveDateTime) -> PatternValueType {
    date.month() as PatternValueType
}
