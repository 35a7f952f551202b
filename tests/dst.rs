use chrono::{
    DateTime, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc,
};
use cron_stepper::{Cron, Result};

/// US Eastern time of 2024: `-04:00` from 2024-03-10T07:00Z until 2024-11-03T06:00Z, `-05:00` otherwise.
///
/// Ambiguous local times are reported with the later instant first, the way the system zone does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Eastern2024;

fn est() -> FixedOffset {
    FixedOffset::west_opt(5 * 3600).unwrap()
}

fn edt() -> FixedOffset {
    FixedOffset::west_opt(4 * 3600).unwrap()
}

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
}

impl TimeZone for Eastern2024 {
    type Offset = FixedOffset;

    fn from_offset(_offset: &FixedOffset) -> Self {
        Eastern2024
    }

    fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
        self.offset_from_local_datetime(&local.and_hms_opt(0, 0, 0).unwrap())
    }

    fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
        let offsets = [est(), edt()]
            .into_iter()
            .filter(|offset| self.offset_from_utc_datetime(&(*local - *offset)) == *offset)
            .collect::<Vec<_>>();
        match offsets[..] {
            [offset] => LocalResult::Single(offset),
            [later, earlier] => LocalResult::Ambiguous(later, earlier),
            _ => LocalResult::None,
        }
    }

    fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
        self.offset_from_utc_datetime(&utc.and_hms_opt(0, 0, 0).unwrap())
    }

    fn offset_from_utc_datetime(&self, at: &NaiveDateTime) -> FixedOffset {
        if (utc(2024, 3, 10, 7, 0)..utc(2024, 11, 3, 6, 0)).contains(at) {
            edt()
        } else {
            est()
        }
    }
}

fn eastern(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Eastern2024> {
    Eastern2024.from_utc_datetime(&utc(y, m, d, h, min))
}

#[test]
fn every_minute_through_repeated_hour() -> Result<()> {
    let cron = Cron::new("* * * * ?")?;
    // 01:30 -04:00, the first pass of the repeated hour.
    let from = eastern(2024, 11, 3, 5, 30);

    let mut previous = from;
    for next in cron.iter(&from).take(120) {
        assert_eq!(next - previous, TimeDelta::minutes(1), "previous = {previous}, next = {next}");
        previous = next;
    }
    assert_eq!(previous.with_timezone(&Utc), Utc.from_utc_datetime(&utc(2024, 11, 3, 7, 30)));

    Ok(())
}

#[test]
fn next_date_is_after_from_in_second_pass() -> Result<()> {
    let cron = Cron::new("* * * * ?")?;
    // 01:30 -05:00, the second pass of the repeated hour.
    let from = eastern(2024, 11, 3, 6, 30);

    let next = cron.next_date(&from).unwrap();
    assert_eq!(next, eastern(2024, 11, 3, 6, 31));
    assert_eq!(next.offset(), &est());

    Ok(())
}

#[test]
fn repeated_local_time_fires_at_both_instants() -> Result<()> {
    let cron = Cron::new("30 1 * * ?")?;
    let from = eastern(2024, 11, 2, 12, 0);

    let events = cron.iter(&from).take(3).collect::<Vec<_>>();
    assert_eq!(
        events,
        [
            eastern(2024, 11, 3, 5, 30),
            eastern(2024, 11, 3, 6, 30),
            eastern(2024, 11, 4, 6, 30)
        ]
    );

    Ok(())
}

#[test]
fn nonexistent_local_time_is_skipped() -> Result<()> {
    // 02:30 doesn't exist on 2024-03-10.
    let cron = Cron::new("30 2 * * ?")?;
    let from = eastern(2024, 3, 10, 5, 0);

    let next = cron.next_date(&from).unwrap();
    assert_eq!(next, eastern(2024, 3, 11, 6, 30));
    assert_eq!(next.offset(), &edt());

    let cron = Cron::new("* * * * ?")?;
    // 01:59 -05:00, the last minute before the gap.
    let from = eastern(2024, 3, 10, 6, 59);

    let next = cron.next_date(&from).unwrap();
    assert_eq!(next, eastern(2024, 3, 10, 7, 0));
    assert_eq!(next.naive_local(), utc(2024, 3, 10, 3, 0));

    Ok(())
}
