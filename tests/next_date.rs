use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use cron_stepper::{Cron, CronOptions, February, Result};

#[test]
fn next_date_from_now() -> Result<()> {
    let cron = Cron::new("@hourly")?;
    let now = Local::now();

    // Get the next event's timestamp starting from now
    let next = cron.next_date_from_now().unwrap();
    println!("next: {next}");
    assert!(next > now);

    Ok(())
}

#[test]
fn next_date_of_alternatives() -> Result<()> {
    let cron: Cron = "0 9 ? * mon-fri | 0 11 ? * sat,sun".parse()?;
    let friday = Utc.with_ymd_and_hms(2024, 1, 5, 10, 0, 0).unwrap();

    let next = cron.next_date(&friday).unwrap();
    assert_eq!(next, Utc.with_ymd_and_hms(2024, 1, 6, 11, 0, 0).unwrap());

    let next = cron.next_date(&next).unwrap();
    assert_eq!(next, Utc.with_ymd_and_hms(2024, 1, 7, 11, 0, 0).unwrap());

    let next = cron.next_date(&next).unwrap();
    assert_eq!(next, Utc.with_ymd_and_hms(2024, 1, 8, 9, 0, 0).unwrap());

    Ok(())
}

#[test]
fn next_date_with_offset() -> Result<()> {
    let cron = Cron::new("0 0 1 * ?")?;
    let from = DateTime::parse_from_rfc3339("2024-01-31T23:30:00-05:00").unwrap();

    let next = cron.next_date(&from).unwrap();
    assert_eq!(next.to_rfc3339(), "2024-02-01T00:00:00-05:00");

    Ok(())
}

#[test]
fn next_naive_date_with_short_february() -> Result<()> {
    let options = CronOptions::default().with_february(February::AlwaysShort);
    let cron = Cron::with_options("0 0 ? * 4L", options)?;
    let from = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();

    // The last Thursday of the 28 days February.
    let next = cron.next_naive_date(&from).unwrap();
    assert_eq!(next, NaiveDate::from_ymd_opt(2024, 2, 22).unwrap().and_hms_opt(0, 0, 0).unwrap());

    let cron = Cron::new("0 0 ? * 4L")?;
    let next = cron.next_naive_date(&from).unwrap();
    assert_eq!(next, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap().and_hms_opt(0, 0, 0).unwrap());

    Ok(())
}

#[test]
fn no_next_date() -> Result<()> {
    let cron = Cron::new("0 0 31 4 ?")?;
    assert!(cron.next_date(&Utc::now()).is_none());
    assert!(cron.iter(&Utc::now()).next().is_none());

    Ok(())
}
