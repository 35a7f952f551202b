use chrono::{TimeZone, Utc};
use cron_stepper::{Cron, Result};

#[test]
fn iterator() -> Result<()> {
    let cron = Cron::new("0 0 * * ? | 0 12 * * ?")?;
    let now = Utc::now();

    // Get the next 10 timestamps starting from now
    cron.iter(&now).take(10).for_each(|t| println!("next: {t}"));

    Ok(())
}

#[test]
fn last_weekdays_of_2024() -> Result<()> {
    let cron = Cron::new("0 18 LW * ? 2024")?;
    let from = Utc.with_ymd_and_hms(2023, 12, 31, 0, 0, 0).unwrap();

    let days = cron
        .into_iter(&from)
        .map(|t| t.format("%m-%d").to_string())
        .collect::<Vec<_>>();
    assert_eq!(
        days,
        [
            "01-31", "02-29", "03-29", "04-30", "05-31", "06-28", "07-31", "08-30", "09-30", "10-31", "11-29", "12-31"
        ]
    );

    Ok(())
}
