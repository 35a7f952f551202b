//! Cron expressions parser and next event calculator.
#![deny(unsafe_code, warnings, missing_docs)]

//! This crate is intended to:
//! - parse cron expressions with Quartz-style `L`, `W` and `#` extensions;
//! - combine several expressions into a single schedule using `|` alternatives;
//! - calculate the next event of such a schedule, or check if some time is an event.
//!
//! _This is not a cron jobs scheduler or runner._
//!
//! ## Cron expression format
//!
//! Expression has 4 to 6 whitespace separated fields: minutes, hours, days of month, months,
//! and optional days of week and years:
//! - if _days of week_ is missing, `?` is used;
//! - if _years_ is missing, `*` is used.
//!
//! Seconds can't be specified, each event happens at the start of a minute.
//!
//! The table below describes valid values and patterns of each field:
//!
//! | Field        | Required | Allowed values    | Allowed special characters |
//! |--------------|----------|-------------------|----------------------------|
//! | Minutes      | Yes      | 0-59              | * , - /                    |
//! | Hours        | Yes      | 0-23              | * , - /                    |
//! | Day of Month | Yes      | 1-31              | * , - / ? L W              |
//! | Month        | Yes      | 1-12 or JAN-DEC   | * , - /                    |
//! | Day of Week  | No       | 0-7 or SUN-SAT    | * , - / ? L #              |
//! | Year         | No       | 1970-2099         | * , - /                    |
//!
//! Patterns meanings:
//! - `*` - each possible value, i.e. `0,1,2,...,59` for minutes;
//! - `?` - for days of month or week means that value doesn't matter;
//! - `,` - list of values or patterns, i.e. `1,7,12`, `SUN,FRI`;
//! - `-` - range of values, i.e. `0-15`, `JAN-MAR`;
//! - `/` - repeating values, i.e. `*/12`, `10/5`, `30-59/2`;
//! - `L` - last day of the month, or last particular day of the week in the month, i.e. `L` or `5L`;
//! - `LW` - last weekday (Monday to Friday) of the month;
//! - `W` - the weekday nearest to the specified day of month in the same month, i.e. `22W`;
//! - `#` - specific instance of the day of week in the month, i.e. `fri#1`, `1#4`.
//!
//! Both `0` and `7` mean Sunday. Day of month and day of week conditions should be met both.
//!
//! Also, short aliases for well-known expressions are allowed:
//!
//! | Alias                      | Expression  |
//! |----------------------------|-------------|
//! | `@yearly` (or `@annually`) | 0 0 1 1 ?   |
//! | `@monthly`                 | 0 0 1 * ?   |
//! | `@weekly`                  | 0 0 ? * 0   |
//! | `@daily` (or `@midnight`)  | 0 0 * * ?   |
//! | `@hourly`                  | 0 * * * ?   |
//!
//! ## How to use
//!
//! The main entity of the crate is a [`Cron`] structure, which has few basic methods:
//! - [new()](Cron::new): constructor to parse and validate provided schedule;
//! - [next_date()](Cron::next_date): returns time of the next schedule's event, strictly after the provided timestamp;
//! - [matches()](Cron::matches): checks if the provided timestamp is the time of an event;
//! - [iter()](Cron::iter): returns an `Iterator` which produces a series of timestamps according to the schedule.
//!
//! ### Example with `next_date`
//! ```rust
//! use chrono::Utc;
//! use cron_stepper::{Cron, Result};
//!
//! fn next_date() -> Result<()> {
//!     let cron = Cron::new("0 12 ? * mon-fri | 0 10 ? * sat,sun")?;
//!     let now = Utc::now();
//!
//!     // Get the next event's timestamp starting from now
//!     let next = cron.next_date(&now);
//!     assert!(next.is_some());
//!
//!     println!("next: {:?}", next.unwrap());
//!
//!     Ok(())
//! }
//! # next_date().unwrap();
//! ```
//!
//! ### Example with `iter`
//! ```rust
//! use chrono::Utc;
//! use cron_stepper::{Cron, Result};
//!
//! fn iterator() -> Result<()> {
//!     let cron = Cron::new("0 0 LW * ?")?;
//!     let now = Utc::now();
//!
//!     // Get the next 10 timestamps starting from now
//!     cron.iter(&now).take(10).for_each(|t| println!("next: {t}"));
//!
//!     Ok(())
//! }
//! # iterator().unwrap();
//! ```
//!
//! ### Example with options
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use cron_stepper::{Cron, CronOptions, February};
//!
//! let options = CronOptions::default().with_february(February::AlwaysShort);
//! let cron = Cron::with_options("0 0 L 2 ?", options).unwrap();
//! let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//!
//! assert_eq!(cron.next_date(&from), Utc.with_ymd_and_hms(2024, 2, 28, 0, 0, 0).single());
//! ```
//!
//! # Feature flags
//! * `serde`: adds [`Serialize`](https://docs.rs/serde/latest/serde/trait.Serialize.html) and [`Deserialize`](https://docs.rs/serde/latest/serde/trait.Deserialize.html) trait implementation for [`Cron`] and [`CronOptions`].

/// Date arithmetic in calendar units.
pub mod calendar;
/// Cron schedule made of alternative expressions.
pub mod cron;
/// Crate specific Error implementation.
pub mod error;
/// Single cron expression parser.
pub mod expression;
/// Catalog of expression fields.
pub mod field;
/// Options of schedule evaluation.
pub mod options;
/// Parsed patterns of a single field.
pub mod pattern;
mod stepper;
mod utils;

// Re-export of public entities.
pub use cron::{Cron, CronIterator};
pub use error::{CronError, InvalidCause};
pub use expression::Expression;
pub use field::{Field, MAX_YEAR, MIN_YEAR};
pub use options::{CronOptions, February};
pub use pattern::FieldPattern;

/// Convenient alias for `Result`.
pub type Result<T, E = CronError> = std::result::Result<T, E>;
