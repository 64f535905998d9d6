//! Date and time-of-day parsing in local naive terms.
//!
//! All scheduling math works on `NaiveDateTime` built from the calendar
//! day the user typed, never converted through UTC, so an item entered
//! for "2024-05-10" can not drift onto a neighboring day.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

/// An item without a time of day is due by the end of that day.
pub fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).expect("Will never fail.")
}

/// Midnight local time on the given `YYYY-MM-DD` day.
pub fn parse_local_date(date: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    let date = NaiveDate::parse_from_str(date, DATE_FORMAT)?;
    Ok(date.and_time(NaiveTime::MIN))
}

/// The exact local instant for `YYYY-MM-DD` plus optional `HH:MM`,
/// defaulting to end of day when no time is supplied.
pub fn parse_local_date_time(
    date: &str,
    time: Option<&str>,
) -> Result<NaiveDateTime, chrono::ParseError> {
    let date = NaiveDate::parse_from_str(date, DATE_FORMAT)?;
    let time = match time {
        Some(time) => NaiveTime::parse_from_str(time, TIME_FORMAT)?,
        None => end_of_day(),
    };

    Ok(date.and_time(time))
}

pub fn local_instant(date: NaiveDate, time: Option<NaiveTime>) -> NaiveDateTime {
    date.and_time(time.unwrap_or_else(end_of_day))
}

/// Minutes since midnight, or `None` when no time is set.
pub fn time_to_minutes(time: Option<NaiveTime>) -> Option<i64> {
    time.map(|time| i64::from(time.hour()) * 60 + i64::from(time.minute()))
}
