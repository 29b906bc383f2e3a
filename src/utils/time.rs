//! Time utilities: parsing HH:MM, minute arithmetic, formatting minutes.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveTime, Timelike};

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

/// Parse a HH:MM string, reporting the offending text on failure.
pub fn parse_time_strict(t: &str) -> AppResult<NaiveTime> {
    parse_time(t).ok_or_else(|| AppError::InvalidTime(t.to_string()))
}

pub fn format_time(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Add `minutes` to a clock time, wrapping around midnight.
pub fn add_minutes(time: NaiveTime, minutes: u32) -> NaiveTime {
    let total = (time.hour() * 60 + time.minute() + minutes % MINUTES_PER_DAY) % MINUTES_PER_DAY;
    NaiveTime::from_hms_opt(total / 60, total % 60, 0).unwrap_or(time)
}

/// Minutes from `start` to `end`. A negative span is an `InvalidTimeRange`.
pub fn minutes_between_times(start: NaiveTime, end: NaiveTime) -> AppResult<i64> {
    let mins = (end - start).num_minutes();
    if mins < 0 {
        return Err(AppError::time_range(format_time(start), format_time(end)));
    }
    Ok(mins)
}

/// String flavour of [`minutes_between_times`]: malformed input is reported
/// as an `InvalidTimeRange` as well.
pub fn minutes_between(start: &str, end: &str) -> AppResult<i64> {
    match (parse_time(start), parse_time(end)) {
        (Some(s), Some(e)) => minutes_between_times(s, e),
        _ => Err(AppError::time_range(start, end)),
    }
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    if let Some(s) = input {
        Ok(Some(parse_time_strict(s)?))
    } else {
        Ok(None)
    }
}
