use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Day of the week as stored in `default_weekly_slots.day_of_week`
/// (Sunday = 0 … Saturday = 6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum DayOfWeek {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Sunday,
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(i: i64) -> Option<Self> {
        usize::try_from(i).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    /// Weekday of a calendar date (proleptic Gregorian).
    pub fn of(date: NaiveDate) -> Self {
        Self::ALL[date.weekday().num_days_from_sunday() as usize]
    }

    /// Weekday of a day in a month; `None` when the date does not exist.
    pub fn of_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self::of)
    }

    pub fn short(self) -> &'static str {
        match self {
            DayOfWeek::Sunday => "Sun",
            DayOfWeek::Monday => "Mon",
            DayOfWeek::Tuesday => "Tue",
            DayOfWeek::Wednesday => "Wed",
            DayOfWeek::Thursday => "Thu",
            DayOfWeek::Friday => "Fri",
            DayOfWeek::Saturday => "Sat",
        }
    }

    /// Accepts `0`-`6`, three-letter abbreviations and full English names.
    pub fn parse(s: &str) -> AppResult<Self> {
        let t = s.trim().to_ascii_lowercase();
        if let Ok(i) = t.parse::<i64>() {
            return Self::from_index(i).ok_or_else(|| AppError::InvalidWeekday(s.to_string()));
        }
        Self::ALL
            .into_iter()
            .find(|d| {
                let short = d.short().to_ascii_lowercase();
                t == short || t == format!("{:?}", d).to_ascii_lowercase()
            })
            .ok_or_else(|| AppError::InvalidWeekday(s.to_string()))
    }
}
