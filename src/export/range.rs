use crate::errors::{AppError, AppResult};
use crate::utils::date::days_in_month;
use chrono::NaiveDate;

fn invalid(what: &str, raw: &str) -> AppError {
    AppError::InvalidDate(format!("{what} in range '{raw}'"))
}

/// First and last day covered by one side of a range.
fn bounds_of(part: &str, raw: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    match part.len() {
        // YYYY
        4 => {
            let y: i32 = part.parse().map_err(|_| invalid("invalid year", raw))?;
            let first = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(|| invalid("invalid year", raw))?;
            let last = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(|| invalid("invalid year", raw))?;
            Ok((first, last))
        }
        // YYYY-MM
        7 => {
            let y: i32 = part[0..4].parse().map_err(|_| invalid("invalid year", raw))?;
            let m: u32 = part[5..7].parse().map_err(|_| invalid("invalid month", raw))?;
            let last_day = days_in_month(y, m).ok_or_else(|| invalid("invalid month", raw))?;
            let first = NaiveDate::from_ymd_opt(y, m, 1).ok_or_else(|| invalid("invalid month", raw))?;
            let last =
                NaiveDate::from_ymd_opt(y, m, last_day).ok_or_else(|| invalid("invalid month", raw))?;
            Ok((first, last))
        }
        // YYYY-MM-DD
        10 => {
            let d = NaiveDate::parse_from_str(part, "%Y-%m-%d")
                .map_err(|_| invalid("invalid date", raw))?;
            Ok((d, d))
        }
        _ => Err(invalid("unsupported format", raw)),
    }
}

/// Parse `--range`.
///
/// Supported:
/// - `YYYY`, `YYYY-MM`, `YYYY-MM-DD`
/// - `start:end` with both sides in the same format
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let r = r.trim();
    match r.split_once(':') {
        Some((start, end)) => {
            let (start, end) = (start.trim(), end.trim());
            if start.len() != end.len() {
                return Err(invalid("start and end must have the same format", r));
            }
            let (first, _) = bounds_of(start, r)?;
            let (_, last) = bounds_of(end, r)?;
            if first > last {
                return Err(invalid("start is after end", r));
            }
            Ok((first, last))
        }
        None => bounds_of(r, r),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn month_range_ends_on_last_day() {
        assert_eq!(parse_range("2024-02").unwrap(), (d(2024, 2, 1), d(2024, 2, 29)));
        assert_eq!(parse_range("2025-02").unwrap(), (d(2025, 2, 1), d(2025, 2, 28)));
    }

    #[test]
    fn spans_and_single_days() {
        assert_eq!(
            parse_range("2025-06:2025-08").unwrap(),
            (d(2025, 6, 1), d(2025, 8, 31))
        );
        assert_eq!(parse_range("2025-06-18").unwrap(), (d(2025, 6, 18), d(2025, 6, 18)));
        assert_eq!(parse_range("2024:2025").unwrap(), (d(2024, 1, 1), d(2025, 12, 31)));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_range("2025-13").is_err());
        assert!(parse_range("2025-06:2025").is_err());
        assert!(parse_range("2025-08:2025-06").is_err());
        assert!(parse_range("june").is_err());
    }
}
