//! Creation-date parsing for report cells and term bounds.

use chrono::{Datelike, NaiveDate};

/// Accepted date formats, tried in order; the first that parses wins.
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y", "%d.%m.%Y"];

/// Parses a date using [`DATE_FORMATS`].
///
/// Values carrying a time of day (`1/10/2023 9:15 AM`, `2023-01-10T09:15:00`)
/// are parsed from their leading date token. Returns `None` for empty or
/// unrecognized input.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    try_formats(trimmed).or_else(|| {
        let token = trimmed
            .split(|c: char| c.is_whitespace() || c == 'T')
            .next()
            .filter(|token| token.len() < trimmed.len())?;
        try_formats(token)
    })
}

fn try_formats(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS.iter().find_map(|fmt| {
        let date = NaiveDate::parse_from_str(value, fmt).ok()?;
        // %Y also accepts two-digit years; leave those to %y.
        if fmt.contains("%Y") && date.year() < 1000 {
            return None;
        }
        Some(date)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_iso_date() {
        assert_eq!(parse_date("2023-01-10"), Some(date(2023, 1, 10)));
    }

    #[test]
    fn test_us_dates() {
        assert_eq!(parse_date("1/10/2023"), Some(date(2023, 1, 10)));
        assert_eq!(parse_date("01/10/23"), Some(date(2023, 1, 10)));
    }

    #[test]
    fn test_dotted_date() {
        assert_eq!(parse_date("10.01.2023"), Some(date(2023, 1, 10)));
    }

    #[test]
    fn test_date_with_time_of_day() {
        assert_eq!(parse_date("1/10/2023 9:15 AM"), Some(date(2023, 1, 10)));
        assert_eq!(parse_date("2023-01-10 09:15:00"), Some(date(2023, 1, 10)));
        assert_eq!(parse_date("2023-01-10T09:15:00"), Some(date(2023, 1, 10)));
    }

    #[test]
    fn test_surrounding_whitespace() {
        assert_eq!(parse_date("  2023-01-10 "), Some(date(2023, 1, 10)));
    }

    #[test]
    fn test_unrecognized() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("   "), None);
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("2023-13-01"), None);
        assert_eq!(parse_date("Jan 10, 2023"), None);
    }
}
