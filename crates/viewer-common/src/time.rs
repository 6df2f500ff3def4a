//! Date handling for the daily raster archive.

use chrono::{Duration, NaiveDate};

/// Enumerate every date from `start` to `end` inclusive, ascending.
///
/// Returns an empty sequence when `start > end` and `[start]` when the
/// endpoints coincide.
pub fn expand_date_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut current = start;
    while current <= end {
        dates.push(current);
        current += Duration::days(1);
    }
    dates
}

/// Format a date for display, e.g. "Aug 15, 2025".
pub fn display_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// The (year, month) preceding the given one.
pub fn prev_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// The (year, month) following the given one.
pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_expand_single_day() {
        let day = d(2025, 8, 15);
        assert_eq!(expand_date_range(day, day), vec![day]);
    }

    #[test]
    fn test_expand_inverted_range_is_empty() {
        assert!(expand_date_range(d(2025, 8, 15), d(2025, 8, 14)).is_empty());
    }

    #[test]
    fn test_expand_crosses_month_boundary() {
        let dates = expand_date_range(d(2025, 7, 30), d(2025, 8, 2));
        assert_eq!(
            dates,
            vec![d(2025, 7, 30), d(2025, 7, 31), d(2025, 8, 1), d(2025, 8, 2)]
        );
    }

    #[test]
    fn test_display_date() {
        assert_eq!(display_date(d(2025, 8, 15)), "Aug 15, 2025");
        assert_eq!(display_date(d(2025, 1, 3)), "Jan 3, 2025");
    }

    #[test]
    fn test_month_arithmetic() {
        assert_eq!(prev_month(2025, 1), (2024, 12));
        assert_eq!(prev_month(2025, 6), (2025, 5));
        assert_eq!(next_month(2025, 12), (2026, 1));
        assert_eq!(next_month(2025, 6), (2025, 7));
    }
}
