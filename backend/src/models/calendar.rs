//! Calendar helpers for day-series records.
//!
//! Booking providers exchange plain `YYYY-MM-DD` dates with no time-of-day or
//! timezone. Windows built here are closed on both ends.

use chrono::{Datelike, Days, Months, NaiveDate, Utc};

/// Wire format for day-series dates.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date, returning `None` for anything else.
pub fn parse_day(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, DAY_FORMAT).ok()
}

pub fn format_day(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

/// `YYYY-MM` label of the month containing `day`.
///
/// Labels sort lexicographically in chronological order.
pub fn month_label(day: NaiveDate) -> String {
    format!("{:04}-{:02}", day.year(), day.month())
}

/// Current UTC calendar date.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Calendar-month addition. Days past the end of the target month clamp to
/// its last day, so Jan 31 + 1 month is Feb 28 (or 29).
pub fn months_ahead(day: NaiveDate, months: u32) -> NaiveDate {
    day.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

/// Plain calendar-day addition.
pub fn days_ahead(day: NaiveDate, days: u64) -> NaiveDate {
    day.checked_add_days(Days::new(days))
        .unwrap_or(NaiveDate::MAX)
}

/// Closed date range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// `[start, start + months]` using calendar-month addition.
    pub fn months_from(start: NaiveDate, months: u32) -> Self {
        Self::new(start, months_ahead(start, months))
    }

    /// `[start, start + days]` using calendar-day addition.
    pub fn days_from(start: NaiveDate, days: u64) -> Self {
        Self::new(start, days_ahead(start, days))
    }

    /// Both bounds are inclusive.
    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.start && day <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_day_valid() {
        assert_eq!(parse_day("2024-06-01"), Some(ymd(2024, 6, 1)));
    }

    #[test]
    fn test_parse_day_rejects_other_formats() {
        assert_eq!(parse_day(""), None);
        assert_eq!(parse_day("2024/06/01"), None);
        assert_eq!(parse_day("2024-06-01T00:00:00Z"), None);
        assert_eq!(parse_day("2024-02-30"), None);
    }

    #[test]
    fn test_format_day_zero_pads() {
        assert_eq!(format_day(ymd(2024, 1, 5)), "2024-01-05");
    }

    #[test]
    fn test_month_label() {
        assert_eq!(month_label(ymd(2024, 3, 31)), "2024-03");
        assert_eq!(month_label(ymd(987, 11, 1)), "0987-11");
    }

    #[test]
    fn test_months_ahead_clamps_to_month_end() {
        assert_eq!(months_ahead(ymd(2024, 1, 31), 5), ymd(2024, 6, 30));
        assert_eq!(months_ahead(ymd(2023, 9, 30), 5), ymd(2024, 2, 29));
        assert_eq!(months_ahead(ymd(2024, 8, 15), 5), ymd(2025, 1, 15));
    }

    #[test]
    fn test_days_ahead_crosses_months() {
        assert_eq!(days_ahead(ymd(2024, 6, 1), 30), ymd(2024, 7, 1));
        assert_eq!(days_ahead(ymd(2024, 12, 15), 30), ymd(2025, 1, 14));
    }

    #[test]
    fn test_window_is_closed() {
        let window = DateWindow::days_from(ymd(2024, 6, 1), 30);
        assert!(window.contains(ymd(2024, 6, 1)));
        assert!(window.contains(ymd(2024, 7, 1)));
        assert!(!window.contains(ymd(2024, 5, 31)));
        assert!(!window.contains(ymd(2024, 7, 2)));
    }

    #[test]
    fn test_month_window_bounds() {
        let window = DateWindow::months_from(ymd(2024, 6, 1), 5);
        assert_eq!(window.end, ymd(2024, 11, 1));
        assert!(window.contains(ymd(2024, 11, 1)));
        assert!(!window.contains(ymd(2024, 11, 2)));
    }
}
