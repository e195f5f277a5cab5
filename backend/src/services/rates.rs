//! Nightly rate statistics over the short rate window.

use chrono::NaiveDate;

use super::rounding::round2;
use crate::api::{DayRecord, RateAnalytics};
use crate::models::calendar::DateWindow;

/// Days covered by the rate window past `now`.
pub const RATE_WINDOW_DAYS: u64 = 30;

/// Rate window for `now`: `[now, now + 30 days]`, both ends inclusive.
pub fn rate_window(now: NaiveDate) -> DateWindow {
    DateWindow::days_from(now, RATE_WINDOW_DAYS)
}

/// Average, highest and lowest nightly rate inside the rate window.
///
/// Booked and free days both contribute. Records with an unparseable date are
/// skipped. With no record in the window every field is `0`.
pub fn compute_rate_analytics(series: &[DayRecord], now: NaiveDate) -> RateAnalytics {
    let window = rate_window(now);
    let rates: Vec<f64> = series
        .iter()
        .filter(|r| r.day().is_some_and(|d| window.contains(d)))
        .map(|r| r.rate)
        .collect();

    if rates.is_empty() {
        return RateAnalytics::default();
    }

    let sum: f64 = rates.iter().sum();
    let highest = rates.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let lowest = rates.iter().copied().fold(f64::INFINITY, f64::min);

    RateAnalytics {
        average_rate: round2(sum / rates.len() as f64),
        highest_rate: round2(highest),
        lowest_rate: round2(lowest),
    }
}
