//! Monthly occupancy over the forward-looking occupancy window.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use super::rounding::round2;
use crate::api::{DayRecord, MonthlyOccupancy};
use crate::models::calendar::{self, DateWindow};

/// Calendar months covered by the occupancy window.
pub const OCCUPANCY_WINDOW_MONTHS: u32 = 5;

#[derive(Debug, Default, Clone, Copy)]
struct MonthTally {
    booked: usize,
    total: usize,
}

/// Occupancy window for `now`: `[now, now + 5 calendar months]`, both ends inclusive.
pub fn occupancy_window(now: NaiveDate) -> DateWindow {
    DateWindow::months_from(now, OCCUPANCY_WINDOW_MONTHS)
}

/// Percentage of booked days per calendar month inside the occupancy window.
///
/// Records with an unparseable date are skipped. Months without an observed
/// day in the window are omitted. The result is ascending by month label.
pub fn compute_monthly_occupancy(series: &[DayRecord], now: NaiveDate) -> Vec<MonthlyOccupancy> {
    let window = occupancy_window(now);
    let mut tallies: BTreeMap<String, MonthTally> = BTreeMap::new();

    for record in series {
        let Some(date) = record.day() else {
            continue;
        };
        if !window.contains(date) {
            continue;
        }

        let tally = tallies.entry(calendar::month_label(date)).or_default();
        tally.total += 1;
        if record.is_booked {
            tally.booked += 1;
        }
    }

    // BTreeMap iteration is already ordered by "YYYY-MM"
    tallies
        .into_iter()
        .map(|(month, tally)| MonthlyOccupancy {
            month,
            occupancy_percentage: round2(tally.booked as f64 / tally.total as f64 * 100.0),
        })
        .collect()
}
