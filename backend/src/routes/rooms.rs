use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::RoomId;
use crate::models::calendar;

// =========================================================
// Room listing + day-series types
// =========================================================

/// One room-day observation as served by a booking provider.
///
/// `date` keeps the provider's `YYYY-MM-DD` text so records with a malformed
/// date can still be carried and later skipped by the aggregators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    pub date: String,
    pub is_booked: bool,
    pub rate: f64,
}

impl DayRecord {
    pub fn new(date: NaiveDate, is_booked: bool, rate: f64) -> Self {
        Self {
            date: calendar::format_day(date),
            is_booked,
            rate,
        }
    }

    /// Parsed calendar date, `None` when the text is not a valid `YYYY-MM-DD`.
    pub fn day(&self) -> Option<NaiveDate> {
        calendar::parse_day(&self.date)
    }
}

/// Room listing response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomListResponse {
    pub rooms: Vec<RoomId>,
}

pub const LIST_ROOMS: &str = "list_rooms";
