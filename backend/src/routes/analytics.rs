use serde::{Deserialize, Serialize};

use crate::api::RoomId;

// =========================================================
// Room analytics types + route
// =========================================================

/// Share of booked days within one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyOccupancy {
    /// Month label in `YYYY-MM` form
    pub month: String,
    /// Booked days over observed days, as a percentage truncated to two decimals
    pub occupancy_percentage: f64,
}

/// Nightly rate statistics over the short rate window.
///
/// All fields are `0` when no day fell inside the window. That state cannot be
/// told apart from a window whose observed rates were all exactly zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RateAnalytics {
    pub average_rate: f64,
    pub highest_rate: f64,
    pub lowest_rate: f64,
}

/// Complete analytics payload for a single room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsResponse {
    pub room_id: RoomId,
    /// Ascending by month label
    pub monthly_occupancy: Vec<MonthlyOccupancy>,
    pub rate_analytics: RateAnalytics,
}

pub const GET_ROOM_ANALYTICS: &str = "get_room_analytics";
