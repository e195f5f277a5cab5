//! Service layer for booking analytics.
//!
//! The aggregators (`occupancy`, `rates`) are pure functions over a day
//! series. [`RoomAnalyticsService`] fetches the series from an injected
//! repository and assembles the response.

pub mod mock_data;
pub mod occupancy;
pub mod rates;
pub mod room_analytics;
pub mod rounding;


pub use mock_data::MockDataConfig;
pub use occupancy::compute_monthly_occupancy;
pub use rates::compute_rate_analytics;
pub use room_analytics::{AnalyticsError, RoomAnalyticsService};
pub use rounding::round2;
