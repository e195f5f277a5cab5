//! Public API surface for the Rust backend.
//!
//! This file consolidates the DTO types for the HTTP API.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::routes::analytics::AnalyticsResponse;
pub use crate::routes::analytics::MonthlyOccupancy;
pub use crate::routes::analytics::RateAnalytics;
pub use crate::routes::rooms::DayRecord;
pub use crate::routes::rooms::RoomListResponse;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Room identifier as stored by the booking provider (e.g. `"A123"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl RoomId {
    pub fn new(value: impl Into<String>) -> Self {
        RoomId(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the identifier is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomId {
    fn from(value: &str) -> Self {
        RoomId::new(value)
    }
}

impl From<String> for RoomId {
    fn from(value: String) -> Self {
        RoomId(value)
    }
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod api_tests;
