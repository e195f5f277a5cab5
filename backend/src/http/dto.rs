//! Data Transfer Objects for the HTTP API.
//!
//! Analytics and room listing payloads are re-exported from the routes module
//! since they already derive Serialize/Deserialize.

use serde::{Deserialize, Serialize};

pub use crate::api::{AnalyticsResponse, MonthlyOccupancy, RateAnalytics, RoomListResponse};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// API version
    pub version: String,
    /// Provider connection status
    pub database: String,
}
