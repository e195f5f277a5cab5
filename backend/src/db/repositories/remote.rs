//! Remote rooms API repository.
//!
//! Reads a JSON document mapping room identifiers to their day records:
//!
//! ```text
//! { "A101": [ { "date": "2024-06-01", "is_booked": true, "rate": 120.5 }, ... ], ... }
//! ```
//!
//! The whole collection is fetched per call and filtered locally. A room
//! missing from the document is reported as an empty series.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `ROOMS_API_URL`: Collection endpoint (default: `http://localhost:3001/rooms`)
//! - `ROOMS_API_TIMEOUT_SEC`: Request timeout in seconds (default: 10)

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::api::{DayRecord, RoomId};
use crate::db::repository::{RepositoryError, RepositoryResult, RoomRepository};

pub const DEFAULT_ROOMS_API_URL: &str = "http://localhost:3001/rooms";
pub const DEFAULT_ROOMS_API_TIMEOUT_SEC: u64 = 10;

/// Wire shape of the rooms collection.
pub type RoomsPayload = BTreeMap<String, Vec<DayRecord>>;

/// Configuration for the remote rooms API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    pub rooms_url: String,
    pub timeout_sec: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            rooms_url: DEFAULT_ROOMS_API_URL.to_string(),
            timeout_sec: DEFAULT_ROOMS_API_TIMEOUT_SEC,
        }
    }
}

impl RemoteConfig {
    pub fn from_env() -> Self {
        let rooms_url = std::env::var("ROOMS_API_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ROOMS_API_URL.to_string());

        let timeout_sec = std::env::var("ROOMS_API_TIMEOUT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_ROOMS_API_TIMEOUT_SEC);

        Self {
            rooms_url,
            timeout_sec,
        }
    }

    pub fn with_url(rooms_url: impl Into<String>) -> Self {
        Self {
            rooms_url: rooms_url.into(),
            ..Default::default()
        }
    }
}

/// Repository backed by a remote rooms endpoint.
#[derive(Clone, Debug)]
pub struct RemoteRepository {
    client: reqwest::Client,
    config: RemoteConfig,
}

impl RemoteRepository {
    pub fn new(config: RemoteConfig) -> RepositoryResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_sec))
            .build()
            .map_err(|e| {
                RepositoryError::configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    async fn fetch_payload(&self, operation: &str) -> RepositoryResult<RoomsPayload> {
        let response = self
            .client
            .get(&self.config.rooms_url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| RepositoryError::from(e).with_operation(operation))?;

        let payload: RoomsPayload = response
            .json()
            .await
            .map_err(|e| RepositoryError::from(e).with_operation(operation))?;

        debug!(
            "Fetched {} rooms from {}",
            payload.len(),
            self.config.rooms_url
        );
        Ok(payload)
    }
}

/// Records for `room_id` within `[start, end]`, sorted by date.
///
/// Records whose date cannot be parsed are dropped.
pub fn select_series(
    payload: &RoomsPayload,
    room_id: &RoomId,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<DayRecord> {
    let Some(records) = payload.get(room_id.as_str()) else {
        return Vec::new();
    };

    let mut dated: Vec<(NaiveDate, &DayRecord)> = records
        .iter()
        .filter_map(|r| r.day().map(|d| (d, r)))
        .filter(|(d, _)| *d >= start && *d <= end)
        .collect();

    let dropped = records.len() - records.iter().filter(|r| r.day().is_some()).count();
    if dropped > 0 {
        warn!(
            "Dropped {} record(s) with malformed dates for room={}",
            dropped, room_id
        );
    }

    dated.sort_by_key(|(d, _)| *d);
    dated.into_iter().map(|(_, r)| r.clone()).collect()
}

#[async_trait]
impl RoomRepository for RemoteRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        match self.client.get(&self.config.rooms_url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(e) => {
                warn!("Rooms API health check failed: {}", e);
                Ok(false)
            }
        }
    }

    async fn list_room_ids(&self) -> RepositoryResult<Vec<RoomId>> {
        let payload = self.fetch_payload("list_room_ids").await?;
        Ok(payload.into_keys().map(RoomId::new).collect())
    }

    async fn fetch_day_series(
        &self,
        room_id: &RoomId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepositoryResult<Vec<DayRecord>> {
        let payload = self.fetch_payload("fetch_day_series").await?;
        Ok(select_series(&payload, room_id, start, end))
    }
}
