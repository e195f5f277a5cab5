//! Room analytics assembly.
//!
//! [`RoomAnalyticsService`] fetches one day-series for a room, covering the
//! widest window either aggregator needs, and runs the occupancy and rate
//! aggregators over it.

use chrono::NaiveDate;
use log::{debug, warn};
use std::sync::Arc;
use std::time::Duration;

use super::occupancy::{compute_monthly_occupancy, occupancy_window};
use super::rates::compute_rate_analytics;
use crate::api::{AnalyticsResponse, DayRecord, RoomId};
use crate::db::repository::{ErrorContext, RepositoryError, RoomRepository};
use crate::models::calendar;

/// Default bound on a single day-series fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_millis(5000);

/// Failures surfaced to callers of the analytics service.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    /// Room identifier was empty or blank.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Provider has no day-series data for the room.
    #[error("Room not found: {0}")]
    NotFound(RoomId),

    /// Provider failed, timed out, or returned malformed data.
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(#[source] RepositoryError),
}

impl From<RepositoryError> for AnalyticsError {
    fn from(err: RepositoryError) -> Self {
        AnalyticsError::UpstreamUnavailable(err)
    }
}

/// Read `ANALYTICS_FETCH_TIMEOUT_MS`, falling back to [`DEFAULT_FETCH_TIMEOUT`].
pub fn fetch_timeout_from_env() -> Duration {
    std::env::var("ANALYTICS_FETCH_TIMEOUT_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_FETCH_TIMEOUT)
}

/// Computes analytics for rooms served by an injected day-series provider.
#[derive(Clone)]
pub struct RoomAnalyticsService {
    repository: Arc<dyn RoomRepository>,
    fetch_timeout: Duration,
}

impl RoomAnalyticsService {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self {
            repository,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }

    pub fn repository(&self) -> &Arc<dyn RoomRepository> {
        &self.repository
    }

    /// Analytics for `room_id` as of today's UTC date.
    pub async fn get_room_analytics(
        &self,
        room_id: &RoomId,
    ) -> Result<AnalyticsResponse, AnalyticsError> {
        self.get_room_analytics_on(room_id, calendar::today()).await
    }

    /// Analytics for `room_id` as of `today`.
    ///
    /// # Errors
    /// * [`AnalyticsError::InvalidInput`] - blank room identifier
    /// * [`AnalyticsError::NotFound`] - the provider returned no records
    /// * [`AnalyticsError::UpstreamUnavailable`] - the fetch failed or timed out
    pub async fn get_room_analytics_on(
        &self,
        room_id: &RoomId,
        today: NaiveDate,
    ) -> Result<AnalyticsResponse, AnalyticsError> {
        if room_id.is_blank() {
            return Err(AnalyticsError::InvalidInput(
                "room ID is required".to_string(),
            ));
        }

        // The occupancy window contains the 30-day rate window
        let window = occupancy_window(today);
        let series = self.fetch_with_timeout(room_id, window.start, window.end).await?;

        if series.is_empty() {
            return Err(AnalyticsError::NotFound(room_id.clone()));
        }

        let monthly_occupancy = compute_monthly_occupancy(&series, today);
        let rate_analytics = compute_rate_analytics(&series, today);

        debug!(
            "Computed analytics for room={} records={} months={}",
            room_id,
            series.len(),
            monthly_occupancy.len()
        );

        Ok(AnalyticsResponse {
            room_id: room_id.clone(),
            monthly_occupancy,
            rate_analytics,
        })
    }

    /// Identifiers of every room the provider knows about.
    pub async fn list_room_ids(&self) -> Result<Vec<RoomId>, AnalyticsError> {
        self.repository
            .list_room_ids()
            .await
            .map_err(AnalyticsError::UpstreamUnavailable)
    }

    async fn fetch_with_timeout(
        &self,
        room_id: &RoomId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DayRecord>, AnalyticsError> {
        let fetch = self.repository.fetch_day_series(room_id, start, end);

        match tokio::time::timeout(self.fetch_timeout, fetch).await {
            Ok(Ok(series)) => Ok(series),
            Ok(Err(err)) if err.is_not_found() => Err(AnalyticsError::NotFound(room_id.clone())),
            Ok(Err(err)) => {
                warn!("Day-series fetch failed for room={}: {}", room_id, err);
                Err(AnalyticsError::UpstreamUnavailable(err))
            }
            Err(_) => {
                warn!(
                    "Day-series fetch for room={} exceeded {:?}",
                    room_id, self.fetch_timeout
                );
                Err(AnalyticsError::UpstreamUnavailable(
                    RepositoryError::timeout_with_context(
                        format!("fetch exceeded {} ms", self.fetch_timeout.as_millis()),
                        ErrorContext::new("fetch_day_series")
                            .with_entity("room")
                            .with_entity_id(room_id),
                    ),
                ))
            }
        }
    }
}
