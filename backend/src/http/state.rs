//! Application state for the HTTP server.

use std::sync::Arc;
use std::time::Duration;

use crate::db::repository::RoomRepository;
use crate::services::RoomAnalyticsService;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Day-series provider, also used for health and room listing
    pub repository: Arc<dyn RoomRepository>,
    /// Analytics over the same provider
    pub analytics: RoomAnalyticsService,
}

impl AppState {
    /// Create a new application state with the given repository.
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        let analytics = RoomAnalyticsService::new(repository.clone());
        Self {
            repository,
            analytics,
        }
    }

    /// Override the day-series fetch timeout.
    pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.analytics = self.analytics.with_fetch_timeout(fetch_timeout);
        self
    }
}
