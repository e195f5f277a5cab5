//! In-memory local repository implementation.
//!
//! Stores day records per room in ordered maps, which keeps every read sorted
//! without extra work. Suitable for unit testing and local development.

use async_trait::async_trait;
use chrono::NaiveDate;
use log::info;
use parking_lot::RwLock;
use rand::Rng;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::api::{DayRecord, RoomId};
use crate::db::repository::{
    BookingRepository, ErrorContext, RepositoryError, RepositoryResult, RoomRepository,
};
use crate::services::mock_data::{generate_rooms, MockDataConfig};

/// In-memory local repository.
///
/// # Example
/// ```
/// use room_analytics::api::{DayRecord, RoomId};
/// use room_analytics::db::repositories::LocalRepository;
///
/// let repo = LocalRepository::new();
/// let day = chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// repo.insert_series(&RoomId::new("A101"), vec![DayRecord::new(day, true, 120.0)]);
/// assert_eq!(repo.room_count(), 1);
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    rooms: BTreeMap<RoomId, BTreeMap<NaiveDate, DayRecord>>,
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            rooms: BTreeMap::new(),
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Create a repository filled with generated rooms starting at `start`.
    pub fn with_mock_data<R: Rng + ?Sized>(
        rng: &mut R,
        config: &MockDataConfig,
        start: NaiveDate,
    ) -> Self {
        let repo = Self::new();
        for (room_id, series) in generate_rooms(rng, config, start) {
            repo.insert_series(&room_id, series);
        }
        info!(
            "Seeded local repository with {} rooms, {} months from {}",
            repo.room_count(),
            config.months,
            start
        );
        repo
    }

    /// Insert records for a room, keeping existing (room, date) entries.
    ///
    /// Returns the number of records actually inserted.
    pub fn insert_series(
        &self,
        room_id: &RoomId,
        records: impl IntoIterator<Item = DayRecord>,
    ) -> usize {
        let mut data = self.data.write();
        let days = data.rooms.entry(room_id.clone()).or_default();

        let mut inserted = 0;
        for record in records {
            let Some(day) = record.day() else { continue };
            if let std::collections::btree_map::Entry::Vacant(slot) = days.entry(day) {
                slot.insert(record);
                inserted += 1;
            }
        }

        if days.is_empty() {
            data.rooms.remove(room_id);
        }
        inserted
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        self.data.write().rooms.clear();
    }

    /// Number of rooms holding at least one record.
    pub fn room_count(&self) -> usize {
        self.data.read().rooms.len()
    }

    /// Total number of stored day records.
    pub fn record_count(&self) -> usize {
        self.data.read().rooms.values().map(BTreeMap::len).sum()
    }

    fn check_health(&self, operation: &str) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(RepositoryError::connection_with_context(
                "Local store is not healthy",
                ErrorContext::new(operation).retryable(),
            ));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn list_room_ids(&self) -> RepositoryResult<Vec<RoomId>> {
        self.check_health("list_room_ids")?;
        Ok(self.data.read().rooms.keys().cloned().collect())
    }

    async fn fetch_day_series(
        &self,
        room_id: &RoomId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepositoryResult<Vec<DayRecord>> {
        self.check_health("fetch_day_series")?;
        if start > end {
            return Ok(Vec::new());
        }

        let data = self.data.read();
        Ok(data
            .rooms
            .get(room_id)
            .map(|days| days.range(start..=end).map(|(_, r)| r.clone()).collect())
            .unwrap_or_default())
    }
}

#[async_trait]
impl BookingRepository for LocalRepository {
    async fn store_day_records(
        &self,
        room_id: &RoomId,
        records: &[DayRecord],
    ) -> RepositoryResult<usize> {
        self.check_health("store_day_records")?;
        Ok(self.insert_series(room_id, records.iter().cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let repo = LocalRepository::new();
        assert!(repo.health_check().await.unwrap());

        repo.set_healthy(false);
        assert!(!repo.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_unhealthy_fetch_is_connection_error() {
        let repo = LocalRepository::new();
        repo.set_healthy(false);

        let result = repo
            .fetch_day_series(&RoomId::new("A101"), ymd(2024, 6, 1), ymd(2024, 7, 1))
            .await;
        let err = result.unwrap_err();
        assert!(matches!(err, RepositoryError::ConnectionError { .. }));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_fetch_is_inclusive_and_sorted() {
        let repo = LocalRepository::new();
        let room = RoomId::new("A101");
        repo.insert_series(
            &room,
            vec![
                DayRecord::new(ymd(2024, 6, 3), true, 3.0),
                DayRecord::new(ymd(2024, 6, 1), true, 1.0),
                DayRecord::new(ymd(2024, 6, 2), false, 2.0),
                DayRecord::new(ymd(2024, 6, 4), false, 4.0),
            ],
        );

        let series = repo
            .fetch_day_series(&room, ymd(2024, 6, 1), ymd(2024, 6, 3))
            .await
            .unwrap();

        let dates: Vec<&str> = series.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-06-01", "2024-06-02", "2024-06-03"]);
    }

    #[tokio::test]
    async fn test_unknown_room_returns_empty() {
        let repo = LocalRepository::new();
        let series = repo
            .fetch_day_series(&RoomId::new("Z999"), ymd(2024, 6, 1), ymd(2024, 7, 1))
            .await
            .unwrap();
        assert!(series.is_empty());
    }

    #[tokio::test]
    async fn test_store_ignores_duplicates_and_bad_dates() {
        let repo = LocalRepository::new();
        let room = RoomId::new("B202");
        let first = DayRecord::new(ymd(2024, 6, 1), true, 100.0);
        let mut bad = first.clone();
        bad.date = "not-a-date".to_string();

        let inserted = repo
            .store_day_records(&room, &[first.clone(), bad])
            .await
            .unwrap();
        assert_eq!(inserted, 1);

        let replay = DayRecord::new(ymd(2024, 6, 1), false, 50.0);
        assert_eq!(repo.store_day_records(&room, &[replay]).await.unwrap(), 0);

        let series = repo
            .fetch_day_series(&room, ymd(2024, 6, 1), ymd(2024, 6, 1))
            .await
            .unwrap();
        assert_eq!(series, vec![first]);
    }

    #[tokio::test]
    async fn test_room_with_only_bad_dates_is_not_listed() {
        let repo = LocalRepository::new();
        let mut bad = DayRecord::new(ymd(2024, 6, 1), true, 100.0);
        bad.date = "2024-13-01".to_string();

        repo.insert_series(&RoomId::new("C303"), vec![bad]);
        assert!(repo.list_room_ids().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mock_data_seeding() {
        let mut rng = StdRng::seed_from_u64(11);
        let config = MockDataConfig {
            enabled: true,
            room_count: 4,
            months: 2,
        };
        let repo = LocalRepository::with_mock_data(&mut rng, &config, ymd(2024, 6, 1));

        let rooms = repo.list_room_ids().await.unwrap();
        assert_eq!(rooms.len(), 4);
        assert!(rooms.windows(2).all(|w| w[0] < w[1]));
        // June + July
        assert_eq!(repo.record_count(), 4 * 61);
    }

    #[tokio::test]
    async fn test_clear() {
        let repo = LocalRepository::new();
        repo.insert_series(
            &RoomId::new("A101"),
            vec![DayRecord::new(ymd(2024, 6, 1), true, 100.0)],
        );
        repo.clear();
        assert_eq!(repo.room_count(), 0);
    }
}
