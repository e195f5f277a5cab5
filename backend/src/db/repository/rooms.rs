//! Day-series provider traits.
//!
//! [`RoomRepository`] is the read capability the analytics layer consumes.
//! [`BookingRepository`] is the write side used to load booking data into
//! stores that own it (in-memory, Postgres).

use async_trait::async_trait;
use chrono::NaiveDate;

use super::error::RepositoryResult;
use crate::api::{DayRecord, RoomId};

/// Read access to per-day booking records.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Check that the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// All known room identifiers, sorted ascending.
    async fn list_room_ids(&self) -> RepositoryResult<Vec<RoomId>>;

    /// Day records for `room_id` with `start <= date <= end`.
    ///
    /// # Returns
    /// * `Ok(Vec<DayRecord>)` - Records sorted ascending by date. An unknown
    ///   room yields an empty vector rather than an error.
    /// * `Err(RepositoryError)` - If the store cannot be reached or returns
    ///   data that cannot be decoded
    async fn fetch_day_series(
        &self,
        room_id: &RoomId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepositoryResult<Vec<DayRecord>>;
}

/// Write access to per-day booking records.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert day records for a room.
    ///
    /// A record whose (room, date) pair already exists is left untouched.
    /// Records with an unparseable date are not stored.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records actually inserted
    /// * `Err(RepositoryError)` - If the operation fails
    async fn store_day_records(
        &self,
        room_id: &RoomId,
        records: &[DayRecord],
    ) -> RepositoryResult<usize>;
}
