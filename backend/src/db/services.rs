//! High-level database service layer.
//!
//! Repository-agnostic operations used by the server and the seeding tool.
//!
//! # Usage
//!
//! ```no_run
//! use room_analytics::db::{services, repositories::LocalRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalRepository::new();
//!     let rooms = services::list_room_ids(&repo).await?;
//!     println!("Found {} rooms", rooms.len());
//!     Ok(())
//! }
//! ```

use chrono::NaiveDate;
use log::{info, warn};
use rand::Rng;

use super::repository::{BookingRepository, RepositoryResult, RoomRepository};
use crate::api::{DayRecord, RoomId};
use crate::services::mock_data::{generate_rooms, MockDataConfig};

// ==================== Health & Connection ====================

/// Check if the backing store is healthy.
pub async fn health_check<R: RoomRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

// ==================== Room Operations ====================

/// All room identifiers known to the store, sorted ascending.
pub async fn list_room_ids<R: RoomRepository + ?Sized>(repo: &R) -> RepositoryResult<Vec<RoomId>> {
    repo.list_room_ids().await
}

/// Day records for a room within `[start, end]`.
pub async fn fetch_day_series<R: RoomRepository + ?Sized>(
    repo: &R,
    room_id: &RoomId,
    start: NaiveDate,
    end: NaiveDate,
) -> RepositoryResult<Vec<DayRecord>> {
    repo.fetch_day_series(room_id, start, end).await
}

// ==================== Seeding ====================

/// Summary of a seeding run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub rooms: Vec<RoomId>,
    pub records_generated: usize,
    pub records_inserted: usize,
}

/// Generate mock rooms and store them.
///
/// Existing (room, date) rows are left untouched, so re-running only fills gaps.
pub async fn seed_mock_rooms<R, G>(
    repo: &R,
    rng: &mut G,
    config: &MockDataConfig,
    start: NaiveDate,
) -> RepositoryResult<SeedReport>
where
    R: BookingRepository + ?Sized,
    G: Rng + ?Sized,
{
    let mut report = SeedReport::default();

    for (room_id, series) in generate_rooms(rng, config, start) {
        let inserted = repo.store_day_records(&room_id, &series).await?;
        if inserted < series.len() {
            warn!(
                "Room {} already had {} of {} generated days",
                room_id,
                series.len() - inserted,
                series.len()
            );
        }
        report.records_generated += series.len();
        report.records_inserted += inserted;
        report.rooms.push(room_id);
    }

    info!(
        "Seeded {} rooms ({} of {} records inserted)",
        report.rooms.len(),
        report.records_inserted,
        report.records_generated
    );
    Ok(report)
}
