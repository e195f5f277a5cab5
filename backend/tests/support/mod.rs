#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;

use room_analytics::api::{DayRecord, RoomId};
use room_analytics::db::{RepositoryError, RepositoryResult, RoomRepository};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK poisoned");
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Serves a fixed series per room, filtered to the requested range.
pub struct FixedRepository {
    pub rooms: Vec<(RoomId, Vec<DayRecord>)>,
}

impl FixedRepository {
    pub fn single(room_id: &str, series: Vec<DayRecord>) -> Self {
        Self {
            rooms: vec![(RoomId::new(room_id), series)],
        }
    }
}

#[async_trait]
impl RoomRepository for FixedRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }

    async fn list_room_ids(&self) -> RepositoryResult<Vec<RoomId>> {
        let mut ids: Vec<RoomId> = self.rooms.iter().map(|(id, _)| id.clone()).collect();
        ids.sort();
        Ok(ids)
    }

    async fn fetch_day_series(
        &self,
        room_id: &RoomId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepositoryResult<Vec<DayRecord>> {
        Ok(self
            .rooms
            .iter()
            .filter(|(id, _)| id == room_id)
            .flat_map(|(_, series)| series.iter())
            .filter(|r| r.day().is_some_and(|d| d >= start && d <= end))
            .cloned()
            .collect())
    }
}

/// Fails every call with a connection error.
pub struct FailingRepository;

#[async_trait]
impl RoomRepository for FailingRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Err(RepositoryError::connection("connection refused"))
    }

    async fn list_room_ids(&self) -> RepositoryResult<Vec<RoomId>> {
        Err(RepositoryError::connection("connection refused"))
    }

    async fn fetch_day_series(
        &self,
        _room_id: &RoomId,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> RepositoryResult<Vec<DayRecord>> {
        Err(RepositoryError::connection("connection refused"))
    }
}

/// Answers after `delay`, with one booked day at `start`.
pub struct SlowRepository {
    pub delay: Duration,
}

#[async_trait]
impl RoomRepository for SlowRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }

    async fn list_room_ids(&self) -> RepositoryResult<Vec<RoomId>> {
        tokio::time::sleep(self.delay).await;
        Ok(vec![RoomId::new("A101")])
    }

    async fn fetch_day_series(
        &self,
        _room_id: &RoomId,
        start: NaiveDate,
        _end: NaiveDate,
    ) -> RepositoryResult<Vec<DayRecord>> {
        tokio::time::sleep(self.delay).await;
        Ok(vec![DayRecord::new(start, true, 100.0)])
    }
}
