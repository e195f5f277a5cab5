//! Postgres repository implementation using Diesel.
//!
//! Day records live in the `room_bookings` table, one row per (room, date).
//! Rates are stored as `DECIMAL(10, 2)` and read back as `float8`.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Retry with exponential backoff for transient failures
//! - Embedded migrations applied on startup
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)
//! - `PG_MAX_RETRIES`: Maximum retry attempts for transient failures (default: 3)
//! - `PG_RETRY_DELAY_MS`: Initial retry delay in milliseconds (default: 100)

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel::sql_types::{Bool, Date, Float8, Varchar};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::{debug, info, warn};
use std::str::FromStr;
use std::time::Duration;
use tokio::task;

use crate::api::{DayRecord, RoomId};
use crate::db::repository::{
    BookingRepository, ErrorContext, RepositoryError, RepositoryResult, RoomRepository,
};

mod models;
mod schema;

use models::DayRow;
use schema::room_bookings;

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

const SELECT_DAY_SERIES: &str = "SELECT date, is_booked, rate::float8 AS rate \
     FROM room_bookings \
     WHERE room_id = $1 AND date >= $2 AND date <= $3 \
     ORDER BY date";

const INSERT_DAY_RECORD: &str = "INSERT INTO room_bookings (room_id, date, is_booked, rate) \
     VALUES ($1, $2, $3, CAST($4 AS NUMERIC(10, 2))) \
     ON CONFLICT (room_id, date) DO NOTHING";

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool
    pub min_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_sec: u64,
    /// Extra attempts after a retryable failure
    pub max_retries: u32,
    /// Delay before the first retry, doubled after each one
    pub retry_delay_ms: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
            max_retries: 3,
            retry_delay_ms: 100,
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl PostgresConfig {
    /// Create configuration from the variables listed in the module docs.
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or PG_DATABASE_URL must be set".to_string())?;

        let defaults = Self::default();
        Ok(Self {
            database_url,
            max_pool_size: env_or("PG_POOL_MAX", defaults.max_pool_size),
            min_pool_size: env_or("PG_POOL_MIN", defaults.min_pool_size),
            connection_timeout_sec: env_or("PG_CONN_TIMEOUT_SEC", defaults.connection_timeout_sec),
            idle_timeout_sec: env_or("PG_IDLE_TIMEOUT_SEC", defaults.idle_timeout_sec),
            max_retries: env_or("PG_MAX_RETRIES", defaults.max_retries),
            retry_delay_ms: env_or("PG_RETRY_DELAY_MS", defaults.retry_delay_ms),
        })
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

/// Run `op` until it succeeds, fails with a non-retryable error, or
/// `max_retries` extra attempts are spent. `op` receives the zero-based
/// attempt number.
fn run_with_retry<T>(
    max_retries: u32,
    initial_delay: Duration,
    mut op: impl FnMut(u32) -> RepositoryResult<T>,
) -> RepositoryResult<T> {
    let mut delay = initial_delay;
    let mut attempt = 0;

    loop {
        match op(attempt) {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && attempt < max_retries => {
                warn!(
                    "Attempt {} failed, retrying in {:?}: {}",
                    attempt + 1,
                    delay,
                    err
                );
                std::thread::sleep(delay);
                delay *= 2;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Diesel-backed booking store.
#[derive(Clone, Debug)]
pub struct PostgresRepository {
    pool: PgPool,
    config: PostgresConfig,
}

impl PostgresRepository {
    /// Build the pool and apply pending migrations.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        let mut conn = pool.get().map_err(|e| {
            RepositoryError::connection_with_context(
                e.to_string(),
                ErrorContext::new("get_connection_for_migrations"),
            )
        })?;
        Self::run_migrations(&mut conn)?;
        drop(conn);

        Ok(Self { pool, config })
    }

    fn run_migrations(conn: &mut PgConnection) -> RepositoryResult<()> {
        let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Migration failed: {}", e),
                ErrorContext::new("run_migrations"),
            )
        })?;

        if !applied.is_empty() {
            info!("Applied {} pending migration(s)", applied.len());
        }

        Ok(())
    }

    /// Run `f` on a pooled connection inside the blocking thread pool,
    /// retrying transient failures.
    async fn with_conn<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: Fn(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        let max_retries = self.config.max_retries;
        let delay = Duration::from_millis(self.config.retry_delay_ms);

        task::spawn_blocking(move || {
            run_with_retry(max_retries, delay, |attempt| {
                let mut conn = pool.get().map_err(|e| {
                    RepositoryError::connection_with_context(
                        e.to_string(),
                        ErrorContext::new("get_connection")
                            .with_details(format!("attempt={}", attempt + 1))
                            .retryable(),
                    )
                })?;
                f(&mut conn)
            })
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }
}

fn map_diesel_error(err: diesel::result::Error) -> RepositoryError {
    RepositoryError::from(err)
}

#[async_trait]
impl RoomRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn(|conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn list_room_ids(&self) -> RepositoryResult<Vec<RoomId>> {
        self.with_conn(|conn| {
            let ids: Vec<String> = room_bookings::table
                .select(room_bookings::room_id)
                .distinct()
                .order(room_bookings::room_id.asc())
                .load(conn)
                .map_err(map_diesel_error)?;

            Ok(ids.into_iter().map(RoomId::new).collect())
        })
        .await
    }

    async fn fetch_day_series(
        &self,
        room_id: &RoomId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepositoryResult<Vec<DayRecord>> {
        let room = room_id.as_str().to_string();
        let rows = self
            .with_conn(move |conn| {
                sql_query(SELECT_DAY_SERIES)
                    .bind::<Varchar, _>(room.as_str())
                    .bind::<Date, _>(start)
                    .bind::<Date, _>(end)
                    .load::<DayRow>(conn)
                    .map_err(|e| map_diesel_error(e).with_operation("fetch_day_series"))
            })
            .await?;

        debug!(
            "Loaded {} day records for room={} in [{}, {}]",
            rows.len(),
            room_id,
            start,
            end
        );

        Ok(rows.into_iter().map(DayRecord::from).collect())
    }
}

#[async_trait]
impl BookingRepository for PostgresRepository {
    async fn store_day_records(
        &self,
        room_id: &RoomId,
        records: &[DayRecord],
    ) -> RepositoryResult<usize> {
        let room = room_id.as_str().to_string();
        let rows: Vec<(NaiveDate, bool, f64)> = records
            .iter()
            .filter_map(|r| r.day().map(|d| (d, r.is_booked, r.rate)))
            .collect();

        let inserted = self
            .with_conn(move |conn| {
                conn.transaction(|tx| {
                    let mut inserted = 0usize;
                    for (date, is_booked, rate) in &rows {
                        inserted += sql_query(INSERT_DAY_RECORD)
                            .bind::<Varchar, _>(room.as_str())
                            .bind::<Date, _>(*date)
                            .bind::<Bool, _>(*is_booked)
                            .bind::<Float8, _>(*rate)
                            .execute(tx)
                            .map_err(map_diesel_error)?;
                    }
                    Ok(inserted)
                })
            })
            .await?;

        info!(
            "Stored {} of {} day records for room={}",
            inserted,
            records.len(),
            room_id
        );
        Ok(inserted)
    }
}
