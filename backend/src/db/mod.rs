//! Storage layer for room booking data.
//!
//! Providers implement the repository traits so the analytics layer can be
//! pointed at any of them:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP layer / seed tool                                  │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Services (crate::services, db::services)               │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository traits (repository/)                         │
//! │  - RoomRepository (day-series reads)                     │
//! │  - BookingRepository (day-record writes)                 │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┼──────────────────┐
//!     │               │                  │
//! ┌───▼─────┐   ┌─────▼──────┐   ┌───────▼────────┐
//! │ Local   │   │ Postgres   │   │ Remote rooms   │
//! │ memory  │   │ (Diesel)   │   │ API (reqwest)  │
//! └─────────┘   └────────────┘   └────────────────┘
//! ```
//!
//! Use [`RepositoryFactory`] or [`RepositoryBuilder`] to pick a backend at
//! runtime; there is no process-wide repository instance.

#[cfg(not(any(
    feature = "postgres-repo",
    feature = "local-repo",
    feature = "remote-repo"
)))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;

#[cfg(test)]
#[path = "services_tests.rs"]
mod services_tests;

// Backend configs are colocated with their implementations.
#[cfg(feature = "postgres-repo")]
pub use repositories::postgres::PostgresConfig;
#[cfg(not(feature = "postgres-repo"))]
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    _private: (),
}

#[cfg(feature = "remote-repo")]
pub use repositories::remote::RemoteConfig;
#[cfg(not(feature = "remote-repo"))]
#[derive(Debug, Clone, Default)]
pub struct RemoteConfig {
    _private: (),
}

pub use services::{fetch_day_series, health_check, list_room_ids, seed_mock_rooms, SeedReport};

pub use repo_config::RepositoryConfig;

pub use factory::{RepositoryBuilder, RepositoryFactory, RepositoryType};
pub use repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
pub use repositories::PostgresRepository;
#[cfg(feature = "remote-repo")]
pub use repositories::RemoteRepository;
pub use repository::{
    BookingRepository, ErrorContext, RepositoryError, RepositoryResult, RoomRepository,
};
