//! Repository implementations module.
//!
//! - `local`: In-memory implementation for unit testing and local development
//! - `postgres`: PostgreSQL implementation with Diesel ORM
//! - `remote`: Read-only client for a JSON rooms endpoint
pub mod local;
#[cfg(feature = "postgres-repo")]
pub mod postgres;
#[cfg(feature = "remote-repo")]
pub mod remote;

pub use local::LocalRepository;
#[cfg(feature = "postgres-repo")]
pub use postgres::{PostgresConfig, PostgresRepository};
#[cfg(feature = "remote-repo")]
pub use remote::{RemoteConfig, RemoteRepository};
