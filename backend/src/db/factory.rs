//! Repository factory for dependency injection.
//!
//! This module provides utilities for creating and configuring repository instances
//! based on runtime configuration.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use super::repo_config::RepositoryConfig;
use super::repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
use super::repositories::PostgresRepository;
#[cfg(feature = "remote-repo")]
use super::repositories::RemoteRepository;
use super::repository::{RepositoryError, RepositoryResult, RoomRepository};
use super::{PostgresConfig, RemoteConfig};
use crate::models::calendar;
use crate::services::mock_data::MockDataConfig;

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// Postgres + Diesel implementation
    Postgres,
    /// In-memory local repository
    Local,
    /// Remote JSON rooms endpoint
    Remote,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string.
    ///
    /// # Arguments
    /// * `s` - String representation ("postgres", "pg", "local", "remote", "http")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "pg" => Ok(Self::Postgres),
            "local" | "memory" => Ok(Self::Local),
            "remote" | "http" => Ok(Self::Remote),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from environment variables.
    ///
    /// `REPOSITORY_TYPE` wins when set and valid. Otherwise a database URL
    /// selects Postgres, a `ROOMS_API_URL` selects Remote, and the fallback
    /// is Local.
    pub fn from_env() -> Self {
        if let Ok(val) = std::env::var("REPOSITORY_TYPE") {
            return val.parse().unwrap_or(Self::Local);
        }

        if std::env::var("DATABASE_URL").is_ok() || std::env::var("PG_DATABASE_URL").is_ok() {
            Self::Postgres
        } else if std::env::var("ROOMS_API_URL").is_ok() {
            Self::Remote
        } else {
            Self::Local
        }
    }
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```ignore
/// use room_analytics::db::{RepositoryFactory, RepositoryType};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let repo = RepositoryFactory::create(RepositoryType::Local, None, None).await?;
///     let rooms = repo.list_room_ids().await?;
///     Ok(())
/// }
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// # Arguments
    /// * `repo_type` - Type of repository to create
    /// * `postgres_config` - Database configuration (required for Postgres)
    /// * `remote_config` - Rooms API configuration (defaults apply when absent)
    pub async fn create(
        repo_type: RepositoryType,
        postgres_config: Option<&PostgresConfig>,
        remote_config: Option<&RemoteConfig>,
    ) -> RepositoryResult<Arc<dyn RoomRepository>> {
        match repo_type {
            RepositoryType::Postgres => {
                #[cfg(feature = "postgres-repo")]
                {
                    let config = postgres_config.ok_or_else(|| {
                        RepositoryError::configuration(
                            "Postgres repository requires PostgresConfig",
                        )
                    })?;
                    let pg = Self::create_postgres(config).await?;
                    Ok(pg as Arc<dyn RoomRepository>)
                }
                #[cfg(not(feature = "postgres-repo"))]
                {
                    let _ = postgres_config;
                    Err(RepositoryError::configuration(
                        "Postgres repository feature not enabled",
                    ))
                }
            }
            RepositoryType::Remote => {
                #[cfg(feature = "remote-repo")]
                {
                    let config = remote_config.cloned().unwrap_or_default();
                    let remote = Self::create_remote(config)?;
                    Ok(remote as Arc<dyn RoomRepository>)
                }
                #[cfg(not(feature = "remote-repo"))]
                {
                    let _ = remote_config;
                    Err(RepositoryError::configuration(
                        "Remote repository feature not enabled",
                    ))
                }
            }
            RepositoryType::Local => Ok(Self::create_local_from_env()),
        }
    }

    /// Create a Postgres repository.
    ///
    /// Pool setup and migrations block, so they run on the blocking pool.
    #[cfg(feature = "postgres-repo")]
    pub async fn create_postgres(
        config: &PostgresConfig,
    ) -> RepositoryResult<Arc<PostgresRepository>> {
        let config = config.clone();
        let repo = tokio::task::spawn_blocking(move || PostgresRepository::new(config))
            .await
            .map_err(|e| RepositoryError::internal(format!("Task join error: {}", e)))??;
        log::info!("Connected Postgres repository");
        Ok(Arc::new(repo))
    }

    /// Create a remote rooms API repository.
    #[cfg(feature = "remote-repo")]
    pub fn create_remote(config: RemoteConfig) -> RepositoryResult<Arc<RemoteRepository>> {
        log::info!("Using remote rooms API at {}", config.rooms_url);
        Ok(Arc::new(RemoteRepository::new(config)?))
    }

    /// Create an empty in-memory local repository.
    pub fn create_local() -> Arc<LocalRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create an in-memory repository, seeded with mock rooms when
    /// `config.enabled` is set.
    pub fn create_local_seeded(config: &MockDataConfig) -> Arc<LocalRepository> {
        if !config.enabled {
            return Self::create_local();
        }
        let mut rng = rand::thread_rng();
        Arc::new(LocalRepository::with_mock_data(
            &mut rng,
            config,
            calendar::today(),
        ))
    }

    fn create_local_from_env() -> Arc<dyn RoomRepository> {
        Self::create_local_seeded(&MockDataConfig::from_env())
    }

    /// Create repository from environment configuration.
    pub async fn from_env() -> RepositoryResult<Arc<dyn RoomRepository>> {
        RepositoryBuilder::new().from_env()?.build().await
    }

    /// Create repository from a TOML configuration file.
    pub async fn from_config_file<P: AsRef<Path>>(
        config_path: P,
    ) -> RepositoryResult<Arc<dyn RoomRepository>> {
        RepositoryBuilder::new()
            .from_config_file(config_path)?
            .build()
            .await
    }

    /// Create repository from the default configuration file location.
    ///
    /// Searches for `repository.toml` in standard locations.
    pub async fn from_default_config() -> RepositoryResult<Arc<dyn RoomRepository>> {
        RepositoryBuilder::new().from_default_config()?.build().await
    }
}

/// Builder for configuring repository creation.
///
/// # Example
/// ```ignore
/// use room_analytics::db::{RepositoryBuilder, RepositoryType};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let repo = RepositoryBuilder::new()
///         .repository_type(RepositoryType::Local)
///         .build()
///         .await?;
///     Ok(())
/// }
/// ```
pub struct RepositoryBuilder {
    repo_type: RepositoryType,
    postgres_config: Option<PostgresConfig>,
    remote_config: Option<RemoteConfig>,
}

impl RepositoryBuilder {
    /// Create a new repository builder, picking the type from the environment.
    pub fn new() -> Self {
        Self {
            repo_type: RepositoryType::from_env(),
            postgres_config: None,
            remote_config: None,
        }
    }

    /// Set the repository type.
    pub fn repository_type(mut self, repo_type: RepositoryType) -> Self {
        self.repo_type = repo_type;
        self
    }

    /// Set the Postgres configuration.
    pub fn postgres_config(mut self, config: PostgresConfig) -> Self {
        self.postgres_config = Some(config);
        self
    }

    /// Set the remote rooms API configuration.
    pub fn remote_config(mut self, config: RemoteConfig) -> Self {
        self.remote_config = Some(config);
        self
    }

    /// Load configuration from environment variables.
    pub fn from_env(mut self) -> Result<Self, RepositoryError> {
        self.repo_type = RepositoryType::from_env();

        match self.repo_type {
            RepositoryType::Postgres => {
                #[cfg(feature = "postgres-repo")]
                {
                    let config =
                        PostgresConfig::from_env().map_err(RepositoryError::configuration)?;
                    self.postgres_config = Some(config);
                }
                #[cfg(not(feature = "postgres-repo"))]
                {
                    return Err(RepositoryError::configuration(
                        "Postgres repository feature not enabled",
                    ));
                }
            }
            RepositoryType::Remote => {
                #[cfg(feature = "remote-repo")]
                {
                    self.remote_config = Some(RemoteConfig::from_env());
                }
                #[cfg(not(feature = "remote-repo"))]
                {
                    return Err(RepositoryError::configuration(
                        "Remote repository feature not enabled",
                    ));
                }
            }
            RepositoryType::Local => {}
        }

        Ok(self)
    }

    /// Load configuration from a TOML file.
    pub fn from_config_file<P: AsRef<Path>>(self, config_path: P) -> Result<Self, RepositoryError> {
        let repo_config = RepositoryConfig::from_file(config_path)?;
        self.apply_repository_config(&repo_config)
    }

    /// Load configuration from default location.
    ///
    /// Searches for `repository.toml` in standard locations.
    pub fn from_default_config(self) -> Result<Self, RepositoryError> {
        let repo_config = RepositoryConfig::from_default_location()?;
        self.apply_repository_config(&repo_config)
    }

    fn apply_repository_config(
        mut self,
        repo_config: &RepositoryConfig,
    ) -> Result<Self, RepositoryError> {
        self.repo_type = repo_config.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;
        self.postgres_config = repo_config.to_postgres_config()?;
        self.remote_config = repo_config.to_remote_config()?;
        Ok(self)
    }

    /// Build the repository instance.
    pub async fn build(self) -> RepositoryResult<Arc<dyn RoomRepository>> {
        RepositoryFactory::create(
            self.repo_type,
            self.postgres_config.as_ref(),
            self.remote_config.as_ref(),
        )
        .await
    }
}

impl Default for RepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
