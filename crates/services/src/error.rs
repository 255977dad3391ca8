//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by judge API clients.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum JudgeError {
    #[error("judge request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("judge rejected the request: {0}")]
    Api(String),
    #[error("judge response had no result")]
    EmptyResponse,
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted while reading process configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid URL in {var}: {raw}")]
    InvalidUrl { var: &'static str, raw: String },
    #[error("database URL cannot be empty")]
    EmptyDbUrl,
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
