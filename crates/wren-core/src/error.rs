//! Core error types for wren-core.
//!
//! This module defines the error hierarchy using thiserror. Errors are
//! caught at the lifecycle dispatch boundary and converted to diagnostic
//! events; nothing here is allowed to crash app startup.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for wren-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Settings-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Browsing-data wipe errors
    #[error("Data clearing error: {0}")]
    Clear(#[from] ClearError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Settings-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load settings
    #[error("Failed to load settings from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save settings
    #[error("Failed to save settings to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid settings value
    #[error("Invalid settings value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse settings
    #[error("Failed to parse settings: {0}")]
    ParseFailed(String),
}

/// Errors from the external browsing-data wipe.
///
/// A failed wipe is non-fatal: the data clearer still advances to
/// `ClearedThisSession` and the error is surfaced for logging only.
#[derive(Error, Debug)]
pub enum ClearError {
    /// The wipe did not run at all
    #[error("Data wipe failed: {0}")]
    ActionFailed(String),

    /// The wipe ran but some stores could not be deleted
    #[error("Data wipe partially completed: {0}")]
    Partial(String),
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
