//! Core error types for hydrate-core.
//!
//! Errors follow a small hierarchy: command rejections (`StoreError`),
//! storage failures (`PersistenceError`, `ConfigError`), and a top-level
//! `CoreError` that wraps all of them. No error here is fatal to the
//! process -- storage failures degrade to defaults or best-effort writes,
//! and command rejections leave store state untouched.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for hydrate-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A store command was rejected.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Persistence collaborator failure.
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Configuration load/save failure.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Command rejections from the intake store.
///
/// A rejected command performs no state mutation and no persistence write.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum StoreError {
    /// `add_water` called with a non-positive amount.
    #[error("invalid amount: {amount} (must be positive)")]
    InvalidAmount { amount: f64 },

    /// `set_goal` / `complete_onboarding` called with a non-positive goal.
    #[error("invalid daily goal: {value} (must be positive)")]
    InvalidGoal { value: f64 },

    /// `try_undo_last` called with no pending entry to undo.
    #[error("nothing to undo")]
    NothingToUndo,
}

/// Persistence collaborator failures.
///
/// Load failures are recovered by falling back to defaults; save failures
/// are best-effort and leave the in-memory state authoritative.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Failed to open the backing database.
    #[error("failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed.
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// Database is locked.
    #[error("database is locked")]
    Locked,

    /// A stored record could not be decoded.
    #[error("corrupt record under key '{key}': {source}")]
    CorruptRecord {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A record could not be encoded for storage.
    #[error("failed to encode record for key '{key}': {source}")]
    EncodeFailed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Filesystem failure while locating or creating the data directory.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration.
    #[error("failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration.
    #[error("failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown or malformed configuration key.
    #[error("unknown configuration key: {0}")]
    UnknownKey(String),

    /// Value could not be parsed for the given key.
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

impl From<rusqlite::Error> for PersistenceError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _msg) => {
                if e.code == rusqlite::ErrorCode::DatabaseLocked {
                    PersistenceError::Locked
                } else {
                    PersistenceError::QueryFailed(e.to_string())
                }
            }
            _ => PersistenceError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
