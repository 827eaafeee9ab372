mod config;
mod database;
mod memory;

pub use config::Config;
pub use database::Database;
pub use memory::MemoryStorage;

use std::path::PathBuf;

use crate::error::PersistenceError;
use crate::intake::{GoalConfig, LogEntry};

/// Storage key for the goal configuration record.
pub(crate) const GOAL_KEY: &str = "goal_config";
/// Storage key for the log-entry collection record.
pub(crate) const ENTRIES_KEY: &str = "water_logs";

/// Durable key-value persistence for the intake store.
///
/// Two logical records: the goal configuration and the log-entry
/// collection. Implementations must round-trip both exactly through a
/// stable structured encoding.
pub trait Persistence: Send {
    fn save_goal(&self, goal: &GoalConfig) -> Result<(), PersistenceError>;
    fn save_entries(&self, entries: &[LogEntry]) -> Result<(), PersistenceError>;
    fn load_goal(&self) -> Result<Option<GoalConfig>, PersistenceError>;
    fn load_entries(&self) -> Result<Vec<LogEntry>, PersistenceError>;
}

impl<T: Persistence + Sync> Persistence for std::sync::Arc<T> {
    fn save_goal(&self, goal: &GoalConfig) -> Result<(), PersistenceError> {
        (**self).save_goal(goal)
    }

    fn save_entries(&self, entries: &[LogEntry]) -> Result<(), PersistenceError> {
        (**self).save_entries(entries)
    }

    fn load_goal(&self) -> Result<Option<GoalConfig>, PersistenceError> {
        (**self).load_goal()
    }

    fn load_entries(&self) -> Result<Vec<LogEntry>, PersistenceError> {
        (**self).load_entries()
    }
}

/// Returns `~/.config/hydrate[-dev]/` based on HYDRATE_ENV.
///
/// Set HYDRATE_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("HYDRATE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("hydrate-dev")
    } else {
        base_dir.join("hydrate")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
