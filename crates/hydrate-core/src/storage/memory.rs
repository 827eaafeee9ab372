//! In-memory persistence for tests and embedding.

use std::collections::HashMap;
use std::sync::Mutex;

use super::{Persistence, ENTRIES_KEY, GOAL_KEY};
use crate::error::PersistenceError;
use crate::intake::{GoalConfig, LogEntry};

/// Key-value persistence backed by a map of JSON strings.
///
/// Records go through the same serde encoding as the SQLite store, so
/// round-trip behavior matches the durable path.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    cells: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn get(&self, key: &str) -> Option<String> {
        self.cells.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.cells.lock().unwrap().insert(key.to_string(), value);
    }
}

impl Persistence for MemoryStorage {
    fn save_goal(&self, goal: &GoalConfig) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(goal).map_err(|source| {
            PersistenceError::EncodeFailed {
                key: GOAL_KEY.to_string(),
                source,
            }
        })?;
        self.set(GOAL_KEY, json);
        Ok(())
    }

    fn save_entries(&self, entries: &[LogEntry]) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(entries).map_err(|source| {
            PersistenceError::EncodeFailed {
                key: ENTRIES_KEY.to_string(),
                source,
            }
        })?;
        self.set(ENTRIES_KEY, json);
        Ok(())
    }

    fn load_goal(&self) -> Result<Option<GoalConfig>, PersistenceError> {
        match self.get(GOAL_KEY) {
            Some(json) => serde_json::from_str(&json).map(Some).map_err(|source| {
                PersistenceError::CorruptRecord {
                    key: GOAL_KEY.to_string(),
                    source,
                }
            }),
            None => Ok(None),
        }
    }

    fn load_entries(&self) -> Result<Vec<LogEntry>, PersistenceError> {
        match self.get(ENTRIES_KEY) {
            Some(json) => serde_json::from_str(&json).map_err(|source| {
                PersistenceError::CorruptRecord {
                    key: ENTRIES_KEY.to_string(),
                    source,
                }
            }),
            None => Ok(Vec::new()),
        }
    }
}
