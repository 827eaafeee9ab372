//! SQLite-backed persistence.
//!
//! A single kv table holds two JSON records: the goal configuration and
//! the log-entry collection. The intake store treats this as an opaque
//! durable key-value collaborator; any store that round-trips the records
//! exactly would do.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};

use super::{data_dir, Persistence, ENTRIES_KEY, GOAL_KEY};
use crate::error::PersistenceError;
use crate::intake::{GoalConfig, LogEntry};

/// SQLite database at `~/.config/hydrate/hydrate.db`.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the default database, creating file and schema on first use.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, PersistenceError> {
        let path = data_dir()?.join("hydrate.db");
        Self::open_at(&path)
    }

    /// Open a database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, PersistenceError> {
        let conn = Connection::open(path).map_err(|source| PersistenceError::OpenFailed {
            path: PathBuf::from(path),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, PersistenceError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), PersistenceError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    pub fn kv_get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn load_record<T: serde::de::DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>, PersistenceError> {
        match self.kv_get(key)? {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|source| PersistenceError::CorruptRecord {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    fn save_record<T: serde::Serialize>(&self, key: &str, value: &T) -> Result<(), PersistenceError> {
        let json =
            serde_json::to_string(value).map_err(|source| PersistenceError::EncodeFailed {
                key: key.to_string(),
                source,
            })?;
        self.kv_set(key, &json)
    }
}

impl Persistence for Database {
    fn save_goal(&self, goal: &GoalConfig) -> Result<(), PersistenceError> {
        self.save_record(GOAL_KEY, goal)
    }

    fn save_entries(&self, entries: &[LogEntry]) -> Result<(), PersistenceError> {
        self.save_record(ENTRIES_KEY, &entries)
    }

    fn load_goal(&self) -> Result<Option<GoalConfig>, PersistenceError> {
        self.load_record(GOAL_KEY)
    }

    fn load_entries(&self) -> Result<Vec<LogEntry>, PersistenceError> {
        Ok(self.load_record(ENTRIES_KEY)?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_database_has_no_records() {
        let db = Database::open_memory().unwrap();
        assert!(db.load_goal().unwrap().is_none());
        assert!(db.load_entries().unwrap().is_empty());
    }

    #[test]
    fn goal_roundtrip() {
        let db = Database::open_memory().unwrap();
        let goal = GoalConfig {
            daily_goal: 96.0,
            onboarded: true,
        };
        db.save_goal(&goal).unwrap();
        assert_eq!(db.load_goal().unwrap(), Some(goal));
    }

    #[test]
    fn entry_roundtrip_preserves_amount_and_timestamp() {
        let db = Database::open_memory().unwrap();
        let entry = LogEntry::new(12.5);
        db.save_entries(std::slice::from_ref(&entry)).unwrap();
        let loaded = db.load_entries().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, entry.id);
        assert_eq!(loaded[0].amount, 12.5);
        assert_eq!(loaded[0].timestamp, entry.timestamp);
    }

    #[test]
    fn save_overwrites_previous_collection() {
        let db = Database::open_memory().unwrap();
        db.save_entries(&[LogEntry::new(8.0), LogEntry::new(12.0)])
            .unwrap();
        db.save_entries(&[LogEntry::new(16.0)]).unwrap();
        let loaded = db.load_entries().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].amount, 16.0);
    }

    #[test]
    fn corrupt_record_is_reported() {
        let db = Database::open_memory().unwrap();
        db.kv_set(GOAL_KEY, "not json").unwrap();
        assert!(matches!(
            db.load_goal(),
            Err(PersistenceError::CorruptRecord { .. })
        ));
    }

    #[test]
    fn file_backed_database_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hydrate.db");
        {
            let db = Database::open_at(&path).unwrap();
            db.save_goal(&GoalConfig {
                daily_goal: 72.0,
                onboarded: false,
            })
            .unwrap();
        }
        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.load_goal().unwrap().unwrap().daily_goal, 72.0);
    }
}
