//! SQLite-backed key-value store.
//!
//! The default [`StateStore`] implementation. One table of JSON values; the
//! tracker never queries inside them.

use rusqlite::{params, Connection, OptionalExtension};

use super::{data_dir, StateStore};
use crate::error::StorageError;

/// Key-value database at `<data_dir>/momentum.db`.
pub struct KvDatabase {
    conn: Connection,
}

impl KvDatabase {
    /// Open the database, creating the file and schema if needed.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or the schema cannot be
    /// created.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()
            .map_err(|e| StorageError::QueryFailed(e.to_string()))?
            .join("momentum.db");
        Self::open_at(&path)
    }

    /// Open a database at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or the schema cannot be
    /// created.
    pub fn open_at(path: &std::path::Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        // Concurrent CLI invocations share the file; wait instead of
        // failing with SQLITE_BUSY.
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database. Used by tests and ephemeral sessions.
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }
}

impl StateStore for KvDatabase {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_none() {
        let db = KvDatabase::open_memory().unwrap();
        assert!(db.get_raw("tracker_actions").unwrap().is_none());
    }

    #[test]
    fn set_then_get_roundtrips() {
        let db = KvDatabase::open_memory().unwrap();
        db.set_raw("tracker_actions", "[]").unwrap();
        assert_eq!(db.get_raw("tracker_actions").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn set_replaces_previous_value() {
        let db = KvDatabase::open_memory().unwrap();
        db.set_raw("tracker_goals", "[1]").unwrap();
        db.set_raw("tracker_goals", "[1,2]").unwrap();
        assert_eq!(db.get_raw("tracker_goals").unwrap().as_deref(), Some("[1,2]"));
    }
}
