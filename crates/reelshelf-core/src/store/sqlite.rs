use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

use crate::error::Result;

use super::migrations::MIGRATIONS;
use super::Slot;

/// Slot storage in a local SQLite database.
#[derive(Debug)]
pub struct SqliteSlot {
    conn: Connection,
}

impl SqliteSlot {
    /// Open (or create) the shelf database at `path`, bringing its schema
    /// up to date.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Opening slot database {}", path.display());
        Self::with_connection(Connection::open(path)?)
    }

    /// A throwaway database that lives as long as the slot.
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        let slot = Self { conn };
        slot.migrate()?;
        Ok(slot)
    }

    /// Highest schema migration applied to this database.
    pub fn schema_version(&self) -> Result<u32> {
        let version: Option<u32> = self.conn.query_row(
            "SELECT MAX(version) FROM schema_migrations",
            [],
            |row| row.get(0),
        )?;
        Ok(version.unwrap_or(0))
    }

    /// When the slot under `key` was last written, as RFC 3339.
    pub fn updated_at(&self, key: &str) -> Result<Option<String>> {
        let updated_at = self
            .conn
            .query_row(
                "SELECT updated_at FROM slots WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(updated_at)
    }

    fn migrate(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                applied_at TEXT NOT NULL DEFAULT (datetime('now'))
            )",
        )?;

        let current = self.schema_version()?;
        for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
            log::info!(
                "Migrating slot database to v{} ({})",
                migration.version,
                migration.name
            );
            self.conn.execute_batch(migration.sql)?;
            self.conn.execute(
                "INSERT INTO schema_migrations (version, name) VALUES (?1, ?2)",
                rusqlite::params![migration.version, migration.name],
            )?;
        }

        Ok(())
    }
}

impl Slot for SqliteSlot {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM slots WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO slots (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at",
            rusqlite::params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory_applies_migrations() {
        let store = SqliteSlot::open_in_memory().unwrap();
        assert_eq!(store.schema_version().unwrap(), 1);
    }

    #[test]
    fn test_missing_key_reads_none() {
        let store = SqliteSlot::open_in_memory().unwrap();
        assert_eq!(store.read("collection").unwrap(), None);
        assert_eq!(store.updated_at("collection").unwrap(), None);
    }

    #[test]
    fn test_write_then_overwrite() {
        let mut store = SqliteSlot::open_in_memory().unwrap();
        store.write("collection", "[]").unwrap();
        store.write("collection", "[{\"a\":1}]").unwrap();

        assert_eq!(
            store.read("collection").unwrap().as_deref(),
            Some("[{\"a\":1}]")
        );
        let rows: i64 = store
            .conn
            .query_row("SELECT COUNT(*) FROM slots", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
        assert!(store.updated_at("collection").unwrap().is_some());
    }

    #[test]
    fn test_reopen_keeps_values() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("shelf.db");

        {
            let mut store = SqliteSlot::open(&path).unwrap();
            store.write("collection", "[]").unwrap();
        }

        let store = SqliteSlot::open(&path).unwrap();
        assert_eq!(store.read("collection").unwrap().as_deref(), Some("[]"));
        assert_eq!(store.schema_version().unwrap(), 1);
    }
}
