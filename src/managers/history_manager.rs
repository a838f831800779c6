//! History Manager for TabVault.
//!
//! Implements `HistoryManagerTrait` — idempotent ingestion, listing, and
//! deletion of browsing-history entries, backed by SQLite via `rusqlite`.

use rusqlite::{params, Connection};

use crate::types::errors::{storage, StoreError};
use crate::types::history::HistoryEntry;

/// Cap on rows per history listing.
const HISTORY_LIST_LIMIT: i64 = 500;

/// Trait defining history management operations.
pub trait HistoryManagerTrait {
    /// Inserts a history entry; an existing row with the same ID is left
    /// untouched (upsert-by-id, so the extension can replay captures).
    fn upsert_entry(&mut self, entry: &HistoryEntry) -> Result<(), StoreError>;
    /// Lists a library's history, newest-first by visit time, capped at 500.
    fn list_history(&self, library_id: &str) -> Result<Vec<HistoryEntry>, StoreError>;
    /// Removes a single history entry (no cascade).
    fn delete_entry(&mut self, id: &str) -> Result<(), StoreError>;
}

/// History manager backed by a SQLite connection.
pub struct HistoryManager<'a> {
    conn: &'a Connection,
}

impl<'a> HistoryManager<'a> {
    /// Creates a new `HistoryManager` using the provided database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Reads a single `HistoryEntry` row into a struct.
    fn row_to_entry(row: &rusqlite::Row) -> rusqlite::Result<HistoryEntry> {
        Ok(HistoryEntry {
            id: row.get(0)?,
            library_id: row.get(1)?,
            url: row.get(2)?,
            title: row.get(3)?,
            visit_time: row.get(4)?,
            domain: row.get(5)?,
            is_important: row.get::<_, i64>(6)? != 0,
        })
    }
}

impl<'a> HistoryManagerTrait for HistoryManager<'a> {
    fn upsert_entry(&mut self, entry: &HistoryEntry) -> Result<(), StoreError> {
        self.conn
            .execute(
                "INSERT OR IGNORE INTO history_entries \
                   (id, library_id, url, title, visit_time, domain, is_important) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    entry.id,
                    entry.library_id,
                    entry.url,
                    entry.title,
                    entry.visit_time,
                    entry.domain,
                    entry.is_important as i64,
                ],
            )
            .map_err(storage)?;
        Ok(())
    }

    fn list_history(&self, library_id: &str) -> Result<Vec<HistoryEntry>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, library_id, url, IFNULL(title, ''), visit_time, domain, is_important \
                 FROM history_entries WHERE library_id = ?1 \
                 ORDER BY visit_time DESC LIMIT ?2",
            )
            .map_err(storage)?;

        let rows = stmt
            .query_map(params![library_id, HISTORY_LIST_LIMIT], Self::row_to_entry)
            .map_err(storage)?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(storage)?);
        }
        Ok(results)
    }

    fn delete_entry(&mut self, id: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM history_entries WHERE id = ?1", params![id])
            .map_err(storage)?;
        Ok(())
    }
}
