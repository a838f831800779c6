//! Cross-entity search for TabVault.
//!
//! Fans a free-text query out as three independent case-insensitive LIKE
//! scans — saved tabs, non-folder bookmarks, history — and concatenates the
//! hits in that order. No relevance ranking, no deduplication across kinds;
//! each scan is capped to bound worst-case latency on large datasets.

use rusqlite::{params, Connection};

use crate::types::errors::{storage, StoreError};
use crate::types::search::SearchResult;

/// Per-scan row caps.
const TAB_LIMIT: i64 = 30;
const BOOKMARK_LIMIT: i64 = 20;
const HISTORY_LIMIT: i64 = 20;

/// Trait defining the cross-entity search operation.
pub trait SearchEngineTrait {
    /// Searches tabs, bookmarks, and history for a substring.
    /// `library_id = None` searches across all libraries.
    fn search(
        &self,
        library_id: Option<&str>,
        query: &str,
    ) -> Result<Vec<SearchResult>, StoreError>;
}

/// Search engine backed by a SQLite connection.
pub struct SearchEngine<'a> {
    conn: &'a Connection,
}

impl<'a> SearchEngine<'a> {
    /// Creates a new `SearchEngine` using the provided database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn scan(
        &self,
        sql: &str,
        scope: &str,
        pattern: &str,
        with_notes: bool,
        limit: i64,
        out: &mut Vec<SearchResult>,
    ) -> Result<(), StoreError> {
        let mut stmt = self.conn.prepare(sql).map_err(storage)?;
        let rows = stmt
            .query_map(params![scope, pattern, limit], |row| {
                Ok(SearchResult {
                    entity_type: row.get(0)?,
                    entity_id: row.get(1)?,
                    title: row.get(2)?,
                    url: row.get(3)?,
                    snippet: if with_notes { row.get(4)? } else { String::new() },
                })
            })
            .map_err(storage)?;
        for row in rows {
            out.push(row.map_err(storage)?);
        }
        Ok(())
    }
}

impl<'a> SearchEngineTrait for SearchEngine<'a> {
    fn search(
        &self,
        library_id: Option<&str>,
        query: &str,
    ) -> Result<Vec<SearchResult>, StoreError> {
        let scope = library_id.unwrap_or("");
        let pattern = format!("%{}%", query);
        let mut results = Vec::new();

        // Tabs: title, url, notes
        self.scan(
            "SELECT 'tab', id, IFNULL(title, ''), IFNULL(url, ''), notes \
             FROM saved_tabs \
             WHERE (?1 = '' OR library_id = ?1) \
               AND (title LIKE ?2 OR url LIKE ?2 OR notes LIKE ?2) \
             LIMIT ?3",
            scope,
            &pattern,
            true,
            TAB_LIMIT,
            &mut results,
        )?;

        // Bookmarks: title, url, notes; folder nodes are skipped
        self.scan(
            "SELECT 'bookmark', id, IFNULL(title, ''), IFNULL(url, ''), notes \
             FROM bookmarks \
             WHERE (?1 = '' OR library_id = ?1) \
               AND (title LIKE ?2 OR url LIKE ?2 OR notes LIKE ?2) \
               AND is_folder = 0 \
             LIMIT ?3",
            scope,
            &pattern,
            true,
            BOOKMARK_LIMIT,
            &mut results,
        )?;

        // History: title and url only, empty snippet
        self.scan(
            "SELECT 'history', id, IFNULL(title, ''), url \
             FROM history_entries \
             WHERE (?1 = '' OR library_id = ?1) \
               AND (title LIKE ?2 OR url LIKE ?2) \
             LIMIT ?3",
            scope,
            &pattern,
            false,
            HISTORY_LIMIT,
            &mut results,
        )?;

        Ok(results)
    }
}
