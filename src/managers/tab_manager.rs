//! Tab Manager for TabVault.
//!
//! Implements `TabManagerTrait` — saving, listing, patching, and deleting
//! individual saved tabs, backed by SQLite via `rusqlite`.

use rusqlite::{params, Connection};

use crate::types::errors::{storage, StoreError};
use crate::types::tab::{Tab, TabPatch};

/// Trait defining saved-tab management operations.
pub trait TabManagerTrait {
    /// Inserts a saved tab. A duplicate ID is a silent no-op (retry safety).
    fn create_tab(&mut self, tab: &Tab) -> Result<(), StoreError>;
    /// Lists a library's saved tabs, newest-first by save time.
    fn list_tabs(&self, library_id: &str) -> Result<Vec<Tab>, StoreError>;
    /// Lists saved tabs across all libraries (master view), newest-first,
    /// with session name, library name, and source browser joined in.
    fn list_all_tabs(&self) -> Result<Vec<Tab>, StoreError>;
    /// Applies a partial patch; notes is the only patchable field.
    fn update_tab(&mut self, id: &str, patch: &TabPatch) -> Result<(), StoreError>;
    /// Removes a single saved tab (no cascade).
    fn delete_tab(&mut self, id: &str) -> Result<(), StoreError>;
}

/// Tab manager backed by a SQLite connection.
pub struct TabManager<'a> {
    conn: &'a Connection,
}

impl<'a> TabManager<'a> {
    /// Creates a new `TabManager` using the provided database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Reads a per-library `Tab` row into a struct (no joined columns).
    fn row_to_tab(row: &rusqlite::Row) -> rusqlite::Result<Tab> {
        Ok(Tab {
            id: row.get(0)?,
            library_id: row.get(1)?,
            session_id: row.get(2)?,
            url: row.get(3)?,
            title: row.get(4)?,
            fav_icon_url: row.get(5)?,
            saved_at: row.get(6)?,
            notes: row.get(7)?,
            colour: row.get(8)?,
            session_name: None,
            library_name: None,
            source_browser: None,
        })
    }
}

impl<'a> TabManagerTrait for TabManager<'a> {
    fn create_tab(&mut self, tab: &Tab) -> Result<(), StoreError> {
        self.conn
            .execute(
                "INSERT OR IGNORE INTO saved_tabs \
                   (id, library_id, session_id, url, title, fav_icon_url, saved_at, notes, colour) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    tab.id,
                    tab.library_id,
                    tab.session_id,
                    tab.url,
                    tab.title,
                    tab.fav_icon_url,
                    tab.saved_at,
                    tab.notes,
                    tab.colour,
                ],
            )
            .map_err(storage)?;
        Ok(())
    }

    fn list_tabs(&self, library_id: &str) -> Result<Vec<Tab>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, library_id, session_id, url, title, fav_icon_url, saved_at, notes, colour \
                 FROM saved_tabs WHERE library_id = ?1 ORDER BY saved_at DESC",
            )
            .map_err(storage)?;

        let rows = stmt
            .query_map(params![library_id], Self::row_to_tab)
            .map_err(storage)?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(storage)?);
        }
        Ok(results)
    }

    fn list_all_tabs(&self) -> Result<Vec<Tab>, StoreError> {
        // LEFT JOINs keep orphaned tabs (NULL session_id) in the view.
        let mut stmt = self
            .conn
            .prepare(
                "SELECT st.id, st.library_id, st.session_id, st.url, st.title, \
                        st.fav_icon_url, st.saved_at, st.notes, st.colour, \
                        s.name AS session_name, l.name AS library_name, s.source_browser \
                 FROM saved_tabs st \
                 LEFT JOIN sessions  s ON s.id = st.session_id \
                 LEFT JOIN libraries l ON l.id = st.library_id \
                 ORDER BY st.saved_at DESC",
            )
            .map_err(storage)?;

        let rows = stmt
            .query_map([], |row| {
                let mut tab = Self::row_to_tab(row)?;
                tab.session_name = row.get(9)?;
                tab.library_name = row.get(10)?;
                tab.source_browser = row.get(11)?;
                Ok(tab)
            })
            .map_err(storage)?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(storage)?);
        }
        Ok(results)
    }

    fn update_tab(&mut self, id: &str, patch: &TabPatch) -> Result<(), StoreError> {
        let notes = match &patch.notes {
            Some(n) => n,
            None => return Ok(()), // nothing to update
        };
        self.conn
            .execute(
                "UPDATE saved_tabs SET notes = ?1 WHERE id = ?2",
                params![notes, id],
            )
            .map_err(storage)?;
        Ok(())
    }

    fn delete_tab(&mut self, id: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM saved_tabs WHERE id = ?1", params![id])
            .map_err(storage)?;
        Ok(())
    }
}
