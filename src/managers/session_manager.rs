//! Session Manager for TabVault.
//!
//! Implements `SessionManagerTrait` — creating, listing, patching, and
//! deleting saved-tab sessions, backed by SQLite via `rusqlite`.
//!
//! `tab_count` is computed per read with a correlated subquery so it can never
//! drift from the actual `saved_tabs` rows.

use rusqlite::{params, Connection};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::errors::{storage, StoreError};
use crate::types::session::{Session, SessionPatch};

/// Trait defining session management operations.
pub trait SessionManagerTrait {
    /// Inserts a session. A duplicate ID is a silent no-op (retry safety).
    fn create_session(&mut self, session: &Session) -> Result<(), StoreError>;
    /// Lists a library's sessions newest-first. `include_archived=false` omits
    /// archived rows (the default view).
    fn list_sessions(
        &self,
        library_id: &str,
        include_archived: bool,
    ) -> Result<Vec<Session>, StoreError>;
    /// Lists sessions across all libraries (master view), newest-first.
    fn list_all_sessions(&self, include_archived: bool) -> Result<Vec<Session>, StoreError>;
    /// Number of sessions in a library.
    fn count_sessions(&self, library_id: &str) -> Result<i64, StoreError>;
    /// Applies a partial patch. Absent fields are untouched; an empty patch
    /// runs no statement at all.
    fn update_session(&mut self, id: &str, patch: &SessionPatch) -> Result<(), StoreError>;
    /// Removes the session row; its tabs remain with `session_id` cleared.
    fn delete_session(&mut self, id: &str) -> Result<(), StoreError>;
    /// Removes the session and all its tabs in one transaction, tabs first.
    fn delete_session_with_tabs(&mut self, id: &str) -> Result<(), StoreError>;
}

// Shared SELECT column list. tab_count comes from a correlated subquery —
// always accurate, never persisted.
const SESSION_COLS: &str = "s.id, s.library_id, s.name, s.notes, s.created_at, s.updated_at, \
     s.source_browser, s.archived, \
     (SELECT COUNT(*) FROM saved_tabs t WHERE t.session_id = s.id) AS tab_count";

/// Session manager backed by a SQLite connection.
pub struct SessionManager<'a> {
    conn: &'a Connection,
}

impl<'a> SessionManager<'a> {
    /// Creates a new `SessionManager` using the provided database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Returns the current UNIX timestamp in milliseconds.
    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64
    }

    /// Reads a single `Session` row into a struct.
    fn row_to_session(row: &rusqlite::Row) -> rusqlite::Result<Session> {
        Ok(Session {
            id: row.get(0)?,
            library_id: row.get(1)?,
            name: row.get(2)?,
            notes: row.get(3)?,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
            source_browser: row.get(6)?,
            archived: row.get::<_, i64>(7)? != 0,
            tab_count: row.get(8)?,
        })
    }

    fn collect_sessions(
        &self,
        sql: &str,
        params: &[&dyn rusqlite::ToSql],
    ) -> Result<Vec<Session>, StoreError> {
        let mut stmt = self.conn.prepare(sql).map_err(storage)?;
        let rows = stmt
            .query_map(params, Self::row_to_session)
            .map_err(storage)?;
        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(storage)?);
        }
        Ok(results)
    }
}

impl<'a> SessionManagerTrait for SessionManager<'a> {
    fn create_session(&mut self, session: &Session) -> Result<(), StoreError> {
        self.conn
            .execute(
                "INSERT OR IGNORE INTO sessions \
                   (id, library_id, name, notes, created_at, updated_at, source_browser, archived) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    session.id,
                    session.library_id,
                    session.name,
                    session.notes,
                    session.created_at,
                    session.updated_at,
                    session.source_browser,
                    session.archived as i64,
                ],
            )
            .map_err(storage)?;
        Ok(())
    }

    fn list_sessions(
        &self,
        library_id: &str,
        include_archived: bool,
    ) -> Result<Vec<Session>, StoreError> {
        let mut sql = format!("SELECT {} FROM sessions s WHERE s.library_id = ?1", SESSION_COLS);
        if !include_archived {
            sql.push_str(" AND s.archived = 0");
        }
        sql.push_str(" ORDER BY s.created_at DESC");
        self.collect_sessions(&sql, &[&library_id])
    }

    fn list_all_sessions(&self, include_archived: bool) -> Result<Vec<Session>, StoreError> {
        let mut sql = format!("SELECT {} FROM sessions s", SESSION_COLS);
        if !include_archived {
            sql.push_str(" WHERE s.archived = 0");
        }
        sql.push_str(" ORDER BY s.created_at DESC");
        self.collect_sessions(&sql, &[])
    }

    fn count_sessions(&self, library_id: &str) -> Result<i64, StoreError> {
        self.conn
            .query_row(
                "SELECT COUNT(*) FROM sessions WHERE library_id = ?1",
                params![library_id],
                |row| row.get(0),
            )
            .map_err(storage)
    }

    fn update_session(&mut self, id: &str, patch: &SessionPatch) -> Result<(), StoreError> {
        let now = Self::now();
        // One statement per present-field combination; both-absent is a true
        // no-op and must not touch updated_at.
        match (&patch.name, &patch.archived) {
            (Some(name), Some(archived)) => self
                .conn
                .execute(
                    "UPDATE sessions SET name = ?1, archived = ?2, updated_at = ?3 WHERE id = ?4",
                    params![name, *archived as i64, now, id],
                )
                .map_err(storage)?,
            (Some(name), None) => self
                .conn
                .execute(
                    "UPDATE sessions SET name = ?1, updated_at = ?2 WHERE id = ?3",
                    params![name, now, id],
                )
                .map_err(storage)?,
            (None, Some(archived)) => self
                .conn
                .execute(
                    "UPDATE sessions SET archived = ?1, updated_at = ?2 WHERE id = ?3",
                    params![*archived as i64, now, id],
                )
                .map_err(storage)?,
            (None, None) => return Ok(()),
        };
        Ok(())
    }

    fn delete_session(&mut self, id: &str) -> Result<(), StoreError> {
        // Orphan the tabs before removing the session so both changes commit
        // or roll back together.
        let tx = self.conn.unchecked_transaction().map_err(storage)?;
        tx.execute(
            "UPDATE saved_tabs SET session_id = NULL WHERE session_id = ?1",
            params![id],
        )
        .map_err(storage)?;
        tx.execute("DELETE FROM sessions WHERE id = ?1", params![id])
            .map_err(storage)?;
        tx.commit().map_err(storage)?;
        Ok(())
    }

    fn delete_session_with_tabs(&mut self, id: &str) -> Result<(), StoreError> {
        // Tabs first to satisfy referential ordering.
        let tx = self.conn.unchecked_transaction().map_err(storage)?;
        tx.execute("DELETE FROM saved_tabs WHERE session_id = ?1", params![id])
            .map_err(storage)?;
        tx.execute("DELETE FROM sessions WHERE id = ?1", params![id])
            .map_err(storage)?;
        tx.commit().map_err(storage)?;
        Ok(())
    }
}
