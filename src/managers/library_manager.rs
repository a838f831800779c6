//! Library Manager for TabVault.
//!
//! Implements `LibraryManagerTrait` — CRUD for the top-level library records
//! that own every other entity, backed by SQLite via `rusqlite`.

use rusqlite::{params, Connection};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::errors::{storage, StoreError};
use crate::types::library::Library;

/// Trait defining library management operations.
pub trait LibraryManagerTrait {
    /// Inserts a new library. Unlike the other entities, a duplicate ID is a
    /// storage error here, not a silent no-op.
    fn create_library(&mut self, library: &Library) -> Result<(), StoreError>;
    /// Lists all libraries, oldest-first by creation time.
    fn list_libraries(&self) -> Result<Vec<Library>, StoreError>;
    /// Fetches one library by ID; `NotFound` when no row matches.
    fn get_library(&self, id: &str) -> Result<Library, StoreError>;
    /// Renames a library and refreshes its `updated_at`.
    fn rename_library(&mut self, id: &str, name: &str) -> Result<(), StoreError>;
    /// Removes a library and every child row scoped to it, in one transaction.
    fn delete_library(&mut self, id: &str) -> Result<(), StoreError>;
}

/// Library manager backed by a SQLite connection.
pub struct LibraryManager<'a> {
    conn: &'a Connection,
}

impl<'a> LibraryManager<'a> {
    /// Creates a new `LibraryManager` using the provided database connection.
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

    /// Reads a single `Library` row into a struct.
    fn row_to_library(row: &rusqlite::Row) -> rusqlite::Result<Library> {
        Ok(Library {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            created_at: row.get(3)?,
            updated_at: row.get(4)?,
            is_encrypted: row.get::<_, i64>(5)? != 0,
            password_salt: row.get(6)?,
        })
    }
}

impl<'a> LibraryManagerTrait for LibraryManager<'a> {
    fn create_library(&mut self, library: &Library) -> Result<(), StoreError> {
        self.conn
            .execute(
                "INSERT INTO libraries (id, name, description, created_at, updated_at, is_encrypted, password_salt) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    library.id,
                    library.name,
                    library.description,
                    library.created_at,
                    library.updated_at,
                    library.is_encrypted as i64,
                    library.password_salt,
                ],
            )
            .map_err(storage)?;
        Ok(())
    }

    fn list_libraries(&self) -> Result<Vec<Library>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, name, description, created_at, updated_at, is_encrypted, password_salt \
                 FROM libraries ORDER BY created_at",
            )
            .map_err(storage)?;

        let rows = stmt.query_map([], Self::row_to_library).map_err(storage)?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(storage)?);
        }
        Ok(results)
    }

    fn get_library(&self, id: &str) -> Result<Library, StoreError> {
        let result = self.conn.query_row(
            "SELECT id, name, description, created_at, updated_at, is_encrypted, password_salt \
             FROM libraries WHERE id = ?1",
            params![id],
            Self::row_to_library,
        );

        match result {
            Ok(lib) => Ok(lib),
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                Err(StoreError::NotFound(format!("library {}", id)))
            }
            Err(e) => Err(storage(e)),
        }
    }

    fn rename_library(&mut self, id: &str, name: &str) -> Result<(), StoreError> {
        self.conn
            .execute(
                "UPDATE libraries SET name = ?1, updated_at = ?2 WHERE id = ?3",
                params![name, Self::now(), id],
            )
            .map_err(storage)?;
        Ok(())
    }

    /// Explicit transactional cascade: child tables first, the library row
    /// last. A failure anywhere rolls the whole deletion back.
    fn delete_library(&mut self, id: &str) -> Result<(), StoreError> {
        let tx = self.conn.unchecked_transaction().map_err(storage)?;
        tx.execute("DELETE FROM saved_tabs WHERE library_id = ?1", params![id])
            .map_err(storage)?;
        tx.execute("DELETE FROM bookmarks WHERE library_id = ?1", params![id])
            .map_err(storage)?;
        tx.execute(
            "DELETE FROM history_entries WHERE library_id = ?1",
            params![id],
        )
        .map_err(storage)?;
        tx.execute("DELETE FROM downloads WHERE library_id = ?1", params![id])
            .map_err(storage)?;
        tx.execute("DELETE FROM sessions WHERE library_id = ?1", params![id])
            .map_err(storage)?;
        tx.execute("DELETE FROM libraries WHERE id = ?1", params![id])
            .map_err(storage)?;
        tx.commit().map_err(storage)?;
        Ok(())
    }
}
