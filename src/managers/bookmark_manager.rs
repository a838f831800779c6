//! Bookmark Manager for TabVault.
//!
//! Implements `BookmarkManagerTrait` — CRUD for bookmarks and bookmark
//! folders, backed by SQLite via `rusqlite`. Bookmarks form a forest via
//! `parent_id`; deleting a node removes its whole subtree.

use rusqlite::{params, Connection};

use crate::types::bookmark::Bookmark;
use crate::types::errors::{storage, StoreError};

/// Trait defining bookmark management operations.
pub trait BookmarkManagerTrait {
    /// Inserts a bookmark or folder. A duplicate ID is a silent no-op.
    fn create_bookmark(&mut self, bookmark: &Bookmark) -> Result<(), StoreError>;
    /// Lists a library's bookmarks oldest-first; the caller rebuilds the tree
    /// from `parent_id`.
    fn list_bookmarks(&self, library_id: &str) -> Result<Vec<Bookmark>, StoreError>;
    /// Removes a bookmark and every descendant reachable via `parent_id`.
    fn delete_bookmark(&mut self, id: &str) -> Result<(), StoreError>;
}

/// Bookmark manager backed by a SQLite connection.
pub struct BookmarkManager<'a> {
    conn: &'a Connection,
}

impl<'a> BookmarkManager<'a> {
    /// Creates a new `BookmarkManager` using the provided database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Reads a single `Bookmark` row into a struct.
    fn row_to_bookmark(row: &rusqlite::Row) -> rusqlite::Result<Bookmark> {
        Ok(Bookmark {
            id: row.get(0)?,
            library_id: row.get(1)?,
            parent_id: row.get(2)?,
            title: row.get(3)?,
            url: row.get(4)?,
            notes: row.get(5)?,
            colour: row.get(6)?,
            created_at: row.get(7)?,
            is_folder: row.get::<_, i64>(8)? != 0,
        })
    }
}

impl<'a> BookmarkManagerTrait for BookmarkManager<'a> {
    fn create_bookmark(&mut self, bookmark: &Bookmark) -> Result<(), StoreError> {
        self.conn
            .execute(
                "INSERT OR IGNORE INTO bookmarks \
                   (id, library_id, parent_id, title, url, notes, colour, created_at, is_folder) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    bookmark.id,
                    bookmark.library_id,
                    bookmark.parent_id,
                    bookmark.title,
                    bookmark.url,
                    bookmark.notes,
                    bookmark.colour,
                    bookmark.created_at,
                    bookmark.is_folder as i64,
                ],
            )
            .map_err(storage)?;
        Ok(())
    }

    fn list_bookmarks(&self, library_id: &str) -> Result<Vec<Bookmark>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, library_id, parent_id, title, url, notes, colour, created_at, is_folder \
                 FROM bookmarks WHERE library_id = ?1 ORDER BY created_at",
            )
            .map_err(storage)?;

        let rows = stmt
            .query_map(params![library_id], Self::row_to_bookmark)
            .map_err(storage)?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(storage)?);
        }
        Ok(results)
    }

    fn delete_bookmark(&mut self, id: &str) -> Result<(), StoreError> {
        // Recursive CTE collects the whole subtree rooted at id; one statement,
        // so the delete is atomic without an explicit transaction.
        self.conn
            .execute(
                "DELETE FROM bookmarks WHERE id IN ( \
                   WITH RECURSIVE subtree(id) AS ( \
                     SELECT id FROM bookmarks WHERE id = ?1 \
                     UNION ALL \
                     SELECT b.id FROM bookmarks b JOIN subtree s ON b.parent_id = s.id \
                   ) SELECT id FROM subtree)",
                params![id],
            )
            .map_err(storage)?;
        Ok(())
    }
}
