//! Download Manager for TabVault.
//!
//! Implements `DownloadManagerTrait` — recording, listing, and deleting
//! captured download records, backed by SQLite via `rusqlite`.

use rusqlite::{params, Connection};

use crate::types::download::Download;
use crate::types::errors::{storage, StoreError};

/// Trait defining download management operations.
pub trait DownloadManagerTrait {
    /// Inserts a download record. A duplicate ID is a silent no-op.
    fn create_download(&mut self, download: &Download) -> Result<(), StoreError>;
    /// Lists a library's downloads, newest-first.
    fn list_downloads(&self, library_id: &str) -> Result<Vec<Download>, StoreError>;
    /// Removes a single download record (no cascade).
    fn delete_download(&mut self, id: &str) -> Result<(), StoreError>;
}

/// Download manager backed by a SQLite connection.
pub struct DownloadManager<'a> {
    conn: &'a Connection,
}

impl<'a> DownloadManager<'a> {
    /// Creates a new `DownloadManager` using the provided database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Reads a single `Download` row into a struct.
    fn row_to_download(row: &rusqlite::Row) -> rusqlite::Result<Download> {
        Ok(Download {
            id: row.get(0)?,
            library_id: row.get(1)?,
            filename: row.get(2)?,
            url: row.get(3)?,
            mime_type: row.get(4)?,
            file_size: row.get(5)?,
            downloaded_at: row.get(6)?,
            state: row.get(7)?,
            notes: row.get(8)?,
        })
    }
}

impl<'a> DownloadManagerTrait for DownloadManager<'a> {
    fn create_download(&mut self, download: &Download) -> Result<(), StoreError> {
        self.conn
            .execute(
                "INSERT OR IGNORE INTO downloads \
                   (id, library_id, filename, url, mime_type, file_size, downloaded_at, state, notes) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    download.id,
                    download.library_id,
                    download.filename,
                    download.url,
                    download.mime_type,
                    download.file_size,
                    download.downloaded_at,
                    download.state,
                    download.notes,
                ],
            )
            .map_err(storage)?;
        Ok(())
    }

    fn list_downloads(&self, library_id: &str) -> Result<Vec<Download>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, library_id, filename, url, mime_type, file_size, downloaded_at, state, notes \
                 FROM downloads WHERE library_id = ?1 ORDER BY downloaded_at DESC",
            )
            .map_err(storage)?;

        let rows = stmt
            .query_map(params![library_id], Self::row_to_download)
            .map_err(storage)?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(storage)?);
        }
        Ok(results)
    }

    fn delete_download(&mut self, id: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM downloads WHERE id = ?1", params![id])
            .map_err(storage)?;
        Ok(())
    }
}
