//! SQLite database connection management for the TabVault daemon.
//!
//! Provides the [`Database`] struct that wraps a `rusqlite::Connection`
//! and automatically runs schema migrations on open.

use rusqlite::Connection;
use std::path::Path;

use super::migrations;

/// Core database wrapper providing SQLite connection management.
///
/// The daemon deliberately holds exactly one connection: SQLite in WAL mode
/// supports a single writer, and serializing every operation through one
/// connection keeps the store free of in-process locking concerns.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (or creates) the SQLite database at the given file path and runs
    /// all pending migrations.
    ///
    /// The parent directory is created if it does not exist.
    ///
    /// # Errors
    /// Returns `rusqlite::Error` if the connection cannot be established or a
    /// migration fails. Migration failure must be treated as fatal by the
    /// caller: the store must not serve requests on an unmigrated schema.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, rusqlite::Error> {
        if let Some(dir) = path.as_ref().parent() {
            // I/O failure here surfaces as an open error on the next line
            let _ = std::fs::create_dir_all(dir);
        }
        let mut conn = Connection::open(path)?;
        migrations::run_all(&mut conn)?;
        Ok(Self { conn })
    }

    /// Opens an in-memory SQLite database and runs migrations.
    ///
    /// Useful for testing — the database is discarded when the `Database` is dropped.
    ///
    /// # Errors
    /// Returns `rusqlite::Error` if the connection cannot be established or migrations fail.
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        let mut conn = Connection::open_in_memory()?;
        migrations::run_all(&mut conn)?;
        Ok(Self { conn })
    }

    /// Returns a reference to the underlying `rusqlite::Connection`.
    ///
    /// This allows the managers and services to execute queries against the
    /// database.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
