//! Default-library rename heuristic for TabVault.
//!
//! Libraries auto-created by the extension all start life as "Default
//! Library". Once sessions carrying browser attribution exist, a more useful
//! name can be inferred: the dominant source browser plus the OS user, e.g.
//! "Default (Chrome — alice)".
//!
//! The pass runs once per daemon start (after migrations) and is also fired
//! inline when a session with a known browser lands in a still-generic
//! library. Failures are logged and swallowed — this is a cosmetic pass and
//! must never abort startup.

use rusqlite::{params, Connection};

use crate::managers::library_manager::{LibraryManager, LibraryManagerTrait};
use crate::types::errors::{storage, StoreError};

/// The generic placeholder name given to auto-created libraries.
pub const DEFAULT_LIBRARY_NAME: &str = "Default Library";

/// Resolves a username for library naming.
/// Chain: `USERNAME` (Windows) → `USER` (Unix/macOS) → `HOSTNAME` → "User".
pub fn os_username() -> String {
    for var in ["USERNAME", "USER", "HOSTNAME"] {
        if let Ok(v) = std::env::var(var) {
            if !v.is_empty() {
                return v;
            }
        }
    }
    String::from("User")
}

/// Composes the replacement name for a generic default library.
/// With a dominant browser: "Default (Chrome — alice)"; without: "Default (alice)".
pub fn default_library_name(browser: Option<&str>, username: &str) -> String {
    match browser {
        Some(b) if !b.is_empty() => format!("Default ({} \u{2014} {})", b, username),
        _ => format!("Default ({})", username),
    }
}

/// Trait defining the rename pass.
pub trait LibraryNamerTrait {
    /// Renames every library still bearing the generic placeholder name.
    /// Returns the number of libraries renamed.
    fn rename_default_libraries(&self, username: &str) -> Result<usize, StoreError>;
}

/// Rename pass backed by a SQLite connection.
pub struct LibraryNamer<'a> {
    conn: &'a Connection,
}

impl<'a> LibraryNamer<'a> {
    /// Creates a new `LibraryNamer` using the provided database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Picks the most frequent non-empty source browser among a library's
    /// sessions. A tie resolves to whichever row the grouping returns first;
    /// that order is not guaranteed.
    fn dominant_browser(&self, library_id: &str) -> Result<Option<String>, StoreError> {
        let result = self.conn.query_row(
            "SELECT source_browser FROM sessions \
             WHERE library_id = ?1 AND source_browser != '' \
             GROUP BY source_browser ORDER BY COUNT(*) DESC LIMIT 1",
            params![library_id],
            |row| row.get(0),
        );
        match result {
            Ok(browser) => Ok(Some(browser)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(storage(e)),
        }
    }
}

impl<'a> LibraryNamerTrait for LibraryNamer<'a> {
    fn rename_default_libraries(&self, username: &str) -> Result<usize, StoreError> {
        let ids: Vec<String> = {
            let mut stmt = self
                .conn
                .prepare("SELECT id FROM libraries WHERE name = ?1")
                .map_err(storage)?;
            let rows = stmt
                .query_map(params![DEFAULT_LIBRARY_NAME], |row| row.get(0))
                .map_err(storage)?;
            let mut ids = Vec::new();
            for row in rows {
                ids.push(row.map_err(storage)?);
            }
            ids
        };

        let mut manager = LibraryManager::new(self.conn);
        for id in &ids {
            let browser = self.dominant_browser(id)?;
            let new_name = default_library_name(browser.as_deref(), username);
            manager.rename_library(id, &new_name)?;
        }
        Ok(ids.len())
    }
}
