//! App context for the TabVault daemon.
//!
//! One explicit struct holding the shared database handle and the auth token,
//! constructed once at startup and passed by reference into the HTTP layer.
//! There is no ambient global state.

use std::path::Path;
use std::sync::Mutex;

use log::{info, warn};

use crate::database::Database;
use crate::services::library_namer::{os_username, LibraryNamer, LibraryNamerTrait};
use crate::types::errors::StoreError;

/// Shared daemon context: the single SQLite connection (behind a mutex — one
/// logical writer) and the shared-secret token.
pub struct App {
    pub db: Mutex<Database>,
    pub token: String,
}

impl App {
    /// Opens the database (running migrations), performs the startup
    /// default-library rename pass, and assembles the context.
    ///
    /// # Errors
    /// Returns `StoreError::Storage` if the database cannot be opened or a
    /// migration fails — fatal, the daemon must not serve requests. The
    /// rename pass is best-effort: its failures are logged and swallowed.
    pub fn new<P: AsRef<Path>>(db_path: P, token: String) -> Result<Self, StoreError> {
        let db = Database::open(db_path).map_err(|e| StoreError::Storage(e.to_string()))?;

        // Retroactive rename of generic "Default Library" rows. Cosmetic, so
        // never fatal.
        {
            let namer = LibraryNamer::new(db.connection());
            match namer.rename_default_libraries(&os_username()) {
                Ok(0) => {}
                Ok(n) => info!("renamed {} default-named libraries", n),
                Err(e) => warn!("default-library rename pass failed: {}", e),
            }
        }

        Ok(Self {
            db: Mutex::new(db),
            token,
        })
    }

    /// In-memory context for tests: fresh database, fixed token, no rename pass.
    pub fn new_in_memory(token: &str) -> Result<Self, StoreError> {
        let db = Database::open_in_memory().map_err(|e| StoreError::Storage(e.to_string()))?;
        Ok(Self {
            db: Mutex::new(db),
            token: token.to_string(),
        })
    }
}
