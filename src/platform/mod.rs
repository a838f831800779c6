// TabVault platform abstraction
// Provides the platform-specific application-data path where the SQLite
// database and the bootstrap token file live.
//
// Uses `cfg(target_os)` for conditional compilation to select the correct
// platform-specific implementation at compile time.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Returns the platform-specific data directory for TabVault.
///
/// - **Linux**: `~/.local/share/tabvault` (or `$XDG_DATA_HOME/tabvault`)
/// - **macOS**: `~/Library/Application Support/TabVault`
/// - **Windows**: `%APPDATA%/TabVault`
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_data_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_data_dir()
    }
}

/// Default path of the SQLite database file.
pub fn default_db_path() -> PathBuf {
    get_data_dir().join("db.sqlite")
}

/// Path of the bootstrap auth token file.
pub fn token_path() -> PathBuf {
    get_data_dir().join("token")
}
