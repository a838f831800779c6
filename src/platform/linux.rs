// TabVault platform paths for Linux
// Data: ~/.local/share/tabvault

use std::env;
use std::path::PathBuf;

/// Returns the data directory for TabVault on Linux.
/// Uses `$XDG_DATA_HOME/tabvault` if set, otherwise `~/.local/share/tabvault`.
pub fn get_data_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg).join("tabvault")
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("tabvault")
    }
}
