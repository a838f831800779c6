//! Shared-secret token management for the TabVault daemon.
//!
//! Every API request (outside a small allow-list) must carry the token in the
//! `X-TabVault-Token` header. The token is generated once, written to a small
//! file in the data directory, and reused across restarts so the extension
//! only has to bootstrap once via `GET /token`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ring::rand::{SecureRandom, SystemRandom};

use crate::platform;

/// Number of random bytes in a token (produces a 64-char hex string).
const TOKEN_BYTES: usize = 32;

/// Name of the auth header checked by the middleware.
pub const TOKEN_HEADER: &str = "X-TabVault-Token";

/// Returns the platform-appropriate path to the token file.
pub fn token_path() -> PathBuf {
    platform::token_path()
}

/// Reads the token from disk, or generates and saves a new one.
///
/// A stored token is accepted only if it has the expected length; anything
/// else (truncated file, manual edit) is replaced with a fresh token.
///
/// # Errors
/// Returns `io::Error` if the token cannot be generated or persisted.
pub fn load_or_create_token<P: AsRef<Path>>(path: P) -> io::Result<String> {
    let path = path.as_ref();

    if let Ok(data) = fs::read_to_string(path) {
        let token = data.trim().to_string();
        if token.len() == TOKEN_BYTES * 2 {
            return Ok(token);
        }
    }

    let token = generate_token()?;

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, format!("{}\n", token))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }
    Ok(token)
}

/// Creates a cryptographically random hex token.
fn generate_token() -> io::Result<String> {
    let rng = SystemRandom::new();
    let mut bytes = [0u8; TOKEN_BYTES];
    rng.fill(&mut bytes)
        .map_err(|_| io::Error::other("failed to generate random token"))?;
    Ok(bytes.iter().map(|b| format!("{:02x}", b)).collect())
}
