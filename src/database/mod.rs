//! TabVault database layer.
//!
//! Provides SQLite connection management and versioned schema migrations.
//!
//! # Usage
//!
//! ```no_run
//! use tabvault::database::Database;
//!
//! // Open the persistent database (runs migrations)
//! let db = Database::open("tabvault.db").expect("failed to open database");
//!
//! // Or use an in-memory database for testing
//! let db = Database::open_in_memory().expect("failed to open in-memory database");
//!
//! // Access the underlying connection for queries
//! let conn = db.connection();
//! ```

pub mod connection;
pub mod migrations;

pub use connection::Database;
