//! Schema migrations for the TabVault SQLite database.
//!
//! Uses a `schema_migrations` table to track which versioned batches have been
//! applied. Each batch runs exactly once, inside one transaction together with
//! its tracking row, so a crash mid-migration never leaves a half-applied
//! batch marked as applied. Safe to call on every startup.

use rusqlite::{params, Connection};

/// Current schema version. Bump this when adding a new migration.
pub const CURRENT_SCHEMA_VERSION: i64 = 2;

/// One versioned batch of schema statements.
struct Migration {
    version: i64,
    description: &'static str,
    sql: &'static str,
}

/// All migrations, in strictly ascending version order. There are no
/// down-migrations.
const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        description: "Initial schema: libraries, sessions, saved_tabs, bookmarks, history_entries, downloads",
        sql: MIGRATION_V1,
    },
    Migration {
        version: 2,
        description: "Add source_browser and archived to sessions",
        sql: MIGRATION_V2,
    },
];

const MIGRATION_V1: &str = "
    CREATE TABLE IF NOT EXISTS libraries (
        id            TEXT PRIMARY KEY,
        name          TEXT NOT NULL,
        description   TEXT,
        created_at    INTEGER NOT NULL,
        updated_at    INTEGER NOT NULL,
        is_encrypted  INTEGER NOT NULL DEFAULT 0,
        password_salt TEXT
    );

    CREATE TABLE IF NOT EXISTS sessions (
        id         TEXT PRIMARY KEY,
        library_id TEXT NOT NULL,
        name       TEXT NOT NULL,
        notes      TEXT NOT NULL DEFAULT '',
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL
    );

    CREATE TABLE IF NOT EXISTS saved_tabs (
        id           TEXT PRIMARY KEY,
        library_id   TEXT NOT NULL,
        session_id   TEXT,
        url          TEXT NOT NULL,
        title        TEXT NOT NULL DEFAULT '',
        fav_icon_url TEXT,
        saved_at     INTEGER NOT NULL,
        notes        TEXT NOT NULL DEFAULT '',
        colour       TEXT
    );

    CREATE TABLE IF NOT EXISTS bookmarks (
        id         TEXT PRIMARY KEY,
        library_id TEXT NOT NULL,
        parent_id  TEXT,
        title      TEXT NOT NULL DEFAULT '',
        url        TEXT,
        notes      TEXT NOT NULL DEFAULT '',
        colour     TEXT,
        created_at INTEGER NOT NULL,
        is_folder  INTEGER NOT NULL DEFAULT 0
    );

    CREATE TABLE IF NOT EXISTS history_entries (
        id           TEXT PRIMARY KEY,
        library_id   TEXT NOT NULL,
        url          TEXT NOT NULL,
        title        TEXT NOT NULL DEFAULT '',
        visit_time   INTEGER NOT NULL,
        domain       TEXT NOT NULL DEFAULT '',
        is_important INTEGER NOT NULL DEFAULT 0
    );

    CREATE TABLE IF NOT EXISTS downloads (
        id            TEXT PRIMARY KEY,
        library_id    TEXT NOT NULL,
        filename      TEXT NOT NULL DEFAULT '',
        url           TEXT NOT NULL,
        mime_type     TEXT,
        file_size     INTEGER,
        downloaded_at INTEGER NOT NULL,
        state         TEXT NOT NULL DEFAULT 'complete',
        notes         TEXT NOT NULL DEFAULT ''
    );

    CREATE INDEX IF NOT EXISTS idx_sessions_library ON sessions(library_id);
    CREATE INDEX IF NOT EXISTS idx_saved_tabs_library ON saved_tabs(library_id);
    CREATE INDEX IF NOT EXISTS idx_saved_tabs_session ON saved_tabs(session_id);
    CREATE INDEX IF NOT EXISTS idx_bookmarks_library ON bookmarks(library_id);
    CREATE INDEX IF NOT EXISTS idx_history_library ON history_entries(library_id);
    CREATE INDEX IF NOT EXISTS idx_history_visit_time ON history_entries(visit_time);
    CREATE INDEX IF NOT EXISTS idx_downloads_library ON downloads(library_id);
";

const MIGRATION_V2: &str = "
    ALTER TABLE sessions ADD COLUMN source_browser TEXT NOT NULL DEFAULT '';
    ALTER TABLE sessions ADD COLUMN archived INTEGER NOT NULL DEFAULT 0;
";

/// Returns the highest applied schema version (0 if the tracking table doesn't exist).
pub fn get_schema_version(conn: &Connection) -> i64 {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )
    .unwrap_or(0)
}

/// Runs all pending schema migrations against the provided connection.
///
/// Each not-yet-applied batch runs inside one transaction; the tracking row is
/// inserted in the same transaction, so either the whole batch applies and is
/// recorded, or neither happens. Idempotent no-op when the schema is current.
///
/// # Errors
/// Returns `rusqlite::Error` if any statement fails; the failing batch is
/// rolled back and no later batch is attempted.
pub fn run_all(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    // WAL and foreign keys apply on every open, not versioned
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA foreign_keys = ON;
         CREATE TABLE IF NOT EXISTS schema_migrations (
             version     INTEGER PRIMARY KEY,
             applied_at  INTEGER NOT NULL,
             description TEXT NOT NULL
         );",
    )?;

    for m in MIGRATIONS {
        let applied: i64 = conn.query_row(
            "SELECT COUNT(*) FROM schema_migrations WHERE version = ?1",
            [m.version],
            |row| row.get(0),
        )?;
        if applied > 0 {
            continue;
        }

        let tx = conn.transaction()?;
        tx.execute_batch(m.sql)?;
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64;
        tx.execute(
            "INSERT INTO schema_migrations (version, applied_at, description) VALUES (?1, ?2, ?3)",
            params![m.version, now, m.description],
        )?;
        tx.commit()?;
    }

    Ok(())
}
