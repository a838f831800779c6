//! Unit tests for the TabVault database layer (connection + migrations).

use tabvault::database::Database;
use tabvault::database::migrations::{get_schema_version, CURRENT_SCHEMA_VERSION};

#[test]
fn test_open_in_memory_succeeds() {
    let db = Database::open_in_memory();
    assert!(db.is_ok(), "open_in_memory should succeed");
}

#[test]
fn test_migrations_create_all_tables() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let conn = db.connection();

    let expected_tables = [
        "libraries",
        "sessions",
        "saved_tabs",
        "bookmarks",
        "history_entries",
        "downloads",
        "schema_migrations",
    ];

    for table in &expected_tables {
        let exists: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name=?1",
                [table],
                |row| row.get(0),
            )
            .unwrap_or(false);
        assert!(exists, "Table '{}' should exist after migrations", table);
    }
}

#[test]
fn test_migrations_create_indexes() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let conn = db.connection();

    let expected_indexes = [
        "idx_sessions_library",
        "idx_saved_tabs_library",
        "idx_saved_tabs_session",
        "idx_bookmarks_library",
        "idx_history_library",
        "idx_history_visit_time",
        "idx_downloads_library",
    ];

    for index in &expected_indexes {
        let exists: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='index' AND name=?1",
                [index],
                |row| row.get(0),
            )
            .unwrap_or(false);
        assert!(exists, "Index '{}' should exist after migrations", index);
    }
}

#[test]
fn test_schema_version_is_current() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    assert_eq!(get_schema_version(db.connection()), CURRENT_SCHEMA_VERSION);
}

#[test]
fn test_migration_v2_adds_session_columns() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let conn = db.connection();

    for column in ["source_browser", "archived"] {
        let exists: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM pragma_table_info('sessions') WHERE name = ?1",
                [column],
                |row| row.get(0),
            )
            .unwrap_or(false);
        assert!(exists, "sessions.{} should exist after migration 002", column);
    }
}

/// Reopening the same file reruns the migration pass; the outcome must be
/// identical to a single run — same version, one tracking row per batch.
#[test]
fn test_migrations_are_idempotent_across_reopens() {
    let dir = tempfile::tempdir().expect("tempdir failed");
    let path = dir.path().join("db.sqlite");

    {
        let db = Database::open(&path).expect("first open failed");
        assert_eq!(get_schema_version(db.connection()), CURRENT_SCHEMA_VERSION);
    }

    let db = Database::open(&path).expect("second open failed");
    assert_eq!(get_schema_version(db.connection()), CURRENT_SCHEMA_VERSION);

    let rows: i64 = db
        .connection()
        .query_row("SELECT COUNT(*) FROM schema_migrations", [], |row| row.get(0))
        .expect("count failed");
    assert_eq!(rows, CURRENT_SCHEMA_VERSION, "one tracking row per migration");
}

#[test]
fn test_open_creates_parent_directory() {
    let dir = tempfile::tempdir().expect("tempdir failed");
    let path = dir.path().join("nested").join("deeper").join("db.sqlite");

    let db = Database::open(&path);
    assert!(db.is_ok(), "open should create missing parent directories");
    assert!(path.exists(), "database file should exist on disk");
}
