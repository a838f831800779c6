//! Unit tests for the cross-entity SearchEngine.
//!
//! Exercises the three LIKE fan-out scans, library scoping, folder
//! exclusion, result ordering, and the per-scan caps.

use tabvault::database::Database;
use tabvault::services::search_engine::{SearchEngine, SearchEngineTrait};

fn setup() -> Database {
    Database::open_in_memory().expect("Failed to open in-memory database")
}

fn insert_tab(conn: &rusqlite::Connection, id: &str, lib: &str, title: &str, notes: &str) {
    conn.execute(
        "INSERT INTO saved_tabs (id, library_id, url, title, saved_at, notes) \
         VALUES (?1, ?2, 'https://example.com', ?3, 1, ?4)",
        rusqlite::params![id, lib, title, notes],
    )
    .unwrap();
}

fn insert_bookmark(conn: &rusqlite::Connection, id: &str, lib: &str, title: &str, is_folder: bool) {
    conn.execute(
        "INSERT INTO bookmarks (id, library_id, title, created_at, is_folder) \
         VALUES (?1, ?2, ?3, 1, ?4)",
        rusqlite::params![id, lib, title, is_folder as i64],
    )
    .unwrap();
}

fn insert_history(conn: &rusqlite::Connection, id: &str, lib: &str, title: &str, url: &str) {
    conn.execute(
        "INSERT INTO history_entries (id, library_id, url, title, visit_time) \
         VALUES (?1, ?2, ?3, ?4, 1)",
        rusqlite::params![id, lib, url, title],
    )
    .unwrap();
}

#[test]
fn test_results_concatenated_in_kind_order() {
    let db = setup();
    let conn = db.connection();

    insert_history(conn, "h1", "lib-1", "sqlite docs", "https://sqlite.org");
    insert_bookmark(conn, "b1", "lib-1", "sqlite cheatsheet", false);
    insert_tab(conn, "t1", "lib-1", "sqlite tutorial", "");

    let results = SearchEngine::new(conn).search(None, "sqlite").unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].entity_type, "tab");
    assert_eq!(results[1].entity_type, "bookmark");
    assert_eq!(results[2].entity_type, "history");
}

#[test]
fn test_scoped_search_only_hits_that_library() {
    let db = setup();
    let conn = db.connection();

    insert_tab(conn, "t1", "lib-1", "rust book", "");
    insert_tab(conn, "t2", "lib-2", "rust forum", "");

    let results = SearchEngine::new(conn).search(Some("lib-1"), "rust").unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].entity_id, "t1");
}

#[test]
fn test_unscoped_search_spans_libraries() {
    let db = setup();
    let conn = db.connection();

    insert_tab(conn, "t1", "lib-1", "rust book", "");
    insert_tab(conn, "t2", "lib-2", "rust forum", "");

    let results = SearchEngine::new(conn).search(None, "rust").unwrap();
    assert_eq!(results.len(), 2);
}

#[test]
fn test_notes_match_and_become_the_snippet() {
    let db = setup();
    let conn = db.connection();

    insert_tab(conn, "t1", "lib-1", "unrelated title", "remember the wasm talk");

    let results = SearchEngine::new(conn).search(None, "wasm").unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].snippet, "remember the wasm talk");
}

#[test]
fn test_folder_bookmarks_are_excluded() {
    let db = setup();
    let conn = db.connection();

    insert_bookmark(conn, "b1", "lib-1", "projects folder", true);
    insert_bookmark(conn, "b2", "lib-1", "projects index", false);

    let results = SearchEngine::new(conn).search(None, "projects").unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].entity_id, "b2");
}

#[test]
fn test_history_hits_have_empty_snippet() {
    let db = setup();
    let conn = db.connection();

    insert_history(conn, "h1", "lib-1", "archive", "https://archive.example");

    let results = SearchEngine::new(conn).search(None, "archive").unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].snippet, "");
    assert_eq!(results[0].url, "https://archive.example");
}

#[test]
fn test_url_substring_hits_exactly_one_tab() {
    let db = setup();
    let conn = db.connection();

    conn.execute(
        "INSERT INTO saved_tabs (id, library_id, url, title, saved_at) \
         VALUES ('t1', 'lib-1', 'https://example.com', 'Example Domain', 1)",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO saved_tabs (id, library_id, url, title, saved_at) \
         VALUES ('t2', 'lib-1', 'https://www.sqlite.org', 'SQLite Home Page', 2)",
        [],
    )
    .unwrap();

    let results = SearchEngine::new(conn).search(Some("lib-1"), "sqlite").unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].entity_type, "tab");
    assert!(results[0].url.contains("sqlite"));
}

#[test]
fn test_no_match_returns_empty() {
    let db = setup();
    let conn = db.connection();

    insert_tab(conn, "t1", "lib-1", "something", "");

    let results = SearchEngine::new(conn).search(None, "zzz-no-such-thing").unwrap();
    assert!(results.is_empty());
}

/// Each scan is capped independently: 30 tabs, 20 bookmarks, 20 history.
#[test]
fn test_per_kind_caps_apply() {
    let db = setup();
    let conn = db.connection();

    for i in 0..40 {
        insert_tab(conn, &format!("t{}", i), "lib-1", "common term", "");
        insert_bookmark(conn, &format!("b{}", i), "lib-1", "common term", false);
        insert_history(conn, &format!("h{}", i), "lib-1", "common term", "https://x.example");
    }

    let results = SearchEngine::new(conn).search(None, "common").unwrap();
    let tabs = results.iter().filter(|r| r.entity_type == "tab").count();
    let bookmarks = results.iter().filter(|r| r.entity_type == "bookmark").count();
    let history = results.iter().filter(|r| r.entity_type == "history").count();

    assert_eq!(tabs, 30);
    assert_eq!(bookmarks, 20);
    assert_eq!(history, 20);
}
