//! Unit tests for the BookmarkManager public API.
//!
//! Exercises bookmark and folder CRUD and the recursive subtree delete,
//! using an in-memory SQLite database.

use tabvault::database::Database;
use tabvault::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait};
use tabvault::types::bookmark::Bookmark;

fn setup() -> Database {
    Database::open_in_memory().expect("Failed to open in-memory database")
}

fn bookmark(id: &str, library_id: &str, title: &str, created_at: i64) -> Bookmark {
    Bookmark {
        id: id.to_string(),
        library_id: library_id.to_string(),
        parent_id: None,
        title: title.to_string(),
        url: Some(format!("https://{}.example", id)),
        notes: String::new(),
        colour: None,
        created_at,
        is_folder: false,
    }
}

fn folder(id: &str, library_id: &str, title: &str, parent_id: Option<&str>) -> Bookmark {
    Bookmark {
        id: id.to_string(),
        library_id: library_id.to_string(),
        parent_id: parent_id.map(|p| p.to_string()),
        title: title.to_string(),
        url: None,
        notes: String::new(),
        colour: None,
        created_at: 1000,
        is_folder: true,
    }
}

#[test]
fn test_create_and_list_bookmarks_oldest_first() {
    let db = setup();
    let mut mgr = BookmarkManager::new(db.connection());

    mgr.create_bookmark(&bookmark("b2", "lib-1", "Second", 2000)).unwrap();
    mgr.create_bookmark(&bookmark("b1", "lib-1", "First", 1000)).unwrap();
    mgr.create_bookmark(&bookmark("b3", "lib-2", "Elsewhere", 500)).unwrap();

    let items = mgr.list_bookmarks("lib-1").unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].title, "First");
    assert_eq!(items[1].title, "Second");
}

#[test]
fn test_duplicate_bookmark_id_is_a_silent_noop() {
    let db = setup();
    let mut mgr = BookmarkManager::new(db.connection());

    mgr.create_bookmark(&bookmark("b1", "lib-1", "Original", 1000)).unwrap();
    mgr.create_bookmark(&bookmark("b1", "lib-1", "Replay", 2000)).unwrap();

    let items = mgr.list_bookmarks("lib-1").unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Original");
}

#[test]
fn test_folders_round_trip() {
    let db = setup();
    let mut mgr = BookmarkManager::new(db.connection());

    mgr.create_bookmark(&folder("f1", "lib-1", "Work", None)).unwrap();
    let mut child = bookmark("b1", "lib-1", "Inside", 2000);
    child.parent_id = Some("f1".to_string());
    mgr.create_bookmark(&child).unwrap();

    let items = mgr.list_bookmarks("lib-1").unwrap();
    assert_eq!(items.len(), 2);
    assert!(items[0].is_folder);
    assert!(items[0].url.is_none());
    assert_eq!(items[1].parent_id.as_deref(), Some("f1"));
}

/// Deleting a folder removes the whole subtree: children, grandchildren,
/// nested folders. Siblings outside the subtree survive.
#[test]
fn test_delete_folder_removes_subtree() {
    let db = setup();
    let mut mgr = BookmarkManager::new(db.connection());

    mgr.create_bookmark(&folder("root", "lib-1", "Root", None)).unwrap();
    mgr.create_bookmark(&folder("sub", "lib-1", "Sub", Some("root"))).unwrap();

    let mut leaf = bookmark("leaf", "lib-1", "Leaf", 2000);
    leaf.parent_id = Some("sub".to_string());
    mgr.create_bookmark(&leaf).unwrap();

    let mut sibling = bookmark("sibling", "lib-1", "Sibling", 3000);
    sibling.parent_id = None;
    mgr.create_bookmark(&sibling).unwrap();

    mgr.delete_bookmark("root").unwrap();

    let remaining = mgr.list_bookmarks("lib-1").unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, "sibling");
}

#[test]
fn test_delete_leaf_bookmark_only_removes_itself() {
    let db = setup();
    let mut mgr = BookmarkManager::new(db.connection());

    mgr.create_bookmark(&folder("f1", "lib-1", "Work", None)).unwrap();
    let mut child = bookmark("b1", "lib-1", "Inside", 2000);
    child.parent_id = Some("f1".to_string());
    mgr.create_bookmark(&child).unwrap();

    mgr.delete_bookmark("b1").unwrap();

    let remaining = mgr.list_bookmarks("lib-1").unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, "f1");
}

#[test]
fn test_delete_missing_bookmark_is_silent() {
    let db = setup();
    let mut mgr = BookmarkManager::new(db.connection());
    assert!(mgr.delete_bookmark("ghost").is_ok());
}
