//! Unit tests for the DownloadManager public API.

use tabvault::database::Database;
use tabvault::managers::download_manager::{DownloadManager, DownloadManagerTrait};
use tabvault::types::download::Download;

fn setup() -> Database {
    Database::open_in_memory().expect("Failed to open in-memory database")
}

fn download(id: &str, library_id: &str, filename: &str, downloaded_at: i64) -> Download {
    Download {
        id: id.to_string(),
        library_id: library_id.to_string(),
        filename: filename.to_string(),
        url: format!("https://example.com/{}", filename),
        mime_type: None,
        file_size: None,
        downloaded_at,
        state: "complete".to_string(),
        notes: String::new(),
    }
}

#[test]
fn test_create_and_list_downloads_newest_first() {
    let db = setup();
    let mut mgr = DownloadManager::new(db.connection());

    mgr.create_download(&download("d1", "lib-1", "older.pdf", 1000)).unwrap();
    mgr.create_download(&download("d2", "lib-1", "newer.pdf", 2000)).unwrap();
    mgr.create_download(&download("d3", "lib-2", "other.pdf", 3000)).unwrap();

    let items = mgr.list_downloads("lib-1").unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].filename, "newer.pdf");
    assert_eq!(items[1].filename, "older.pdf");
}

#[test]
fn test_duplicate_download_id_is_a_silent_noop() {
    let db = setup();
    let mut mgr = DownloadManager::new(db.connection());

    mgr.create_download(&download("d1", "lib-1", "report.pdf", 1000)).unwrap();
    mgr.create_download(&download("d1", "lib-1", "replay.pdf", 2000)).unwrap();

    let items = mgr.list_downloads("lib-1").unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].filename, "report.pdf");
}

#[test]
fn test_optional_metadata_round_trips() {
    let db = setup();
    let mut mgr = DownloadManager::new(db.connection());

    let mut d = download("d1", "lib-1", "report.pdf", 1000);
    d.mime_type = Some("application/pdf".to_string());
    d.file_size = Some(123_456);
    d.state = "interrupted".to_string();
    mgr.create_download(&d).unwrap();

    let items = mgr.list_downloads("lib-1").unwrap();
    assert_eq!(items[0].mime_type.as_deref(), Some("application/pdf"));
    assert_eq!(items[0].file_size, Some(123_456));
    assert_eq!(items[0].state, "interrupted");
}

#[test]
fn test_delete_download() {
    let db = setup();
    let mut mgr = DownloadManager::new(db.connection());

    mgr.create_download(&download("d1", "lib-1", "report.pdf", 1000)).unwrap();
    mgr.delete_download("d1").unwrap();

    assert!(mgr.list_downloads("lib-1").unwrap().is_empty());
    assert!(mgr.delete_download("d1").is_ok());
}
