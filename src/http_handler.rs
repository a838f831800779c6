//! Transport-free HTTP request dispatch.
//!
//! `handle_request` maps a (method, path, query, token, body) tuple onto the
//! entity store and returns a status plus optional JSON body. Keeping the
//! socket out of this layer means every route is testable with nothing but an
//! in-memory [`App`].

use rusqlite::Connection;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::app::App;
use crate::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait};
use crate::managers::download_manager::{DownloadManager, DownloadManagerTrait};
use crate::managers::history_manager::{HistoryManager, HistoryManagerTrait};
use crate::managers::library_manager::{LibraryManager, LibraryManagerTrait};
use crate::managers::session_manager::{SessionManager, SessionManagerTrait};
use crate::managers::tab_manager::{TabManager, TabManagerTrait};
use crate::services::library_namer::{default_library_name, os_username, DEFAULT_LIBRARY_NAME};
use crate::services::search_engine::{SearchEngine, SearchEngineTrait};
use crate::types::bookmark::Bookmark;
use crate::types::download::Download;
use crate::types::errors::StoreError;
use crate::types::history::HistoryEntry;
use crate::types::library::{Library, LibraryPatch};
use crate::types::session::{Session, SessionPatch};
use crate::types::tab::{Tab, TabPatch};

pub const DAEMON_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Outcome of a dispatched request. A `body` of `None` means an empty
/// 204-style response.
#[derive(Debug)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl ApiResponse {
    fn ok(body: Value) -> Self {
        Self {
            status: 200,
            body: Some(body),
        }
    }

    fn no_content() -> Self {
        Self {
            status: 204,
            body: None,
        }
    }

    fn from_error(err: &StoreError) -> Self {
        Self {
            status: err.status_code(),
            body: Some(json!({ "error": err.to_string() })),
        }
    }
}

fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Client-supplied id when present, fresh 32-hex uuid otherwise. The
/// extension passes its own ids so records stay correlated across restores.
fn id_or_new(id: &str) -> String {
    if id.is_empty() {
        Uuid::new_v4().simple().to_string()
    } else {
        id.to_string()
    }
}

/// Extracts and percent-decodes one query-string parameter.
fn query_param(query: &str, key: &str) -> Option<String> {
    for pair in query.split('&') {
        let mut it = pair.splitn(2, '=');
        let k = it.next().unwrap_or("");
        if k == key {
            let raw = it.next().unwrap_or("");
            return Some(
                urlencoding::decode(raw)
                    .map(|c| c.into_owned())
                    .unwrap_or_else(|_| raw.to_string()),
            );
        }
    }
    None
}

fn parse_body<T: for<'de> Deserialize<'de>>(body: &str) -> Result<T, StoreError> {
    // An empty PATCH body is treated as "{}" so empty patches stay no-ops.
    let text = if body.trim().is_empty() { "{}" } else { body };
    serde_json::from_str(text).map_err(|e| StoreError::Validation(format!("invalid JSON: {}", e)))
}

// Request bodies. String fields default to "" so absent and empty are the
// same thing, matching what the extension actually sends.

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateLibraryReq {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    description: Option<String>,
    #[serde(default)]
    is_encrypted: bool,
    password_salt: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateSessionReq {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    source_browser: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTabReq {
    #[serde(default)]
    id: String,
    session_id: Option<String>,
    #[serde(default)]
    url: String,
    #[serde(default)]
    title: String,
    fav_icon_url: Option<String>,
    #[serde(default)]
    notes: String,
    colour: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateBookmarkReq {
    #[serde(default)]
    id: String,
    parent_id: Option<String>,
    #[serde(default)]
    title: String,
    url: Option<String>,
    #[serde(default)]
    notes: String,
    colour: Option<String>,
    #[serde(default)]
    is_folder: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateHistoryReq {
    #[serde(default)]
    id: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    visit_time: i64,
    #[serde(default)]
    domain: String,
    #[serde(default)]
    is_important: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateDownloadReq {
    #[serde(default)]
    id: String,
    #[serde(default)]
    filename: String,
    #[serde(default)]
    url: String,
    mime_type: Option<String>,
    file_size: Option<i64>,
    #[serde(default)]
    downloaded_at: i64,
    #[serde(default)]
    state: String,
    #[serde(default)]
    notes: String,
}

/// Routes that do not require the token. `/token` itself is the bootstrap:
/// the daemon only binds loopback, so any local caller is trusted to read it.
fn is_public_route(path: &str) -> bool {
    matches!(path, "/health" | "/version" | "/token")
}

/// Dispatches one request. `token_header` is the raw `X-TabVault-Token`
/// value, if the client sent one.
pub fn handle_request(
    app: &App,
    method: &str,
    path: &str,
    query: &str,
    token_header: Option<&str>,
    body: &str,
) -> ApiResponse {
    if !is_public_route(path) && token_header != Some(app.token.as_str()) {
        return ApiResponse::from_error(&StoreError::Unauthorized);
    }

    let db = match app.db.lock() {
        Ok(guard) => guard,
        Err(_) => {
            return ApiResponse::from_error(&StoreError::Storage(
                "database lock poisoned".to_string(),
            ))
        }
    };

    match dispatch(app, db.connection(), method, path, query, body) {
        Ok(resp) => resp,
        Err(e) => ApiResponse::from_error(&e),
    }
}

fn dispatch(
    app: &App,
    conn: &Connection,
    method: &str,
    path: &str,
    query: &str,
    body: &str,
) -> Result<ApiResponse, StoreError> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match (method, segments.as_slice()) {
        ("GET", ["health"]) => Ok(ApiResponse::ok(json!({
            "status": "ok",
            "version": DAEMON_VERSION,
        }))),
        ("GET", ["version"]) => Ok(ApiResponse::ok(json!({ "version": DAEMON_VERSION }))),
        ("GET", ["token"]) => Ok(ApiResponse::ok(json!({ "token": app.token }))),

        ("GET", ["libraries"]) => {
            let libs = LibraryManager::new(conn).list_libraries()?;
            Ok(ApiResponse::ok(serde_json::to_value(libs).unwrap_or_default()))
        }
        ("POST", ["libraries"]) => create_library(conn, body),
        ("GET", ["libraries", id]) => {
            let lib = LibraryManager::new(conn).get_library(id)?;
            Ok(ApiResponse::ok(serde_json::to_value(lib).unwrap_or_default()))
        }
        ("PATCH", ["libraries", id]) => {
            let patch: LibraryPatch = parse_body(body)?;
            if let Some(name) = patch.name {
                LibraryManager::new(conn).rename_library(id, &name)?;
            }
            Ok(ApiResponse::no_content())
        }
        ("DELETE", ["libraries", id]) => {
            LibraryManager::new(conn).delete_library(id)?;
            Ok(ApiResponse::no_content())
        }

        ("GET", ["libraries", lib_id, "sessions"]) => {
            let include_archived = query_param(query, "archived").as_deref() == Some("true");
            let sessions = SessionManager::new(conn).list_sessions(lib_id, include_archived)?;
            Ok(ApiResponse::ok(serde_json::to_value(sessions).unwrap_or_default()))
        }
        ("POST", ["libraries", lib_id, "sessions"]) => create_session(conn, lib_id, body),
        ("PATCH", ["libraries", _, "sessions", id]) => {
            let patch: SessionPatch = parse_body(body)?;
            SessionManager::new(conn).update_session(id, &patch)?;
            Ok(ApiResponse::no_content())
        }
        ("DELETE", ["libraries", _, "sessions", id]) => {
            let mut mgr = SessionManager::new(conn);
            if query_param(query, "deleteTabs").as_deref() == Some("true") {
                mgr.delete_session_with_tabs(id)?;
            } else {
                mgr.delete_session(id)?;
            }
            Ok(ApiResponse::no_content())
        }

        ("GET", ["sessions"]) => {
            let include_archived = query_param(query, "archived").as_deref() == Some("true");
            let sessions = SessionManager::new(conn).list_all_sessions(include_archived)?;
            Ok(ApiResponse::ok(serde_json::to_value(sessions).unwrap_or_default()))
        }
        ("GET", ["tabs"]) => {
            let tabs = TabManager::new(conn).list_all_tabs()?;
            Ok(ApiResponse::ok(serde_json::to_value(tabs).unwrap_or_default()))
        }
        ("PATCH", ["tabs", id]) => {
            let patch: TabPatch = parse_body(body)?;
            TabManager::new(conn).update_tab(id, &patch)?;
            Ok(ApiResponse::no_content())
        }
        ("DELETE", ["tabs", id]) => {
            TabManager::new(conn).delete_tab(id)?;
            Ok(ApiResponse::no_content())
        }

        ("GET", ["libraries", lib_id, "tabs"]) => {
            let tabs = TabManager::new(conn).list_tabs(lib_id)?;
            Ok(ApiResponse::ok(serde_json::to_value(tabs).unwrap_or_default()))
        }
        ("POST", ["libraries", lib_id, "tabs"]) => create_tab(conn, lib_id, body),
        ("DELETE", ["libraries", _, "tabs", id]) => {
            TabManager::new(conn).delete_tab(id)?;
            Ok(ApiResponse::no_content())
        }

        ("GET", ["libraries", lib_id, "bookmarks"]) => {
            let items = BookmarkManager::new(conn).list_bookmarks(lib_id)?;
            Ok(ApiResponse::ok(serde_json::to_value(items).unwrap_or_default()))
        }
        ("POST", ["libraries", lib_id, "bookmarks"]) => create_bookmark(conn, lib_id, body),
        ("DELETE", ["libraries", _, "bookmarks", id]) => {
            BookmarkManager::new(conn).delete_bookmark(id)?;
            Ok(ApiResponse::no_content())
        }

        ("GET", ["libraries", lib_id, "history"]) => {
            let items = HistoryManager::new(conn).list_history(lib_id)?;
            Ok(ApiResponse::ok(serde_json::to_value(items).unwrap_or_default()))
        }
        ("POST", ["libraries", lib_id, "history"]) => create_history_entry(conn, lib_id, body),
        ("DELETE", ["libraries", _, "history", id]) => {
            HistoryManager::new(conn).delete_entry(id)?;
            Ok(ApiResponse::no_content())
        }

        ("GET", ["libraries", lib_id, "downloads"]) => {
            let items = DownloadManager::new(conn).list_downloads(lib_id)?;
            Ok(ApiResponse::ok(serde_json::to_value(items).unwrap_or_default()))
        }
        ("POST", ["libraries", lib_id, "downloads"]) => create_download(conn, lib_id, body),
        ("DELETE", ["libraries", _, "downloads", id]) => {
            DownloadManager::new(conn).delete_download(id)?;
            Ok(ApiResponse::no_content())
        }

        ("GET", ["search"]) => {
            let q = query_param(query, "q").unwrap_or_default();
            if q.is_empty() {
                return Err(StoreError::Validation("q is required".to_string()));
            }
            let lib_id = query_param(query, "libId").unwrap_or_default();
            let scope = if lib_id.is_empty() {
                None
            } else {
                Some(lib_id.as_str())
            };
            let results = SearchEngine::new(conn).search(scope, &q)?;
            Ok(ApiResponse::ok(serde_json::to_value(results).unwrap_or_default()))
        }

        ("POST", ["sync"]) => Err(StoreError::NotImplemented("sync".to_string())),

        _ => Err(StoreError::NotFound(format!("{} {}", method, path))),
    }
}

fn create_library(conn: &Connection, body: &str) -> Result<ApiResponse, StoreError> {
    let req: CreateLibraryReq = parse_body(body)?;
    if req.name.is_empty() {
        return Err(StoreError::Validation("name is required".to_string()));
    }
    let now = now_millis();
    let lib = Library {
        id: id_or_new(&req.id),
        name: req.name,
        description: req.description,
        created_at: now,
        updated_at: now,
        is_encrypted: req.is_encrypted,
        password_salt: req.password_salt,
    };
    LibraryManager::new(conn).create_library(&lib)?;
    Ok(ApiResponse::ok(serde_json::to_value(lib).unwrap_or_default()))
}

fn create_session(conn: &Connection, lib_id: &str, body: &str) -> Result<ApiResponse, StoreError> {
    let lib = LibraryManager::new(conn)
        .get_library(lib_id)
        .map_err(|_| StoreError::NotFound("library".to_string()))?;
    let req: CreateSessionReq = parse_body(body)?;
    if req.name.is_empty() {
        return Err(StoreError::Validation("name is required".to_string()));
    }
    let now = now_millis();
    let session = Session {
        id: id_or_new(&req.id),
        library_id: lib_id.to_string(),
        name: req.name,
        notes: req.notes,
        created_at: now,
        updated_at: now,
        source_browser: req.source_browser.clone(),
        archived: false,
        tab_count: 0,
    };
    SessionManager::new(conn).create_session(&session)?;
    // First push from a known browser claims the generic default library's
    // name. Failures here are cosmetic and ignored.
    if !req.source_browser.is_empty() && lib.name == DEFAULT_LIBRARY_NAME {
        let name = default_library_name(Some(&req.source_browser), &os_username());
        let _ = LibraryManager::new(conn).rename_library(lib_id, &name);
    }
    Ok(ApiResponse::ok(serde_json::to_value(session).unwrap_or_default()))
}

fn create_tab(conn: &Connection, lib_id: &str, body: &str) -> Result<ApiResponse, StoreError> {
    LibraryManager::new(conn)
        .get_library(lib_id)
        .map_err(|_| StoreError::NotFound("library".to_string()))?;
    let req: CreateTabReq = parse_body(body)?;
    if req.url.is_empty() {
        return Err(StoreError::Validation("url is required".to_string()));
    }
    let tab = Tab {
        id: id_or_new(&req.id),
        library_id: lib_id.to_string(),
        session_id: req.session_id,
        url: req.url,
        title: req.title,
        fav_icon_url: req.fav_icon_url,
        saved_at: now_millis(),
        notes: req.notes,
        colour: req.colour,
        session_name: None,
        library_name: None,
        source_browser: None,
    };
    TabManager::new(conn).create_tab(&tab)?;
    Ok(ApiResponse::ok(serde_json::to_value(tab).unwrap_or_default()))
}

fn create_bookmark(conn: &Connection, lib_id: &str, body: &str) -> Result<ApiResponse, StoreError> {
    LibraryManager::new(conn)
        .get_library(lib_id)
        .map_err(|_| StoreError::NotFound("library".to_string()))?;
    let req: CreateBookmarkReq = parse_body(body)?;
    if req.title.is_empty() && req.url.as_deref().unwrap_or("").is_empty() {
        return Err(StoreError::Validation("title or url is required".to_string()));
    }
    let bookmark = Bookmark {
        id: id_or_new(&req.id),
        library_id: lib_id.to_string(),
        parent_id: req.parent_id,
        title: req.title,
        url: req.url,
        notes: req.notes,
        colour: req.colour,
        created_at: now_millis(),
        is_folder: req.is_folder,
    };
    BookmarkManager::new(conn).create_bookmark(&bookmark)?;
    Ok(ApiResponse::ok(serde_json::to_value(bookmark).unwrap_or_default()))
}

fn create_history_entry(
    conn: &Connection,
    lib_id: &str,
    body: &str,
) -> Result<ApiResponse, StoreError> {
    LibraryManager::new(conn)
        .get_library(lib_id)
        .map_err(|_| StoreError::NotFound("library".to_string()))?;
    let req: CreateHistoryReq = parse_body(body)?;
    if req.url.is_empty() {
        return Err(StoreError::Validation("url is required".to_string()));
    }
    let entry = HistoryEntry {
        id: id_or_new(&req.id),
        library_id: lib_id.to_string(),
        title: req.title,
        visit_time: if req.visit_time == 0 {
            now_millis()
        } else {
            req.visit_time
        },
        domain: if req.domain.is_empty() {
            req.url.clone()
        } else {
            req.domain
        },
        url: req.url,
        is_important: req.is_important,
    };
    HistoryManager::new(conn).upsert_entry(&entry)?;
    Ok(ApiResponse::ok(serde_json::to_value(entry).unwrap_or_default()))
}

fn create_download(conn: &Connection, lib_id: &str, body: &str) -> Result<ApiResponse, StoreError> {
    LibraryManager::new(conn)
        .get_library(lib_id)
        .map_err(|_| StoreError::NotFound("library".to_string()))?;
    let req: CreateDownloadReq = parse_body(body)?;
    if req.url.is_empty() {
        return Err(StoreError::Validation("url is required".to_string()));
    }
    let download = Download {
        id: id_or_new(&req.id),
        library_id: lib_id.to_string(),
        filename: req.filename,
        url: req.url,
        mime_type: req.mime_type,
        file_size: req.file_size,
        downloaded_at: if req.downloaded_at == 0 {
            now_millis()
        } else {
            req.downloaded_at
        },
        state: if req.state.is_empty() {
            "complete".to_string()
        } else {
            req.state
        },
        notes: req.notes,
    };
    DownloadManager::new(conn).create_download(&download)?;
    Ok(ApiResponse::ok(serde_json::to_value(download).unwrap_or_default()))
}
