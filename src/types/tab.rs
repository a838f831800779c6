use serde::{Deserialize, Serialize};

/// A saved browser tab.
///
/// `session_id` is nullable: a tab outlives its session when the session is
/// deleted without the delete-tabs flag (the tab becomes "orphaned").
///
/// `session_name`, `library_name` and `source_browser` are populated only by
/// the cross-library master view (`list_all_tabs`), which JOINs the owning
/// session and library for display; per-library listings leave them `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub id: String,
    pub library_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub url: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fav_icon_url: Option<String>,
    pub saved_at: i64,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colour: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_browser: Option<String>,
}

/// Partial update for a saved tab. Notes is the only patchable field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabPatch {
    pub notes: Option<String>,
}
