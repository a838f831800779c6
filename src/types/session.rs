use serde::{Deserialize, Serialize};

/// A named snapshot of saved tabs within a library.
///
/// `tab_count` is always computed at query time from `saved_tabs` rows — never
/// stored, so it cannot drift from the real tab rows.
/// `archived` is a soft-delete flag: archived sessions are excluded from
/// default listings unless explicitly requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub library_id: String,
    pub name: String,
    pub notes: String,
    pub created_at: i64,
    pub updated_at: i64,
    /// Originating browser, e.g. "Chrome", "Firefox", "Edge"; "" when unknown.
    pub source_browser: String,
    pub archived: bool,
    pub tab_count: i64,
}

/// Partial update for a session. Absent fields are left untouched; an empty
/// patch is a true no-op (no statement runs, `updated_at` stays as-is).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPatch {
    pub name: Option<String>,
    pub archived: Option<bool>,
}
