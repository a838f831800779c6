use serde::{Deserialize, Serialize};

/// A library: the top-level namespace owning all other entities for one
/// user/browser profile.
///
/// `is_encrypted` and `password_salt` are reserved for a future encrypted-library
/// mode; the daemon stores them verbatim but never interprets them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Library {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    pub is_encrypted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_salt: Option<String>,
}

/// Partial update for a library. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryPatch {
    pub name: Option<String>,
}
