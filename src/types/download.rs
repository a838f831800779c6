use serde::{Deserialize, Serialize};

/// A captured download record.
///
/// `state` is free-form text from the browser ("complete", "interrupted", ...);
/// it defaults to "complete" when the extension omits it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Download {
    pub id: String,
    pub library_id: String,
    pub filename: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<i64>,
    pub downloaded_at: i64,
    pub state: String,
    pub notes: String,
}
