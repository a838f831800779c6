use serde::{Deserialize, Serialize};

/// A single browsing-history entry.
///
/// Ingestion is upsert-by-id: re-submitting an entry with an id that already
/// exists is a silent no-op, so the extension can replay its capture queue
/// safely.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub library_id: String,
    pub url: String,
    pub title: String,
    pub visit_time: i64,
    pub domain: String,
    pub is_important: bool,
}
