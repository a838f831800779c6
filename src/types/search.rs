use serde::{Deserialize, Serialize};

/// A single cross-entity search hit.
///
/// Results carry the entity kind as a tag ("tab", "bookmark", "history"), a
/// display title, the row's url (empty when the entity has none), and a
/// snippet taken from the row's notes (empty for history entries).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub entity_type: String,
    pub entity_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub url: String,
    pub snippet: String,
}
