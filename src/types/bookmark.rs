use serde::{Deserialize, Serialize};

/// A bookmark or bookmark folder.
///
/// `parent_id` forms a forest: folders (`is_folder = true`, `url` usually
/// `None`) contain child bookmarks and folders. Deleting a node removes its
/// whole subtree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    pub library_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colour: Option<String>,
    pub created_at: i64,
    pub is_folder: bool,
}
