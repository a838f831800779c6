// TabVault entity managers
// One manager per entity kind; each borrows the shared SQLite connection.

pub mod bookmark_manager;
pub mod download_manager;
pub mod history_manager;
pub mod library_manager;
pub mod session_manager;
pub mod tab_manager;
