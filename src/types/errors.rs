use std::fmt;

// === StoreError ===

/// Errors produced by the entity store and the HTTP layer on top of it.
///
/// The variants map one-to-one onto HTTP status codes via [`StoreError::status_code`]:
/// Validation → 400, Unauthorized → 401, NotFound → 404, NotImplemented → 501,
/// Storage → 500. Storage messages are diagnostic text passed through from the
/// database layer, not a stable contract.
#[derive(Debug)]
pub enum StoreError {
    /// A required request field is missing or invalid.
    Validation(String),
    /// The shared-secret token is missing or does not match.
    Unauthorized,
    /// No row matched the given identifier.
    NotFound(String),
    /// The requested feature is an intentional stub.
    NotImplemented(String),
    /// The underlying database operation failed.
    Storage(String),
}

impl StoreError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::Validation(_) => 400,
            StoreError::Unauthorized => 401,
            StoreError::NotFound(_) => 404,
            StoreError::NotImplemented(_) => 501,
            StoreError::Storage(_) => 500,
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Validation(msg) => write!(f, "{}", msg),
            StoreError::Unauthorized => write!(f, "unauthorized"),
            StoreError::NotFound(what) => write!(f, "{} not found", what),
            StoreError::NotImplemented(what) => write!(f, "{} not yet implemented", what),
            StoreError::Storage(msg) => write!(f, "storage error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Shorthand for wrapping a rusqlite error into `StoreError::Storage`.
pub fn storage(e: rusqlite::Error) -> StoreError {
    StoreError::Storage(e.to_string())
}
