use thiserror::Error;

/// Registration input that fails the presence check. Surfaced to the user
/// through the notification sink; the store stays untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
}

/// Failures inside a storage backend or while decoding persisted state.
/// These are logged and swallowed at the persistence-adapter boundary and
/// never reach the user.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage read/write failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("persisted state is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}
