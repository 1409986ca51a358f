// crates/regionpick-core/src/error.rs
use thiserror::Error;

/// Errors produced while loading datasets, manifests or driving the cache
/// lifecycle.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A network request was rejected (offline, DNS, non-success status...).
    #[error("Fetch of {url} failed: {reason}")]
    Fetch { url: String, reason: String },

    /// The cache substrate refused an operation.
    #[error("Cache error: {0}")]
    Cache(String),

    /// A lifecycle step was requested out of order.
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl Error {
    pub fn fetch(url: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Error::Fetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
