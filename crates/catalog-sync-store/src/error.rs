use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by the durable store and the persistence service.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The payload exists on disk but cannot be deserialized.
    #[error("stored data at {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize watchlist data: {0}")]
    Serialize(#[source] serde_json::Error),

    /// No watchlist item with the requested id.
    #[error("watchlist item {id} not found")]
    ItemNotFound { id: u64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
