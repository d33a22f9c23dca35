//! Snapshot error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("Snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Snapshot binary error: {0}")]
    Binary(#[from] bincode::Error),

    #[error("Unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Snapshot id is not a UUID
    #[error("Invalid snapshot id '{id}'")]
    InvalidId { id: String },
}
