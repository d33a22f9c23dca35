//! State model errors.

use thiserror::Error;

/// Errors raised when the state table is consulted.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("Unknown state '{state}'")]
    UnknownState { state: String },
}
