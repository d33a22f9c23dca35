//! Engine errors.
//!
//! These are invariant violations, not run outcomes: a rejected input is an
//! `Ok(Outcome::Rejected(..))`.

use crate::core::ModelError;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("State stack is empty: pop state '{state}' has no suspended frame to resume")]
    EmptyStack { state: String },

    #[error("Selection in state '{state}' returned index {index} for {candidates} candidate(s)")]
    InvalidSelection {
        state: String,
        index: usize,
        candidates: usize,
    },

    #[error(transparent)]
    Model(#[from] ModelError),
}
