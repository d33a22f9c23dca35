//! Build errors for machine, state and transition builders.

use crate::core::ModelError;
use thiserror::Error;

/// Errors that can occur when building a state table or machine.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("State '{state}' is declared more than once")]
    DuplicateState { state: String },

    #[error("Transition from '{state}' added before the state was declared")]
    UnknownSource { state: String },

    #[error("State '{state}' cannot be both a push and a pop state")]
    RoleConflict { state: String },

    #[error("Transition target not specified. Call .to(state)")]
    MissingTarget,

    #[error("Track limit must be at least 1")]
    InvalidTrackBound,

    #[error(transparent)]
    Model(#[from] ModelError),
}
