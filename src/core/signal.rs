//! Control-flow signals and run outcomes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Value returned by activities and by the hooks that may end a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Signal {
    /// Keep going.
    Continue,

    /// End the run successfully.
    Accept,

    /// End the run with a grammar-level failure.
    Reject(String),

    /// Undo to the most recent occurrence with an untried transition.
    /// Without the backtracking extension this rejects the run.
    Backtrack,
}

impl Signal {
    pub fn reject(reason: impl Into<String>) -> Self {
        Self::Reject(reason.into())
    }

    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue)
    }
}

/// Why a run was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Rejection {
    /// Rejected by grammar code with a caller-formatted reason.
    #[error("{0}")]
    Grammar(String),

    #[error("Cannot transition from state {state}")]
    NoTransition { state: String },

    #[error("Backtracking exhausted.")]
    Exhausted,

    #[error("Accepted with {depth} unclosed frame(s), innermost opened by '{opener}'")]
    UnclosedFrames { opener: String, depth: usize },

    #[error("Backtrack requested in state {state} without backtracking enabled")]
    BacktrackUnsupported { state: String },
}

/// Terminal outcome of [`Machine::run`](crate::engine::Machine::run).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Accepted,
    Rejected(Rejection),
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Accepted => None,
            Self::Rejected(rejection) => Some(rejection),
        }
    }
}
