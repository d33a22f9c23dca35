//! Problems found in a state table and how serious they are.

use thiserror::Error;

/// A problem found by [`StateTable::validate`](crate::core::StateTable::validate).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TableIssue {
    #[error("Transition from '{from}' targets unknown state '{target}'")]
    UnknownTarget { from: String, target: String },

    #[error("Push state '{state}' resumes at unknown state '{resume}'")]
    UnknownResume { state: String, resume: String },

    #[error("Pop state '{state}' declares {count} transition(s) that are never taken")]
    PopWithTransitions { state: String, count: usize },

    #[error("Push state '{state}' has no transitions into its nested grammar")]
    PushWithoutTransitions { state: String },

    #[error("State '{state}' is not reachable from the initial state")]
    Unreachable { state: String },
}

/// How a caller should treat an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// A run can fail with an engine error because of it
    Error,

    /// Dead weight in the table; runs are unaffected
    Warning,
}

impl TableIssue {
    pub fn severity(&self) -> Severity {
        match self {
            Self::UnknownTarget { .. } | Self::UnknownResume { .. } => Severity::Error,
            Self::PushWithoutTransitions { .. } => Severity::Error,
            Self::PopWithTransitions { .. } | Self::Unreachable { .. } => Severity::Warning,
        }
    }
}
