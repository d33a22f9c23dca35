//! Run history tracking.
//!
//! When enabled, the engine records every move it makes: ordinary
//! transitions, pushes, pops and backtracks, each with the frame depth at
//! which it happened and a timestamp.

use super::state::StateName;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What kind of move a step was.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepKind {
    /// Normal transition selected from the eligible list.
    Transition,
    /// Entry into a push state opened a new frame.
    Push,
    /// A pop state unwound a frame and resumed its caller.
    Pop,
    /// Transition replayed from an older occurrence while backtracking.
    Backtrack,
}

/// Record of a single step.
///
/// # Example
///
/// ```rust
/// use cogwork::core::{StepKind, StepRecord};
/// use chrono::Utc;
///
/// let step = StepRecord {
///     kind: StepKind::Transition,
///     from: "p",
///     to: "q",
///     depth: 0,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(step.to, "q");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StepRecord<S> {
    pub kind: StepKind,
    /// State being left (for a push: the push state itself)
    pub from: S,
    /// State being entered (for a push: the push state itself)
    pub to: S,
    /// Number of suspended frames after the step
    pub depth: usize,
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of steps.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunHistory<S> {
    steps: Vec<StepRecord<S>>,
}

impl<S> Default for RunHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> RunHistory<S> {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn record(&mut self, step: StepRecord<S>) {
        self.steps.push(step);
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }

    pub fn steps(&self) -> &[StepRecord<S>] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of steps of the given kind.
    pub fn count(&self, kind: StepKind) -> usize {
        self.steps.iter().filter(|s| s.kind == kind).count()
    }

    /// Elapsed time between the first and the last step.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.steps.first()?, self.steps.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }
}

impl<S: StateName> RunHistory<S> {
    /// States traversed: the first step's source, then every entered state.
    /// Push steps do not change the state and are skipped.
    pub fn path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.steps.first() {
            path.push(&first.from);
        }
        for step in &self.steps {
            if step.kind != StepKind::Push {
                path.push(&step.to);
            }
        }
        path
    }
}
