//! Chronological backtracking support.
//!
//! Every state entry opens a [`StateOccurrence`]. When the engine selects a
//! transition, the full eligible list is stored on the latest occurrence and
//! the chosen target removed from it. Backtracking scans the [`Track`] from
//! newest to oldest, discarding exhausted occurrences, and replays the next
//! untried transition of the first occurrence that still has one.
//!
//! If the run looks like `(s1) -> (s2) -> (s1)` there are two occurrences of
//! `s1` and one of `s2`.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Why the engine is backtracking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BacktrackCause {
    /// An activity or hook returned [`Signal::Backtrack`](crate::core::Signal::Backtrack).
    Requested,
    /// The active state had no eligible transition.
    DeadEnd,
}

/// One visit to a state during a run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateOccurrence<S> {
    state: S,
    remaining: Vec<S>,
}

impl<S: PartialEq> StateOccurrence<S> {
    pub fn new(state: S) -> Self {
        Self {
            state,
            remaining: Vec::new(),
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// Targets not tried yet, in declaration order.
    pub fn remaining(&self) -> &[S] {
        &self.remaining
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining.is_empty()
    }

    pub(crate) fn set_remaining(&mut self, transitions: Vec<S>) {
        self.remaining = transitions;
    }

    /// Mark `target` as tried. Returns whether it was still untried.
    pub(crate) fn take(&mut self, target: &S) -> bool {
        match self.remaining.iter().position(|t| t == target) {
            Some(index) => {
                self.remaining.remove(index);
                true
            }
            None => false,
        }
    }
}

/// Ordered history of open occurrences, optionally bounded to the last N.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Track<S> {
    occurrences: VecDeque<StateOccurrence<S>>,
    limit: Option<usize>,
}

impl<S: PartialEq> Track<S> {
    pub fn new() -> Self {
        Self {
            occurrences: VecDeque::new(),
            limit: None,
        }
    }

    /// Track keeping at most `limit` occurrences. Older ones are forgotten
    /// and can no longer be backtracked into.
    pub fn bounded(limit: usize) -> Self {
        Self {
            occurrences: VecDeque::new(),
            limit: Some(limit),
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    pub fn push(&mut self, occurrence: StateOccurrence<S>) {
        self.occurrences.push_back(occurrence);
        if let Some(limit) = self.limit {
            while self.occurrences.len() > limit {
                self.occurrences.pop_front();
            }
        }
    }

    pub fn last(&self) -> Option<&StateOccurrence<S>> {
        self.occurrences.back()
    }

    pub(crate) fn last_mut(&mut self) -> Option<&mut StateOccurrence<S>> {
        self.occurrences.back_mut()
    }

    pub(crate) fn pop(&mut self) -> Option<StateOccurrence<S>> {
        self.occurrences.pop_back()
    }

    pub(crate) fn clear(&mut self) {
        self.occurrences.clear();
    }

    /// Occurrences, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &StateOccurrence<S>> {
        self.occurrences.iter()
    }
}

impl<S: PartialEq> Default for Track<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: fmt::Display> fmt::Display for Track<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut occurrences = self.occurrences.iter().peekable();
        if occurrences.peek().is_none() {
            return f.write_str("<Empty Track>");
        }
        while let Some(occ) = occurrences.next() {
            write!(f, "{}", occ.state)?;
            if occurrences.peek().is_some() {
                write!(f, " -({})-> ", occ.remaining.len() + 1)?;
            }
        }
        Ok(())
    }
}
