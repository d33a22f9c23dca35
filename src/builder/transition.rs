//! Builder for constructing transitions.

use crate::builder::error::BuildError;
use crate::core::{StateName, Transition, TransitionTest};
use crate::engine::Scope;

/// Builder for constructing transitions with a fluent API.
pub struct TransitionBuilder<S, D, F = ()> {
    target: Option<S>,
    test: Option<TransitionTest<S, D, F>>,
    label: Option<String>,
}

impl<S: StateName, D, F> TransitionBuilder<S, D, F> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            target: None,
            test: None,
            label: None,
        }
    }

    /// Set the target state (required).
    pub fn to(mut self, state: S) -> Self {
        self.target = Some(state);
        self
    }

    /// Gate the transition with a test `(data, scope, from, to) -> bool`.
    pub fn when<P>(mut self, test: P) -> Self
    where
        P: Fn(&D, &Scope<S, F>, &S, &S) -> bool + Send + Sync + 'static,
    {
        self.test = Some(TransitionTest::new(test));
        self
    }

    /// Label shown on diagrams.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<Transition<S, D, F>, BuildError> {
        let target = self.target.ok_or(BuildError::MissingTarget)?;
        Ok(Transition {
            target,
            test: self.test,
            label: self.label,
        })
    }
}

impl<S: StateName, D, F> Default for TransitionBuilder<S, D, F> {
    fn default() -> Self {
        Self::new()
    }
}
