//! Transition definitions.

use super::guard::TransitionTest;
use super::state::StateName;
use crate::engine::Scope;
use std::fmt;

/// A directed, tested edge owned by its source state.
///
/// A transition without a test is always eligible. The label is for
/// diagnostics and diagrams only.
pub struct Transition<S, D, F> {
    pub(crate) target: S,
    pub(crate) test: Option<TransitionTest<S, D, F>>,
    pub(crate) label: Option<String>,
}

impl<S: StateName, D, F> Transition<S, D, F> {
    /// Unconditional transition to `target`.
    pub fn always(target: S) -> Self {
        Self {
            target,
            test: None,
            label: None,
        }
    }

    /// Transition to `target` gated by `test`.
    pub fn when<P>(target: S, test: P) -> Self
    where
        P: Fn(&D, &Scope<S, F>, &S, &S) -> bool + Send + Sync + 'static,
    {
        Self {
            target,
            test: Some(TransitionTest::new(test)),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn target(&self) -> &S {
        &self.target
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Evaluate the test for a move out of `from` (pure).
    pub fn is_eligible(&self, data: &D, scope: &Scope<S, F>, from: &S) -> bool {
        self.test
            .as_ref()
            .map_or(true, |t| t.check(data, scope, from, &self.target))
    }
}

impl<S: fmt::Debug, D, F> fmt::Debug for Transition<S, D, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("target", &self.target)
            .field("tested", &self.test.is_some())
            .field("label", &self.label)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_is_eligible() {
        let transition: Transition<&str, (), ()> = Transition::always("q");
        let scope = Scope::new("p", ());

        assert!(transition.is_eligible(&(), &scope, &"p"));
        assert_eq!(transition.target(), &"q");
        assert_eq!(transition.label(), None);
    }

    #[test]
    fn test_gates_eligibility() {
        let transition: Transition<&str, char, ()> =
            Transition::when("q", |symbol: &char, _, _, _| *symbol == 'q').with_label("q");
        let scope = Scope::new("p", ());

        assert!(transition.is_eligible(&'q', &scope, &"p"));
        assert!(!transition.is_eligible(&'p', &scope, &"p"));
        assert_eq!(transition.label(), Some("q"));
    }
}
