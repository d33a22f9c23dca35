//! Lifecycle hooks.
//!
//! The caller's automaton data implements [`Hooks`]. Every method has a
//! no-op default, so grammars override only what they need. The engine
//! performs its own extension work (occurrence tracking, frame handling)
//! first and then calls the hook, always in this order.

use super::scope::Scope;
use crate::backtrack::{BacktrackCause, StateOccurrence};
use crate::core::{Rejection, Signal};

/// Extension points of the run loop.
///
/// # Example
///
/// ```rust
/// use cogwork::engine::{Hooks, Scope};
///
/// #[derive(Default)]
/// struct Counter {
///     entered: usize,
/// }
///
/// impl Hooks<&'static str> for Counter {
///     fn on_enter_state(&mut self, _scope: &Scope<&'static str, ()>, _state: &&'static str) {
///         self.entered += 1;
///     }
/// }
/// ```
pub trait Hooks<S, F = ()> {
    /// A state has been entered.
    fn on_enter_state(&mut self, _scope: &Scope<S, F>, _state: &S) {}

    /// A state is being left.
    fn on_exit_state(&mut self, _scope: &Scope<S, F>, _state: &S) {}

    /// Fired after the source's exit and before the target's entry.
    fn on_transition(&mut self, _scope: &Scope<S, F>, _from: &S, _to: &S) {}

    /// Choose one of the eligible targets by index. Defaults to the first
    /// in declaration order.
    fn select_transition(&mut self, _scope: &Scope<S, F>, _state: &S, _candidates: &[S]) -> usize {
        0
    }

    /// No transition out of `state` is eligible.
    ///
    /// Returning [`Signal::Continue`] concedes: the engine backtracks when
    /// backtracking is enabled and rejects otherwise. Any other signal is
    /// applied as if the state's activity had returned it.
    fn on_no_transition(&mut self, _scope: &Scope<S, F>, _state: &S) -> Signal {
        Signal::Continue
    }

    /// Fired once when the run accepts.
    fn on_accept(&mut self, _scope: &Scope<S, F>) {}

    /// Fired once when the run rejects.
    fn on_reject(&mut self, _scope: &Scope<S, F>, _rejection: &Rejection) {}

    /// A fresh frame is active and may be initialized. Also fired for the
    /// root frame at the start of every run.
    fn on_init_frame(&mut self, _scope: &mut Scope<S, F>) {}

    /// The active frame is about to be suspended by push state `state`.
    fn on_suspend(&mut self, _scope: &mut Scope<S, F>, _state: &S) {}

    /// The frame suspended by `state` is active again.
    fn on_resume(&mut self, _scope: &mut Scope<S, F>, _state: &S) {}

    /// An exhausted occurrence is being discarded; undo whatever entering it
    /// applied to the caller's data.
    fn on_backtrack(
        &mut self,
        _scope: &Scope<S, F>,
        _occurrence: &StateOccurrence<S>,
        _cause: BacktrackCause,
    ) {
    }

    /// Every occurrence has been discarded. Returning [`Signal::Accept`] or
    /// [`Signal::Reject`] overrides the default `Exhausted` rejection.
    fn on_exhausted(&mut self, _scope: &Scope<S, F>) -> Signal {
        Signal::Continue
    }
}

impl<S, F> Hooks<S, F> for () {}
