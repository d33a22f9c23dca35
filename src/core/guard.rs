//! Callbacks supplied by grammars: activities, guards and transition tests.
//!
//! Guards gate *entry* into a state; transition tests gate *eligibility* of an
//! edge while its source is active. A transition is only a candidate when
//! both pass.

use super::signal::Signal;
use crate::engine::Scope;

/// Procedure executed each time a state is active.
pub type Activity<S, D, F> = Box<dyn Fn(&mut D, &mut Scope<S, F>) -> Signal + Send + Sync>;

type GuardFn<S, D, F> = Box<dyn Fn(&D, &Scope<S, F>) -> bool + Send + Sync>;

type TestFn<S, D, F> = Box<dyn Fn(&D, &Scope<S, F>, &S, &S) -> bool + Send + Sync>;

/// Entry-admissibility predicate, evaluated against the *target* state.
///
/// Guards must be free of side effects on engine state. They may read the
/// caller's data and the active frames.
///
/// # Example
///
/// ```rust
/// use cogwork::core::Guard;
/// use cogwork::engine::Scope;
///
/// let guard: Guard<&str, usize, ()> = Guard::new(|budget: &usize, _scope| *budget > 0);
/// let scope = Scope::new("start", ());
///
/// assert!(guard.check(&3, &scope));
/// assert!(!guard.check(&0, &scope));
/// ```
pub struct Guard<S, D, F> {
    predicate: GuardFn<S, D, F>,
}

impl<S, D, F> Guard<S, D, F> {
    pub fn new<P>(predicate: P) -> Self
    where
        P: Fn(&D, &Scope<S, F>) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Check whether the guarded state may be entered.
    pub fn check(&self, data: &D, scope: &Scope<S, F>) -> bool {
        (self.predicate)(data, scope)
    }
}

/// Eligibility predicate `(data, scope, source, target) -> bool` of a
/// transition, evaluated only while the source state is active.
///
/// The target is passed as data, so one test function can serve many
/// transitions that differ only by target.
pub struct TransitionTest<S, D, F> {
    predicate: TestFn<S, D, F>,
}

impl<S, D, F> TransitionTest<S, D, F> {
    pub fn new<P>(predicate: P) -> Self
    where
        P: Fn(&D, &Scope<S, F>, &S, &S) -> bool + Send + Sync + 'static,
    {
        TransitionTest {
            predicate: Box::new(predicate),
        }
    }

    pub fn check(&self, data: &D, scope: &Scope<S, F>, from: &S, to: &S) -> bool {
        (self.predicate)(data, scope, from, to)
    }
}
