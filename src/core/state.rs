//! State names and state definitions.
//!
//! A state is identified by its name. The name type is chosen by the caller
//! (a string, an enum, a board coordinate...) and only needs to be hashable,
//! comparable and printable. Everything else about a state lives in its
//! [`StateDefinition`], which is created once by the builder and never
//! mutated while a run is in progress.

use super::guard::{Activity, Guard};
use super::transition::Transition;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait for state names.
///
/// Implemented automatically for every type with the required bounds.
///
/// # Required Traits
///
/// - `Clone` + `Eq` + `Hash`: names key the state table
/// - `Debug` + `Display`: names appear in diagnostics and diagrams
/// - `Serialize`: names appear in run history and snapshots
///
/// # Example
///
/// ```rust
/// use cogwork::core::StateName;
///
/// fn describe<S: StateName>(name: &S) -> String {
///     format!("state {}", name)
/// }
///
/// assert_eq!(describe(&"scan"), "state scan");
/// assert_eq!(describe(&42u32), "state 42");
/// ```
pub trait StateName: Clone + Eq + Hash + Debug + Display + Serialize {}

impl<T> StateName for T where T: Clone + Eq + Hash + Debug + Display + Serialize {}

/// Role a state plays for the pushdown extension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StateRole<S> {
    /// Ordinary state.
    Plain,
    /// Entering suspends the active frame and opens a new one. The matching
    /// pop later resumes at `resume`.
    Push { resume: S },
    /// After its activity, unwinds one frame instead of evaluating transitions.
    Pop,
}

impl<S> StateRole<S> {
    pub fn is_push(&self) -> bool {
        matches!(self, Self::Push { .. })
    }

    pub fn is_pop(&self) -> bool {
        matches!(self, Self::Pop)
    }
}

/// Everything the engine knows about one state.
///
/// `F` is the caller's per-frame data and `D` the caller's automaton data;
/// both only appear in the signatures of the stored callbacks.
pub struct StateDefinition<S, D, F> {
    pub(crate) name: S,
    pub(crate) activity: Option<Activity<S, D, F>>,
    pub(crate) guard: Option<Guard<S, D, F>>,
    pub(crate) transitions: Vec<Transition<S, D, F>>,
    pub(crate) accepting: bool,
    pub(crate) role: StateRole<S>,
    pub(crate) attributes: BTreeMap<String, serde_json::Value>,
}

impl<S: StateName, D, F> StateDefinition<S, D, F> {
    pub(crate) fn new(name: S) -> Self {
        Self {
            name,
            activity: None,
            guard: None,
            transitions: Vec::new(),
            accepting: false,
            role: StateRole::Plain,
            attributes: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &S {
        &self.name
    }

    /// Informational flag; used by diagrams, never by the run loop.
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    pub fn role(&self) -> &StateRole<S> {
        &self.role
    }

    /// Outgoing transitions in declaration order.
    pub fn transitions(&self) -> &[Transition<S, D, F>] {
        &self.transitions
    }

    pub fn attributes(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&serde_json::Value> {
        self.attributes.get(key)
    }

    pub fn has_activity(&self) -> bool {
        self.activity.is_some()
    }

    /// Insert a transition, replacing the test of an existing transition to
    /// the same target while keeping its position.
    pub(crate) fn insert_transition(&mut self, transition: Transition<S, D, F>) {
        match self
            .transitions
            .iter_mut()
            .find(|t| t.target == transition.target)
        {
            Some(existing) => *existing = transition,
            None => self.transitions.push(transition),
        }
    }
}

impl<S: Debug, D, F> Debug for StateDefinition<S, D, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateDefinition")
            .field("name", &self.name)
            .field("accepting", &self.accepting)
            .field("role", &self.role)
            .field("transitions", &self.transitions.len())
            .field("attributes", &self.attributes)
            .finish()
    }
}
