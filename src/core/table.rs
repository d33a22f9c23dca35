//! The state table: name -> definition, built once and immutable afterwards.

use super::error::ModelError;
use super::state::{StateDefinition, StateName, StateRole};
use crate::engine::Scope;
use crate::graph::{Graph, GraphProtocol};
use std::collections::HashMap;
use std::fmt;

/// Immutable mapping from state names to their definitions.
///
/// Built by [`MachineBuilder`](crate::builder::MachineBuilder). Declaration
/// order of states is remembered for diagrams and validation reports.
pub struct StateTable<S, D, F> {
    initial: S,
    states: HashMap<S, StateDefinition<S, D, F>>,
    order: Vec<S>,
}

impl<S: StateName, D, F> StateTable<S, D, F> {
    pub(crate) fn new(initial: S, definitions: Vec<StateDefinition<S, D, F>>) -> Self {
        let order = definitions.iter().map(|d| d.name.clone()).collect();
        let states = definitions
            .into_iter()
            .map(|d| (d.name.clone(), d))
            .collect();
        Self {
            initial,
            states,
            order,
        }
    }

    pub fn initial(&self) -> &S {
        &self.initial
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, name: &S) -> bool {
        self.states.contains_key(name)
    }

    pub fn get(&self, name: &S) -> Option<&StateDefinition<S, D, F>> {
        self.states.get(name)
    }

    /// Look up a state, failing with [`ModelError::UnknownState`].
    pub fn require(&self, name: &S) -> Result<&StateDefinition<S, D, F>, ModelError> {
        self.states.get(name).ok_or_else(|| ModelError::UnknownState {
            state: name.to_string(),
        })
    }

    /// Definitions in declaration order.
    pub fn states(&self) -> impl Iterator<Item = &StateDefinition<S, D, F>> {
        self.order.iter().filter_map(|name| self.states.get(name))
    }

    /// Ordered targets of the transitions out of `from` whose test passes and
    /// whose target's guard admits entry.
    ///
    /// Targets are resolved only for transitions whose test passed, so a
    /// dangling target is reported when it is first attempted.
    pub fn eligible_transitions(
        &self,
        data: &D,
        scope: &Scope<S, F>,
        from: &S,
    ) -> Result<Vec<S>, ModelError> {
        let source = self.require(from)?;
        let mut eligible = Vec::new();
        for transition in &source.transitions {
            if !transition.is_eligible(data, scope, from) {
                continue;
            }
            let target = self.require(&transition.target)?;
            if target.guard.as_ref().map_or(true, |g| g.check(data, scope)) {
                eligible.push(transition.target.clone());
            }
        }
        Ok(eligible)
    }

    /// Control graph of the table: one vertex per state, one edge per
    /// declared transition plus push -> resume edges. Dangling targets are
    /// left out.
    pub fn to_graph(&self) -> Graph<S> {
        let mut graph = Graph::new();
        for name in &self.order {
            graph.add(name.clone());
        }
        for def in self.states() {
            let resume = match &def.role {
                StateRole::Push { resume } => Some(resume),
                _ => None,
            };
            let targets = def.transitions.iter().map(|t| &t.target).chain(resume);
            for target in targets {
                // Both endpoints were added above when the target is known.
                let _ = graph.connect(&def.name, target);
            }
        }
        graph
    }
}

impl<S: StateName, D, F> fmt::Debug for StateTable<S, D, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateTable")
            .field("initial", &self.initial)
            .field("states", &self.order)
            .finish()
    }
}
