//! Builder for constructing state tables and machines.

use crate::builder::error::BuildError;
use crate::builder::state::StateBuilder;
use crate::config::EngineConfig;
use crate::core::{ModelError, StateDefinition, StateName, StateTable, Transition};
use crate::engine::{Hooks, Machine, Scope};

/// Builder for constructing machines with a fluent API.
///
/// Errors are collected while building and the first one is reported by
/// [`build`](Self::build) or [`build_table`](Self::build_table).
pub struct MachineBuilder<S, D, F = ()> {
    initial: Option<S>,
    states: Vec<StateDefinition<S, D, F>>,
    config: EngineConfig,
    error: Option<BuildError>,
}

impl<S: StateName, D> MachineBuilder<S, D> {
    /// Create a new builder for a machine without per-frame data.
    pub fn new() -> Self {
        Self::framed()
    }
}

impl<S: StateName, D> Default for MachineBuilder<S, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StateName, D, F> MachineBuilder<S, D, F> {
    /// Create a new builder for a machine whose frames carry `F`.
    pub fn framed() -> Self {
        Self {
            initial: None,
            states: Vec::new(),
            config: EngineConfig::default(),
            error: None,
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Declare a state.
    pub fn state(mut self, builder: StateBuilder<S, D, F>) -> Self {
        match builder.finish() {
            Ok(definition) if self.states.iter().any(|s| s.name == definition.name) => {
                self.fail(BuildError::DuplicateState {
                    state: definition.name.to_string(),
                });
            }
            Ok(definition) => self.states.push(definition),
            Err(err) => self.fail(err),
        }
        self
    }

    /// Declare a state with no activity and no transitions yet.
    pub fn add_state(self, name: S) -> Self {
        self.state(StateBuilder::new(name))
    }

    /// Add a tested transition to an already declared state.
    pub fn add_transition<P>(self, from: S, to: S, test: P) -> Self
    where
        P: Fn(&D, &Scope<S, F>, &S, &S) -> bool + Send + Sync + 'static,
    {
        self.insert(from, Transition::when(to, test))
    }

    /// Add a tested, labeled transition to an already declared state.
    pub fn add_labeled_transition<P>(self, from: S, to: S, test: P, label: impl Into<String>) -> Self
    where
        P: Fn(&D, &Scope<S, F>, &S, &S) -> bool + Send + Sync + 'static,
    {
        self.insert(from, Transition::when(to, test).with_label(label))
    }

    /// Add an unconditional transition to an already declared state.
    pub fn always(self, from: S, to: S) -> Self {
        self.insert(from, Transition::always(to))
    }

    pub fn backtracking(mut self) -> Self {
        self.config.backtracking = true;
        self
    }

    /// Enable backtracking, keeping only the latest `limit` occurrences.
    pub fn track_limit(mut self, limit: usize) -> Self {
        self.config.backtracking = true;
        self.config.track_limit = Some(limit);
        self
    }

    pub fn record_history(mut self) -> Self {
        self.config.record_history = true;
        self
    }

    /// Replace all engine knobs at once.
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the state table alone, e.g. to render or validate it.
    pub fn build_table(self) -> Result<StateTable<S, D, F>, BuildError> {
        self.into_parts().map(|(table, _)| table)
    }

    /// Build the machine around the caller's data.
    pub fn build(self, data: D) -> Result<Machine<S, D, F>, BuildError>
    where
        D: Hooks<S, F>,
        F: Default,
    {
        let (table, config) = self.into_parts()?;
        Ok(Machine::new(table, data, &config))
    }

    fn into_parts(self) -> Result<(StateTable<S, D, F>, EngineConfig), BuildError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        if !self.states.iter().any(|s| s.name == initial) {
            return Err(ModelError::UnknownState {
                state: initial.to_string(),
            }
            .into());
        }
        if self.config.track_limit == Some(0) {
            return Err(BuildError::InvalidTrackBound);
        }
        Ok((StateTable::new(initial, self.states), self.config))
    }

    fn insert(mut self, from: S, transition: Transition<S, D, F>) -> Self {
        match self.states.iter_mut().find(|s| s.name == from) {
            Some(definition) => definition.insert_transition(transition),
            None => self.fail(BuildError::UnknownSource {
                state: from.to_string(),
            }),
        }
        self
    }

    fn fail(&mut self, err: BuildError) {
        self.error.get_or_insert(err);
    }
}
