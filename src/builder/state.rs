//! Builder for a single state and its outgoing transitions.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::core::{Guard, Signal, StateDefinition, StateName, StateRole, Transition};
use crate::engine::Scope;

/// Fluent construction of a [`StateDefinition`].
///
/// # Example
///
/// ```
/// use cogwork::builder::StateBuilder;
/// use cogwork::core::Signal;
///
/// let state: StateBuilder<&str, usize> = StateBuilder::new("count")
///     .activity(|n: &mut usize, _scope| {
///         *n += 1;
///         Signal::Continue
///     })
///     .when("done", |n, _, _, _| *n >= 3)
///     .to("count");
/// ```
pub struct StateBuilder<S, D, F = ()> {
    definition: StateDefinition<S, D, F>,
    role_conflict: bool,
}

impl<S: StateName, D, F> StateBuilder<S, D, F> {
    pub fn new(name: S) -> Self {
        Self {
            definition: StateDefinition::new(name),
            role_conflict: false,
        }
    }

    /// Procedure run each time the state is active.
    pub fn activity<A>(mut self, activity: A) -> Self
    where
        A: Fn(&mut D, &mut Scope<S, F>) -> Signal + Send + Sync + 'static,
    {
        self.definition.activity = Some(Box::new(activity));
        self
    }

    /// Entry guard evaluated whenever a transition targets this state.
    pub fn guard<P>(mut self, guard: P) -> Self
    where
        P: Fn(&D, &Scope<S, F>) -> bool + Send + Sync + 'static,
    {
        self.definition.guard = Some(Guard::new(guard));
        self
    }

    pub fn accepting(mut self) -> Self {
        self.definition.accepting = true;
        self
    }

    /// Make this a push state resuming at `resume` after the matching pop.
    pub fn push(mut self, resume: S) -> Self {
        self.role_conflict |= self.definition.role.is_pop();
        self.definition.role = StateRole::Push { resume };
        self
    }

    /// Make this a pop state.
    pub fn pop(mut self) -> Self {
        self.role_conflict |= self.definition.role.is_push();
        self.definition.role = StateRole::Pop;
        self
    }

    /// Attach a free-form attribute, e.g. the symbol a state consumes.
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.definition
            .attributes
            .insert(key.into(), value.into());
        self
    }

    /// Unconditional transition to `target`.
    pub fn to(mut self, target: S) -> Self {
        self.definition
            .insert_transition(Transition::always(target));
        self
    }

    /// Transition to `target` gated by `test`.
    pub fn when<P>(mut self, target: S, test: P) -> Self
    where
        P: Fn(&D, &Scope<S, F>, &S, &S) -> bool + Send + Sync + 'static,
    {
        self.definition
            .insert_transition(Transition::when(target, test));
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder<S, D, F>) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        self.definition.insert_transition(transition);
        Ok(self)
    }

    pub fn name(&self) -> &S {
        self.definition.name()
    }

    pub(crate) fn finish(self) -> Result<StateDefinition<S, D, F>, BuildError> {
        if self.role_conflict {
            return Err(BuildError::RoleConflict {
                state: self.definition.name.to_string(),
            });
        }
        Ok(self.definition)
    }
}
