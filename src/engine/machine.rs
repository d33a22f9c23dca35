//! The run loop.
//!
//! A [`Machine`] owns an immutable [`StateTable`], the caller's data and the
//! engine's own bookkeeping (scope, occurrence track, history). Runs are
//! iterative: nesting through push states and backtracking both happen in
//! engine-owned structures, never on the Rust call stack.

use super::error::EngineError;
use super::hooks::Hooks;
use super::scope::Scope;
use crate::backtrack::{BacktrackCause, StateOccurrence, Track};
use crate::checkpoint::Snapshot;
use crate::config::EngineConfig;
use crate::core::{
    Outcome, Rejection, RunHistory, Signal, StateName, StateRole, StateTable, StepKind, StepRecord,
};
use chrono::Utc;
use tracing::{debug, trace};

enum Flow {
    Continue,
    Finish(Outcome),
}

/// An automaton ready to run.
///
/// `S` names states, `D` is the caller's automaton data (which also supplies
/// the lifecycle [`Hooks`]) and `F` the per-frame data of the pushdown
/// extension.
pub struct Machine<S, D, F = ()> {
    table: StateTable<S, D, F>,
    data: D,
    scope: Scope<S, F>,
    track: Option<Track<S>>,
    history: RunHistory<S>,
    record_history: bool,
    inside: bool,
    outcome: Option<Outcome>,
}

impl<S, D, F> Machine<S, D, F>
where
    S: StateName,
    D: Hooks<S, F>,
    F: Default,
{
    pub(crate) fn new(table: StateTable<S, D, F>, data: D, config: &EngineConfig) -> Self {
        let track = config.tracks_occurrences().then(|| match config.track_limit {
            Some(limit) => Track::bounded(limit),
            None => Track::new(),
        });
        let scope = Scope::new(table.initial().clone(), F::default());
        Self {
            table,
            data,
            scope,
            track,
            history: RunHistory::new(),
            record_history: config.record_history,
            inside: false,
            outcome: None,
        }
    }

    /// Run from the initial state until the automaton accepts or rejects.
    ///
    /// Engine state is reset first, so a machine may be run repeatedly.
    /// Caller data is left as it is.
    pub fn run(&mut self) -> Result<Outcome, EngineError> {
        self.reset();
        let initial = self.table.initial().clone();
        debug!(initial = %initial, backtracking = self.track.is_some(), "run started");

        self.enter(initial)?;
        loop {
            if let Flow::Finish(outcome) = self.step()? {
                return Ok(self.finish(outcome));
            }
        }
    }

    pub fn current_state(&self) -> &S {
        self.scope.current()
    }

    pub fn data(&self) -> &D {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut D {
        &mut self.data
    }

    pub fn into_data(self) -> D {
        self.data
    }

    pub fn table(&self) -> &StateTable<S, D, F> {
        &self.table
    }

    pub fn scope(&self) -> &Scope<S, F> {
        &self.scope
    }

    /// Occurrence track, `None` unless backtracking is enabled.
    pub fn track(&self) -> Option<&Track<S>> {
        self.track.as_ref()
    }

    pub fn is_backtracking(&self) -> bool {
        self.track.is_some()
    }

    pub fn history(&self) -> &RunHistory<S> {
        &self.history
    }

    /// Outcome of the last completed run.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Capture the engine's bookkeeping for inspection or persistence.
    pub fn snapshot(&self) -> Snapshot<S> {
        Snapshot::capture(self)
    }

    fn reset(&mut self) {
        self.scope.set_current(self.table.initial().clone());
        self.scope.frames_mut().reset(F::default());
        if let Some(track) = self.track.as_mut() {
            track.clear();
        }
        self.history.clear();
        self.inside = false;
        self.outcome = None;
        self.data.on_init_frame(&mut self.scope);
    }

    fn step(&mut self) -> Result<Flow, EngineError> {
        let state = self.scope.current().clone();
        let definition = self.table.require(&state)?;
        let is_pop = definition.role.is_pop();
        let signal = match &definition.activity {
            Some(activity) => activity(&mut self.data, &mut self.scope),
            None => Signal::Continue,
        };
        if !signal.is_continue() {
            return self.apply(signal, state);
        }

        if is_pop {
            return self.pop(state);
        }

        let candidates = self
            .table
            .eligible_transitions(&self.data, &self.scope, &state)?;
        if candidates.is_empty() {
            return self.dead_end(state);
        }

        self.exit();
        let target = self.select(&state, candidates)?;
        self.move_to(StepKind::Transition, state, target)?;
        Ok(Flow::Continue)
    }

    /// Apply a non-`Continue` signal raised in `state`.
    fn apply(&mut self, signal: Signal, state: S) -> Result<Flow, EngineError> {
        match signal {
            Signal::Continue => Ok(Flow::Continue),
            Signal::Accept => Ok(Flow::Finish(Outcome::Accepted)),
            Signal::Reject(reason) => Ok(Flow::Finish(Outcome::Rejected(Rejection::Grammar(
                reason,
            )))),
            Signal::Backtrack => self.backtrack(BacktrackCause::Requested, state),
        }
    }

    fn dead_end(&mut self, state: S) -> Result<Flow, EngineError> {
        match self.data.on_no_transition(&self.scope, &state) {
            Signal::Continue if self.track.is_some() => {
                self.backtrack(BacktrackCause::DeadEnd, state)
            }
            Signal::Continue => Ok(Flow::Finish(Outcome::Rejected(Rejection::NoTransition {
                state: state.to_string(),
            }))),
            Signal::Backtrack => self.backtrack(BacktrackCause::DeadEnd, state),
            signal => self.apply(signal, state),
        }
    }

    fn enter(&mut self, state: S) -> Result<(), EngineError> {
        let role = self.table.require(&state)?.role.clone();
        self.scope.set_current(state.clone());
        self.inside = true;
        if let Some(track) = self.track.as_mut() {
            track.push(StateOccurrence::new(state.clone()));
        }

        trace!(state = %state, depth = self.scope.depth(), "enter");
        self.data.on_enter_state(&self.scope, &state);

        if let StateRole::Push { resume } = role {
            self.push(state, resume);
        }
        Ok(())
    }

    fn exit(&mut self) {
        if !self.inside {
            return;
        }
        self.inside = false;
        let state = self.scope.current().clone();
        trace!(state = %state, depth = self.scope.depth(), "exit");
        self.data.on_exit_state(&self.scope, &state);
    }

    fn push(&mut self, state: S, resume: S) {
        self.data.on_suspend(&mut self.scope, &state);
        self.scope
            .frames_mut()
            .suspend(state.clone(), resume.clone(), F::default());
        self.data.on_init_frame(&mut self.scope);
        debug!(state = %state, resume = %resume, depth = self.scope.depth(), "push");
        self.record(StepKind::Push, state.clone(), state);
    }

    fn pop(&mut self, state: S) -> Result<Flow, EngineError> {
        if self.scope.stack_empty() {
            return Err(EngineError::EmptyStack {
                state: state.to_string(),
            });
        }
        self.exit();
        let resumption =
            self.scope
                .frames_mut()
                .restore()
                .ok_or_else(|| EngineError::EmptyStack {
                    state: state.to_string(),
                })?;
        debug!(
            state = %state,
            pushed_by = %resumption.pushed_by,
            resume = %resumption.resume,
            depth = self.scope.depth(),
            "pop"
        );
        self.data.on_resume(&mut self.scope, &resumption.pushed_by);
        self.move_to(StepKind::Pop, state, resumption.resume)?;
        Ok(Flow::Continue)
    }

    /// Let the caller pick among `candidates` and, when backtracking, record
    /// the rest as untried on the latest occurrence.
    fn select(&mut self, state: &S, candidates: Vec<S>) -> Result<S, EngineError> {
        let index = self
            .data
            .select_transition(&self.scope, state, &candidates);
        let target = candidates
            .get(index)
            .cloned()
            .ok_or_else(|| EngineError::InvalidSelection {
                state: state.to_string(),
                index,
                candidates: candidates.len(),
            })?;
        if let Some(occurrence) = self.track.as_mut().and_then(Track::last_mut) {
            occurrence.set_remaining(candidates);
            occurrence.take(&target);
        }
        Ok(target)
    }

    fn move_to(&mut self, kind: StepKind, from: S, to: S) -> Result<(), EngineError> {
        self.data.on_transition(&self.scope, &from, &to);
        debug!(kind = ?kind, from = %from, to = %to, depth = self.scope.depth(), "transition");
        self.record(kind, from, to.clone());
        self.enter(to)
    }

    /// Undo to the most recent occurrence with an untried transition and
    /// take the next one in declaration order.
    fn backtrack(&mut self, cause: BacktrackCause, state: S) -> Result<Flow, EngineError> {
        if self.track.is_none() {
            return Ok(Flow::Finish(Outcome::Rejected(
                Rejection::BacktrackUnsupported {
                    state: state.to_string(),
                },
            )));
        }
        self.exit();
        debug!(state = %state, cause = ?cause, depth = self.scope.depth(), "backtrack");

        while let Some(track) = self.track.as_mut() {
            let Some(latest) = track.last() else {
                break;
            };
            if !latest.is_exhausted() {
                let from = latest.state().clone();
                let untried = latest.remaining().to_vec();
                self.scope.set_current(from.clone());
                let target = self.select(&from, untried)?;
                self.move_to(StepKind::Backtrack, from, target)?;
                return Ok(Flow::Continue);
            }
            let Some(discarded) = track.pop() else {
                break;
            };
            self.scope.set_current(discarded.state().clone());
            debug!(state = %discarded.state(), depth = self.scope.depth(), "discard occurrence");
            self.data.on_backtrack(&self.scope, &discarded, cause);
        }

        debug!("backtracking exhausted");
        let outcome = match self.data.on_exhausted(&self.scope) {
            Signal::Accept => Outcome::Accepted,
            Signal::Reject(reason) => Outcome::Rejected(Rejection::Grammar(reason)),
            Signal::Continue | Signal::Backtrack => Outcome::Rejected(Rejection::Exhausted),
        };
        Ok(Flow::Finish(outcome))
    }

    fn finish(&mut self, outcome: Outcome) -> Outcome {
        let outcome = match (outcome, self.scope.top_frame()) {
            (Outcome::Accepted, Some(top)) => Outcome::Rejected(Rejection::UnclosedFrames {
                opener: top.pushed_by().map(ToString::to_string).unwrap_or_default(),
                depth: self.scope.depth(),
            }),
            (outcome, _) => outcome,
        };

        self.exit();
        match &outcome {
            Outcome::Accepted => self.data.on_accept(&self.scope),
            Outcome::Rejected(rejection) => self.data.on_reject(&self.scope, rejection),
        }
        debug!(outcome = ?outcome, state = %self.scope.current(), "run finished");
        self.outcome = Some(outcome.clone());
        outcome
    }

    fn record(&mut self, kind: StepKind, from: S, to: S) {
        if self.record_history {
            self.history.record(StepRecord {
                kind,
                from,
                to,
                depth: self.scope.depth(),
                timestamp: Utc::now(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{MachineBuilder, StateBuilder};

    #[derive(Default)]
    struct Log {
        events: Vec<String>,
    }

    impl Hooks<&'static str> for Log {
        fn on_enter_state(&mut self, _scope: &Scope<&'static str, ()>, state: &&'static str) {
            self.events.push(format!("enter {state}"));
        }

        fn on_exit_state(&mut self, _scope: &Scope<&'static str, ()>, state: &&'static str) {
            self.events.push(format!("exit {state}"));
        }

        fn on_transition(
            &mut self,
            _scope: &Scope<&'static str, ()>,
            from: &&'static str,
            to: &&'static str,
        ) {
            self.events.push(format!("{from}->{to}"));
        }

        fn on_accept(&mut self, _scope: &Scope<&'static str, ()>) {
            self.events.push("accept".to_string());
        }

        fn on_reject(&mut self, _scope: &Scope<&'static str, ()>, rejection: &Rejection) {
            self.events.push(format!("reject: {rejection}"));
        }
    }

    #[test]
    fn hooks_fire_in_order() {
        let mut machine = MachineBuilder::new()
            .initial("a")
            .state(StateBuilder::new("a").to("b"))
            .state(StateBuilder::new("b").activity(|_: &mut Log, _| Signal::Accept))
            .build(Log::default())
            .unwrap();

        assert_eq!(machine.run().unwrap(), Outcome::Accepted);
        assert_eq!(
            machine.data().events,
            vec!["enter a", "exit a", "a->b", "enter b", "exit b", "accept"]
        );
    }

    #[test]
    fn dead_end_without_backtracking_rejects() {
        let mut machine = MachineBuilder::new()
            .initial("a")
            .add_state("a")
            .build(Log::default())
            .unwrap();

        let outcome = machine.run().unwrap();
        assert_eq!(
            outcome,
            Outcome::Rejected(Rejection::NoTransition {
                state: "a".to_string()
            })
        );
        assert_eq!(
            machine.data().events.last().unwrap(),
            "reject: Cannot transition from state a"
        );
    }

    #[test]
    fn backtrack_signal_without_tracking_is_unsupported() {
        let mut machine = MachineBuilder::new()
            .initial("a")
            .state(StateBuilder::new("a").activity(|_: &mut (), _| Signal::Backtrack))
            .build(())
            .unwrap();

        assert_eq!(
            machine.run().unwrap(),
            Outcome::Rejected(Rejection::BacktrackUnsupported {
                state: "a".to_string()
            })
        );
    }

    #[test]
    fn pop_on_empty_stack_is_an_error() {
        let mut machine = MachineBuilder::new()
            .initial("close")
            .state(StateBuilder::new("close").pop())
            .build(Log::default())
            .unwrap();

        assert_eq!(
            machine.run(),
            Err(EngineError::EmptyStack {
                state: "close".to_string()
            })
        );
        assert!(!machine.data().events.iter().any(|e| e.starts_with("reject")));
        assert!(machine.outcome().is_none());
    }

    #[test]
    fn out_of_range_selection_is_an_error() {
        struct Greedy;
        impl Hooks<&'static str> for Greedy {
            fn select_transition(
                &mut self,
                _scope: &Scope<&'static str, ()>,
                _state: &&'static str,
                candidates: &[&'static str],
            ) -> usize {
                candidates.len()
            }
        }

        let mut machine = MachineBuilder::new()
            .initial("a")
            .state(StateBuilder::new("a").to("b"))
            .add_state("b")
            .build(Greedy)
            .unwrap();

        assert!(matches!(
            machine.run(),
            Err(EngineError::InvalidSelection {
                index: 1,
                candidates: 1,
                ..
            })
        ));
    }

    #[test]
    fn dangling_target_surfaces_as_model_error() {
        let mut machine = MachineBuilder::new()
            .initial("a")
            .state(StateBuilder::new("a").to("ghost"))
            .build(())
            .unwrap();

        assert!(matches!(machine.run(), Err(EngineError::Model(_))));
    }

    #[test]
    fn push_then_pop_resumes() {
        let mut machine = MachineBuilder::new()
            .initial("open")
            .state(StateBuilder::new("open").push("done").to("close"))
            .state(StateBuilder::new("close").pop())
            .state(StateBuilder::new("done").activity(|_: &mut (), scope| {
                if scope.stack_empty() {
                    Signal::Accept
                } else {
                    Signal::reject("still nested")
                }
            }))
            .record_history()
            .build(())
            .unwrap();

        assert_eq!(machine.run().unwrap(), Outcome::Accepted);
        let kinds: Vec<_> = machine.history().steps().iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![StepKind::Push, StepKind::Transition, StepKind::Pop]
        );
        assert_eq!(machine.history().path(), vec![&"open", &"close", &"done"]);
    }

    #[test]
    fn accept_with_open_frames_is_rejected() {
        let mut machine = MachineBuilder::new()
            .initial("open")
            .state(
                StateBuilder::new("open")
                    .push("open")
                    .activity(|_: &mut (), _| Signal::Accept),
            )
            .build(())
            .unwrap();

        assert_eq!(
            machine.run().unwrap(),
            Outcome::Rejected(Rejection::UnclosedFrames {
                opener: "open".to_string(),
                depth: 1
            })
        );
    }

    #[test]
    fn backtracking_replays_untried_transition() {
        let mut machine = MachineBuilder::new()
            .initial("start")
            .state(StateBuilder::new("start").to("left").to("right"))
            .add_state("left")
            .state(StateBuilder::new("right").activity(|_: &mut (), _| Signal::Accept))
            .backtracking()
            .record_history()
            .build(())
            .unwrap();

        assert_eq!(machine.run().unwrap(), Outcome::Accepted);
        assert_eq!(
            machine.history().path(),
            vec![&"start", &"left", &"right"]
        );
        assert_eq!(machine.history().count(StepKind::Backtrack), 1);
        assert_eq!(machine.track().unwrap().to_string(), "start -(1)-> right");
    }

    #[test]
    fn track_limit_in_config_enables_backtracking() {
        let mut machine = MachineBuilder::new()
            .initial("start")
            .state(StateBuilder::new("start").to("left").to("right"))
            .add_state("left")
            .state(StateBuilder::new("right").activity(|_: &mut (), _| Signal::Accept))
            .config(EngineConfig {
                backtracking: false,
                track_limit: Some(4),
                record_history: false,
            })
            .build(())
            .unwrap();

        assert!(machine.is_backtracking());
        assert_eq!(machine.track().unwrap().limit(), Some(4));
        assert_eq!(machine.run().unwrap(), Outcome::Accepted);
    }

    #[test]
    fn run_resets_engine_state() {
        let mut machine = MachineBuilder::new()
            .initial("a")
            .state(StateBuilder::new("a").to("b"))
            .state(StateBuilder::new("b").activity(|_: &mut (), _| Signal::Accept))
            .backtracking()
            .record_history()
            .build(())
            .unwrap();

        let first = machine.run().unwrap();
        let first_len = machine.history().len();
        let second = machine.run().unwrap();

        assert_eq!(first, second);
        assert_eq!(machine.history().len(), first_len);
        assert_eq!(machine.track().unwrap().len(), 2);
        assert_eq!(machine.current_state(), &"b");
    }
}
