//! Snapshots of a machine's engine state.
//!
//! A [`Snapshot`] captures the bookkeeping the engine owns: where the run
//! is, which push states have suspended frames, the occurrence track, the
//! step history and the last outcome. Callbacks and caller data are not
//! serializable and are not included.

use crate::backtrack::Track;
use crate::core::{Outcome, RunHistory, StateName};
use crate::engine::{Hooks, Machine};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable picture of a machine's engine state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot<S> {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: String,

    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,

    pub initial_state: S,

    pub current_state: S,

    /// Push states of the suspended frames, oldest first
    pub suspended: Vec<S>,

    /// Occurrence track when backtracking is enabled
    pub track: Option<Track<S>>,

    pub history: RunHistory<S>,

    /// Outcome of the last completed run
    pub outcome: Option<Outcome>,
}

impl<S: StateName> Snapshot<S> {
    pub fn capture<D, F>(machine: &Machine<S, D, F>) -> Self
    where
        D: Hooks<S, F>,
        F: Default,
    {
        Self {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            initial_state: machine.table().initial().clone(),
            current_state: machine.current_state().clone(),
            suspended: machine
                .scope()
                .frames()
                .suspended()
                .iter()
                .filter_map(|frame| frame.pushed_by().cloned())
                .collect(),
            track: machine.track().cloned(),
            history: machine.history().clone(),
            outcome: machine.outcome().cloned(),
        }
    }

    /// Number of frames that were suspended.
    pub fn depth(&self) -> usize {
        self.suspended.len()
    }
}

impl<S: Serialize + DeserializeOwned> Snapshot<S> {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.verify()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let snapshot: Self = bincode::deserialize(bytes)?;
        snapshot.verify()
    }

    fn verify(self) -> Result<Self, CheckpointError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        if Uuid::parse_str(&self.id).is_err() {
            return Err(CheckpointError::InvalidId { id: self.id });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{MachineBuilder, StateBuilder};
    use crate::core::{Signal, StepKind};

    fn machine() -> Machine<String, ()> {
        MachineBuilder::new()
            .initial("start".to_string())
            .state(
                StateBuilder::new("start".to_string())
                    .to("dead".to_string())
                    .to("done".to_string()),
            )
            .add_state("dead".to_string())
            .state(StateBuilder::new("done".to_string()).activity(|_, _| Signal::Accept))
            .backtracking()
            .record_history()
            .build(())
            .unwrap()
    }

    #[test]
    fn snapshot_captures_run() {
        let mut machine = machine();
        machine.run().unwrap();
        let snapshot = machine.snapshot();

        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert_eq!(snapshot.initial_state, "start");
        assert_eq!(snapshot.current_state, "done");
        assert_eq!(snapshot.depth(), 0);
        assert_eq!(snapshot.outcome, Some(Outcome::Accepted));
        assert_eq!(snapshot.history.count(StepKind::Backtrack), 1);
        assert_eq!(snapshot.track.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let mut machine = machine();
        machine.run().unwrap();
        let snapshot = machine.snapshot();

        let json = snapshot.to_json().unwrap();
        let restored: Snapshot<String> = Snapshot::from_json(&json).unwrap();

        assert_eq!(restored.id, snapshot.id);
        assert_eq!(restored.current_state, snapshot.current_state);
        assert_eq!(restored.history.len(), snapshot.history.len());
        assert_eq!(restored.outcome, snapshot.outcome);
    }

    #[test]
    fn snapshot_round_trips_through_bincode() {
        let mut machine = machine();
        machine.run().unwrap();
        let snapshot = machine.snapshot();

        let bytes = snapshot.to_bytes().unwrap();
        let restored: Snapshot<String> = Snapshot::from_bytes(&bytes).unwrap();

        assert_eq!(restored.id, snapshot.id);
        assert_eq!(
            restored.track.unwrap().to_string(),
            snapshot.track.unwrap().to_string()
        );
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let mut snapshot = machine().snapshot();
        snapshot.version = 99;
        let json = snapshot.to_json().unwrap();

        let result = Snapshot::<String>::from_json(&json);
        assert!(matches!(
            result,
            Err(CheckpointError::UnsupportedVersion {
                found: 99,
                supported: SNAPSHOT_VERSION
            })
        ));
    }

    #[test]
    fn malformed_input_is_a_json_error() {
        let result = Snapshot::<String>::from_json("{ not json");
        assert!(matches!(result, Err(CheckpointError::Json(_))));
    }

    #[test]
    fn id_must_be_a_uuid() {
        let mut snapshot = machine().snapshot();
        snapshot.id = "checkpoint-1".to_string();
        let bytes = snapshot.to_bytes().unwrap();

        match Snapshot::<String>::from_bytes(&bytes) {
            Err(CheckpointError::InvalidId { id }) => assert_eq!(id, "checkpoint-1"),
            other => panic!("Expected invalid id, got {other:?}"),
        }
    }
}
