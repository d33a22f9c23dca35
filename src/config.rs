//! Engine configuration.
//!
//! Every knob is off by default: a plain finite automaton with no
//! occurrence tracking and no history.
//!
//! # Example
//!
//! ```rust
//! use cogwork::config::EngineConfig;
//!
//! let config = EngineConfig::from_json(r#"{ "backtracking": true, "track_limit": 64 }"#).unwrap();
//! assert!(config.backtracking);
//! assert_eq!(config.track_limit, Some(64));
//! assert!(!config.record_history);
//! ```

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Track state occurrences so the run can backtrack.
    pub backtracking: bool,
    /// Keep at most this many occurrences. `None` is unbounded. A limit
    /// implies backtracking.
    pub track_limit: Option<usize>,
    /// Record every step in the run history.
    pub record_history: bool,
}

impl EngineConfig {
    /// Parse a config from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Whether runs track occurrences, either requested directly or implied
    /// by a track limit.
    pub fn tracks_occurrences(&self) -> bool {
        self.backtracking || self.track_limit.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_is_default() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert!(!config.backtracking);
        assert!(config.track_limit.is_none());
    }

    #[test]
    fn config_round_trips() {
        let config = EngineConfig {
            backtracking: true,
            track_limit: Some(8),
            record_history: true,
        };
        let json = config.to_json().unwrap();
        assert_eq!(EngineConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn track_limit_implies_backtracking() {
        let config = EngineConfig::from_json(r#"{ "track_limit": 4 }"#).unwrap();
        assert!(!config.backtracking);
        assert!(config.tracks_occurrences());
        assert!(!EngineConfig::default().tracks_occurrences());
    }

    #[test]
    fn unknown_types_fail() {
        assert!(EngineConfig::from_json(r#"{ "backtracking": "yes" }"#).is_err());
    }
}
