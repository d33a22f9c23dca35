//! State/transition model.
//!
//! This module contains the data the engine interprets:
//! - State names via the `StateName` trait
//! - State definitions, transitions, guards and activities
//! - The immutable state table and eligible-transition computation
//! - Signals and run outcomes
//! - Run history records

mod error;
mod guard;
mod history;
mod signal;
mod state;
mod table;
mod transition;

pub use error::ModelError;
pub use guard::{Activity, Guard, TransitionTest};
pub use history::{RunHistory, StepKind, StepRecord};
pub use signal::{Outcome, Rejection, Signal};
pub use state::{StateDefinition, StateName, StateRole};
pub use table::StateTable;
pub use transition::Transition;
