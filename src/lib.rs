//! Cogwork: a hierarchical, backtracking automaton engine
//!
//! Grammars supply a table of named states, each with an activity, an entry
//! guard and ordered, tested transitions. The engine interprets the table
//! one state at a time; optional extensions add nested execution frames
//! (push and pop states) and chronological backtracking over the states
//! entered so far.
//!
//! # Core Concepts
//!
//! - **State table**: immutable states and transitions built with [`builder`]
//! - **Scope**: current state and frame stack, handed to every callback
//! - **Hooks**: lifecycle notifications implemented by the caller's data
//! - **Signals**: activities return `Continue`, `Accept`, `Reject` or `Backtrack`
//! - **Outcome**: a run ends `Accepted` or `Rejected` with a typed reason
//!
//! # Example
//!
//! ```rust
//! use cogwork::builder::{MachineBuilder, StateBuilder};
//! use cogwork::core::{Outcome, Signal};
//! use cogwork::engine::{Hooks, Scope};
//! use cogwork::tape::InputTape;
//!
//! // Accepts strings of p's followed by the same number of q's.
//! struct PsAndQs {
//!     tape: InputTape,
//!     count: i32,
//! }
//!
//! impl Hooks<&'static str> for PsAndQs {
//!     fn on_no_transition(&mut self, scope: &Scope<&'static str, ()>, _state: &&'static str) -> Signal {
//!         if self.tape.is_at_end() && self.count == 0 && scope.accept_test() {
//!             Signal::Accept
//!         } else {
//!             Signal::Continue
//!         }
//!     }
//! }
//!
//! let mut machine = MachineBuilder::new()
//!     .initial("start")
//!     .state(
//!         StateBuilder::new("start")
//!             .when("p", |d: &PsAndQs, _, _, _| d.tape.is('p'))
//!     )
//!     .state(
//!         StateBuilder::new("p")
//!             .activity(|d: &mut PsAndQs, _| {
//!                 d.count += 1;
//!                 d.tape.advance();
//!                 Signal::Continue
//!             })
//!             .when("p", |d: &PsAndQs, _, _, _| d.tape.is('p'))
//!             .when("q", |d: &PsAndQs, _, _, _| d.tape.is('q')),
//!     )
//!     .state(
//!         StateBuilder::new("q")
//!             .activity(|d: &mut PsAndQs, _| {
//!                 d.count -= 1;
//!                 d.tape.advance();
//!                 Signal::Continue
//!             })
//!             .when("q", |d: &PsAndQs, _, _, _| d.tape.is('q')),
//!     )
//!     .build(PsAndQs { tape: InputTape::new("ppqq"), count: 0 })
//!     .unwrap();
//!
//! assert_eq!(machine.run().unwrap(), Outcome::Accepted);
//! ```

pub mod backtrack;
pub mod builder;
pub mod checkpoint;
pub mod config;
pub mod core;
pub mod engine;
pub mod graph;
pub mod pushdown;
pub mod tape;
pub mod utility;
pub mod validation;

// Re-export commonly used types
pub use builder::{BuildError, MachineBuilder, StateBuilder, TransitionBuilder};
pub use config::EngineConfig;
pub use core::{Outcome, Rejection, Signal, StateName};
pub use engine::{EngineError, Hooks, Machine, Scope};
