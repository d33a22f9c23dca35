//! The run loop and everything callbacks see while it runs.
//!
//! - [`Machine`]: owns the table, the caller's data and the engine bookkeeping
//! - [`Scope`]: current state and frame stack, passed to every callback
//! - [`Hooks`]: lifecycle notifications implemented by the caller's data
//! - [`EngineError`]: invariant violations surfaced from a run

mod error;
mod hooks;
mod machine;
mod scope;

pub use error::EngineError;
pub use hooks::Hooks;
pub use machine::Machine;
pub use scope::Scope;
