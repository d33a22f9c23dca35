//! Builder API for ergonomic machine construction.
//!
//! This module provides fluent builders and a macro for declaring state
//! tables with minimal boilerplate. Definitions are validated when the
//! machine is built; transition targets are resolved lazily at run time, and
//! can be checked up front with [`StateTable::validate`](crate::core::StateTable::validate).

pub mod error;
pub mod machine;
pub mod macros;
pub mod state;
pub mod transition;

pub use error::BuildError;
pub use machine::MachineBuilder;
pub use state::StateBuilder;
pub use transition::TransitionBuilder;
