//! Read-only consumers of machines and graphs: diagram export and tree dump.

mod diagram;
mod tree_dump;

pub use diagram::render_dot;
pub use tree_dump::{tree_dump, TreeDumpError};
