mod expander;
mod resolver;

pub use expander::{normalize, PathExpander};
pub use resolver::{find_executable, is_executable, resolve_command};
