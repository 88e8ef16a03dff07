use std::fmt;
use std::path::PathBuf;

use super::{Command, CommandError, Flow, BUILTINS};
use crate::core::state::ShellState;
use crate::path::find_executable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Builtin(String),
    Found(PathBuf),
    NotFound(String),
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Builtin(name) => write!(f, "{}: shell built-in command", name),
            Lookup::Found(path) => write!(f, "{}", path.display()),
            Lookup::NotFound(name) => write!(f, "{} not found", name),
        }
    }
}

/// `which name...`
#[derive(Clone, Default)]
pub struct WhichCommand;

impl WhichCommand {
    pub fn new() -> Self {
        Self
    }

    pub fn lookup(&self, name: &str, state: &ShellState) -> Lookup {
        if BUILTINS.contains(&name) {
            return Lookup::Builtin(name.to_string());
        }
        match find_executable(name, &state.env.search_path()) {
            Some(path) => Lookup::Found(path),
            None => Lookup::NotFound(name.to_string()),
        }
    }
}

impl Command for WhichCommand {
    fn execute(&self, args: &[String], state: &mut ShellState) -> Result<Flow, CommandError> {
        let names = args.get(1..).unwrap_or_default();
        if names.is_empty() {
            return Err(CommandError::Usage("which command ..."));
        }
        for name in names {
            println!("{}", self.lookup(name, state));
        }
        Ok(Flow::Continue)
    }
}
