use std::fmt;
use std::path::PathBuf;

use crate::core::substitution::SubstitutionError;

pub mod capture;
pub mod executor;
pub mod signal;
pub mod terminal;

pub use capture::capture_output;
pub use executor::{LaunchOutcome, ProcessExecutor};
pub use terminal::{ControllingTerminal, ForegroundTerminal};

#[derive(Debug)]
pub enum ProcessError {
    CommandNotFound(String),
    NoSuchFile(String),
    IsDirectory(PathBuf),
    PermissionDenied(String),
    Substitution(SubstitutionError),
    Io(std::io::Error),
}

impl ProcessError {
    /// Maps a failed launch of `name` to the diagnostic the user sees.
    pub(crate) fn from_launch(name: &str, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => ProcessError::PermissionDenied(name.to_string()),
            std::io::ErrorKind::NotFound if name.contains('/') => {
                ProcessError::NoSuchFile(name.to_string())
            }
            std::io::ErrorKind::NotFound => ProcessError::CommandNotFound(name.to_string()),
            _ => ProcessError::Io(err),
        }
    }
}

impl From<std::io::Error> for ProcessError {
    fn from(e: std::io::Error) -> Self {
        ProcessError::Io(e)
    }
}

impl From<SubstitutionError> for ProcessError {
    fn from(e: SubstitutionError) -> Self {
        ProcessError::Substitution(e)
    }
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::CommandNotFound(cmd) => write!(f, "mysh: command not found: {}", cmd),
            ProcessError::NoSuchFile(cmd) => write!(f, "mysh: no such file or directory: {}", cmd),
            ProcessError::IsDirectory(path) => write!(f, "mysh: is a directory: {}", path.display()),
            ProcessError::PermissionDenied(cmd) => write!(f, "mysh: permission denied: {}", cmd),
            ProcessError::Substitution(e) => write!(f, "{}", e),
            ProcessError::Io(e) => write!(f, "mysh: {}", e),
        }
    }
}

impl std::error::Error for ProcessError {}
