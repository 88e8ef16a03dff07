use std::{fmt, fs, path::Path};

mod loader;
mod paths;

use crate::core::env::Environment;
use crate::core::substitution::SubstitutionError;
use crate::flags::Flags;
pub use loader::{ConfigLoader, LoadReport};
pub use paths::ConfigPaths;

/// Startup configuration: where the rc file lives and how loudly to report
/// the entries it rejects.
#[derive(Debug, Clone)]
pub struct Config {
    paths: ConfigPaths,
    quiet: bool,
}

impl Config {
    pub fn new(paths: ConfigPaths, quiet: bool) -> Self {
        Self { paths, quiet }
    }

    pub fn from_flags(flags: &Flags, home: &Path) -> Self {
        let paths = ConfigPaths::resolve(flags.get_value("config").map(String::as_str), home);
        Self::new(paths, flags.is_set("quiet"))
    }

    pub fn rc_path(&self) -> &Path {
        &self.paths.rc_path
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Reads and evaluates the rc file against `base`. A missing file loads
    /// nothing.
    pub fn load(&self, base: &Environment) -> Result<LoadReport, ConfigError> {
        let content = match fs::read_to_string(&self.paths.rc_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no rc file at {}", self.paths.rc_path.display());
                return Ok(LoadReport::default());
            }
            Err(e) => return Err(e.into()),
        };
        ConfigLoader::new(base).load_str(&content)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidFormat,
    NotAString(String),
    InvalidName(String),
    Substitution { key: String, source: SubstitutionError },
    IoError(std::io::Error),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidFormat => write!(f, "mysh: invalid JSON format for .myshrc"),
            ConfigError::NotAString(key) => write!(f, "mysh: .myshrc: {}: not a string", key),
            ConfigError::InvalidName(key) => write!(
                f,
                "mysh: .myshrc: {}: invalid characters for variable name",
                key
            ),
            ConfigError::Substitution { key, source } => write!(
                f,
                "mysh: .myshrc: {}: invalid characters for variable {}",
                key, source.name
            ),
            ConfigError::IoError(e) => write!(f, "mysh: .myshrc: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}
