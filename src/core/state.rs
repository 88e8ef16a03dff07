use std::env;
use std::path::Path;

use crate::core::config::Config;
use crate::core::env::Environment;
use crate::path::PathExpander;

pub const DEFAULT_PROMPT: &str = ">> ";
pub const SHELL_VERSION: &str = "1.0";

/// Everything a command may read or change: the variable table and the
/// session's fixed home directory.
#[derive(Debug, Clone)]
pub struct ShellState {
    pub env: Environment,
    pub paths: PathExpander,
}

impl ShellState {
    pub fn new(env: Environment, paths: PathExpander) -> Self {
        Self { env, paths }
    }

    /// Builds the startup state: the inherited environment, the defaults for
    /// anything it lacks, then the entries accepted from the rc file.
    pub fn bootstrap(config: &Config, paths: PathExpander) -> Self {
        let mut environment = Environment::inherited();
        environment.initialize(startup_defaults(paths.home()), Vec::new());

        match config.load(&environment) {
            Ok(report) => {
                if !config.is_quiet() {
                    for rejected in &report.rejected {
                        eprintln!("{}", rejected);
                    }
                }
                log::debug!(
                    "loaded {} entries from {}",
                    report.entries.len(),
                    config.rc_path().display()
                );
                environment.initialize(Vec::new(), report.entries);
            }
            Err(e) => eprintln!("{}", e),
        }

        Self::new(environment, paths)
    }

    pub fn home(&self) -> &Path {
        self.paths.home()
    }
}

pub fn startup_defaults(home: &Path) -> Vec<(String, String)> {
    let cwd = env::current_dir().unwrap_or_else(|_| home.to_path_buf());
    vec![
        ("PROMPT".to_string(), DEFAULT_PROMPT.to_string()),
        ("MYSH_VERSION".to_string(), SHELL_VERSION.to_string()),
        ("PWD".to_string(), cwd.to_string_lossy().into_owned()),
    ]
}
