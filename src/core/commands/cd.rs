use super::{Command, CommandError, Flow};
use crate::core::state::ShellState;
use crate::path::normalize;
use std::env;
use std::path::Path;

/// `cd [path]`. Keeps `PWD` logical when the target is a symlink.
#[derive(Clone, Default)]
pub struct CdCommand;

impl CdCommand {
    pub fn new() -> Self {
        Self
    }

    fn change_home(&self, state: &mut ShellState) -> Result<(), CommandError> {
        let home = state.home().to_path_buf();
        env::set_current_dir(&home).map_err(|_| CommandError::PermissionDenied {
            command: "cd",
            path: "~".to_string(),
        })?;
        state.env.set("PWD", &home.to_string_lossy());
        Ok(())
    }

    fn change_to(&self, target: &str, state: &mut ShellState) -> Result<(), CommandError> {
        let target = state.paths.expand(target);
        let path = Path::new(&target);

        if !path.exists() {
            return Err(CommandError::NoSuchFile {
                command: "cd",
                path: target,
            });
        }
        if !path.is_dir() {
            return Err(CommandError::NotADirectory {
                command: "cd",
                path: target,
            });
        }

        let through_link = path.is_symlink();
        if env::set_current_dir(path).is_err() {
            return Err(CommandError::PermissionDenied {
                command: "cd",
                path: target,
            });
        }

        let pwd = if through_link {
            logical_pwd(path, state.env.get("PWD").unwrap_or_default())
        } else {
            env::current_dir()?.to_string_lossy().into_owned()
        };
        log::debug!("cd {} -> {}", target, pwd);
        state.env.set("PWD", &pwd);
        Ok(())
    }
}

fn logical_pwd(link: &Path, previous: &str) -> String {
    let normalized = normalize(link);
    if link.is_absolute() {
        normalized.to_string_lossy().into_owned()
    } else {
        format!("{}/{}", previous, normalized.display())
    }
}

impl Command for CdCommand {
    fn execute(&self, args: &[String], state: &mut ShellState) -> Result<Flow, CommandError> {
        match args {
            [_] => self.change_home(state)?,
            [_, target] => self.change_to(target, state)?,
            _ => return Err(CommandError::TooManyArguments("cd")),
        }
        Ok(Flow::Continue)
    }
}
