use std::os::unix::process::{CommandExt, ExitStatusExt};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};

use super::signal::restore_default_dispositions;
use super::terminal::{
    claim_foreground_in_child, ControllingTerminal, ForegroundGuard, ForegroundTerminal,
};
use super::ProcessError;
use crate::core::env::Environment;
use crate::core::state::ShellState;
use crate::core::substitution::substitute_all;
use crate::path::resolve_command;

/// Result of starting a program in a fresh process group.
#[derive(Debug)]
pub enum LaunchOutcome {
    Started(Child),
    PermissionDenied,
    Failed(std::io::Error),
}

/// Starts `program` as the leader of a new process group, with `args[0]`
/// as its argument zero and the shell's variables as its environment. With
/// `claim_terminal` the child takes the terminal's foreground before exec.
pub fn launch(
    program: &Path,
    args: &[String],
    env: &Environment,
    claim_terminal: bool,
) -> LaunchOutcome {
    let mut command = Command::new(program);
    if let Some((arg0, rest)) = args.split_first() {
        command.arg0(arg0).args(rest);
    }
    command
        .env_clear()
        .envs(env.iter())
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .process_group(0);
    if claim_terminal {
        claim_foreground_in_child(&mut command);
    }
    restore_default_dispositions(&mut command);

    match command.spawn() {
        Ok(child) => LaunchOutcome::Started(child),
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            LaunchOutcome::PermissionDenied
        }
        Err(e) => LaunchOutcome::Failed(e),
    }
}

/// Runs external commands as foreground jobs.
pub struct ProcessExecutor {
    terminal: Box<dyn ForegroundTerminal>,
}

impl Default for ProcessExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessExecutor {
    pub fn new() -> Self {
        Self::with_terminal(Box::new(ControllingTerminal))
    }

    pub fn with_terminal(terminal: Box<dyn ForegroundTerminal>) -> Self {
        Self { terminal }
    }

    /// Substitutes and tilde-expands `args`, resolves `args[0]` and runs it
    /// in the foreground until it terminates.
    pub fn execute(&self, args: &[String], state: &ShellState) -> Result<ExitStatus, ProcessError> {
        let args = substitute_all(args, &state.env)?;
        let args = state.paths.expand_all(&args);
        let Some(name) = args.first() else {
            return Ok(ExitStatus::from_raw(0));
        };

        let program = match resolve_command(name, &state.env.search_path()) {
            Some(path) if path.is_dir() => return Err(ProcessError::IsDirectory(path)),
            Some(path) => path,
            None => {
                log::debug!("{} not on search path, launching as given", name);
                PathBuf::from(name)
            }
        };

        log::debug!("launching {} as {:?}", program.display(), args);
        let claim_terminal = self.terminal.claims_in_child();
        match launch(&program, &args, &state.env, claim_terminal) {
            LaunchOutcome::Started(child) => self.wait_in_foreground(child),
            LaunchOutcome::PermissionDenied => Err(ProcessError::PermissionDenied(name.clone())),
            LaunchOutcome::Failed(e) => Err(ProcessError::from_launch(name, e)),
        }
    }

    fn wait_in_foreground(&self, mut child: Child) -> Result<ExitStatus, ProcessError> {
        let pid = child.id() as libc::pid_t;

        // Usually redundant with the child's own setpgid and fails with EACCES
        // once it has exec'd.
        if unsafe { libc::setpgid(pid, pid) } == -1 {
            log::debug!(
                "setpgid({}) from parent: {}",
                pid,
                std::io::Error::last_os_error()
            );
        }

        let _foreground = ForegroundGuard::acquire(self.terminal.as_ref(), pid);
        let status = child.wait()?;
        log::debug!("job {} finished: {}", pid, status);
        Ok(status)
    }
}
