use std::io::Read;
use std::os::unix::process::CommandExt;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use super::signal::restore_default_dispositions;
use super::ProcessError;
use crate::core::state::ShellState;
use crate::path::resolve_command;

/// Upper bound on the bytes read back from a captured command.
pub const CAPTURE_LIMIT: u64 = 4096;

/// Runs `args` with standard output connected to a pipe and returns what it
/// printed. The command stays in the shell's process group and never owns
/// the terminal.
pub fn capture_output(args: &[String], state: &ShellState) -> Result<String, ProcessError> {
    let args = state.paths.expand_all(args);
    let Some((name, rest)) = args.split_first() else {
        return Ok(String::new());
    };

    let program = match resolve_command(name, &state.env.search_path()) {
        Some(path) if path.is_dir() => return Err(ProcessError::IsDirectory(path)),
        Some(path) => path,
        None => PathBuf::from(name),
    };

    let mut command = Command::new(&program);
    command
        .arg0(name)
        .args(rest)
        .env_clear()
        .envs(state.env.iter())
        .stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit());
    restore_default_dispositions(&mut command);

    let mut child = command
        .spawn()
        .map_err(|e| ProcessError::from_launch(name, e))?;

    let mut output = Vec::new();
    let read = match child.stdout.take() {
        Some(stdout) => stdout.take(CAPTURE_LIMIT).read_to_end(&mut output),
        None => Ok(0),
    };
    let status = child.wait()?;
    read?;
    log::debug!("captured {} bytes from {} ({})", output.len(), name, status);

    Ok(trim_single_line(String::from_utf8_lossy(&output).into_owned()))
}

/// Output holding exactly one newline loses its trailing whitespace; any
/// other shape is kept verbatim.
pub fn trim_single_line(text: String) -> String {
    if text.matches('\n').count() == 1 {
        text.trim_end().to_string()
    } else {
        text
    }
}
