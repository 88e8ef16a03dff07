use super::{Command, CommandError, Flow};
use crate::core::state::ShellState;

/// `exit [code]`. Without a code the read-loop winds down normally; with one
/// the process terminates with exactly that status.
#[derive(Clone, Default)]
pub struct ExitCommand;

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }
}

fn parse_exit_code(code: &str) -> Option<i32> {
    if code.is_empty() || !code.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    code.parse().ok()
}

impl Command for ExitCommand {
    fn execute(&self, args: &[String], _state: &mut ShellState) -> Result<Flow, CommandError> {
        match args {
            [_] => Ok(Flow::Quit),
            [_, code] => parse_exit_code(code)
                .map(Flow::Exit)
                .ok_or_else(|| CommandError::NonIntegerExitCode(code.clone())),
            _ => Err(CommandError::TooManyArguments("exit")),
        }
    }
}
