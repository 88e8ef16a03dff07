use super::{Command, CommandError, Flow};
use crate::core::state::ShellState;
use std::env;

/// `pwd [-P]`: the logical directory kept in `PWD`, or the physical one.
#[derive(Clone, Default)]
pub struct PwdCommand;

impl PwdCommand {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(&self, args: &[String], state: &ShellState) -> Result<String, CommandError> {
        match args {
            [_] => Ok(state.env.get("PWD").unwrap_or_default().to_string()),
            [_, flag] if flag == "-P" => Ok(env::current_dir()?.to_string_lossy().into_owned()),
            [_, first, ..] if first.starts_with('-') => Err(CommandError::InvalidOption {
                command: "pwd",
                option: first.clone(),
            }),
            _ => Err(CommandError::UnexpectedArguments("pwd")),
        }
    }
}

impl Command for PwdCommand {
    fn execute(&self, args: &[String], state: &mut ShellState) -> Result<Flow, CommandError> {
        println!("{}", self.resolve(args, state)?);
        Ok(Flow::Continue)
    }
}
