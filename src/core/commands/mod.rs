use std::collections::BTreeMap;

mod cd;
mod exit;
mod pwd;
mod var;
mod which;

pub use cd::CdCommand;
pub use exit::ExitCommand;
pub use pwd::PwdCommand;
pub use var::VarCommand;
pub use which::{Lookup, WhichCommand};

use crate::core::state::ShellState;
use crate::core::substitution::SubstitutionError;
use crate::input::TokenizeError;
use crate::process::{ProcessError, ProcessExecutor};

pub const BUILTINS: [&str; 5] = ["pwd", "cd", "exit", "which", "var"];

/// What the read-loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
    Exit(i32),
}

#[derive(Debug)]
pub enum CommandError {
    TooManyArguments(&'static str),
    UnexpectedArguments(&'static str),
    InvalidOption { command: &'static str, option: String },
    Usage(&'static str),
    ArgumentCount { command: &'static str, expected: usize, got: usize },
    InvalidVariableName { command: &'static str, name: String },
    NonIntegerExitCode(String),
    NoSuchFile { command: &'static str, path: String },
    NotADirectory { command: &'static str, path: String },
    PermissionDenied { command: &'static str, path: String },
    Substitution(SubstitutionError),
    Syntax(TokenizeError),
    ProcessError(ProcessError),
    IoError(std::io::Error),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::TooManyArguments(cmd) => write!(f, "{}: too many arguments", cmd),
            CommandError::UnexpectedArguments(cmd) => {
                write!(f, "{}: not expecting any arguments", cmd)
            }
            CommandError::InvalidOption { command, option } => {
                let flag: String = option.chars().take(2).collect();
                write!(f, "{}: invalid option: {}", command, flag)
            }
            CommandError::Usage(usage) => write!(f, "usage: {}", usage),
            CommandError::ArgumentCount {
                command,
                expected,
                got,
            } => write!(f, "{}: expected {} arguments, got {}", command, expected, got),
            CommandError::InvalidVariableName { command, name } => {
                write!(f, "{}: invalid characters for variable {}", command, name)
            }
            CommandError::NonIntegerExitCode(code) => {
                write!(f, "exit: non-integer exit code provided: {}", code)
            }
            CommandError::NoSuchFile { command, path } => {
                write!(f, "{}: no such file or directory: {}", command, path)
            }
            CommandError::NotADirectory { command, path } => {
                write!(f, "{}: not a directory: {}", command, path)
            }
            CommandError::PermissionDenied { command, path } => {
                write!(f, "{}: permission denied: {}", command, path)
            }
            CommandError::Substitution(err) => write!(f, "{}", err),
            CommandError::Syntax(err) => write!(f, "{}", err),
            CommandError::ProcessError(err) => write!(f, "{}", err),
            CommandError::IoError(err) => write!(f, "mysh: {}", err),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::IoError(err)
    }
}

impl From<ProcessError> for CommandError {
    fn from(err: ProcessError) -> Self {
        CommandError::ProcessError(err)
    }
}

impl From<SubstitutionError> for CommandError {
    fn from(err: SubstitutionError) -> Self {
        CommandError::Substitution(err)
    }
}

impl From<TokenizeError> for CommandError {
    fn from(err: TokenizeError) -> Self {
        CommandError::Syntax(err)
    }
}

/// A built-in. `args[0]` is the command's own name.
pub trait Command {
    fn execute(&self, args: &[String], state: &mut ShellState) -> Result<Flow, CommandError>;
}

enum CommandType {
    Pwd(PwdCommand),
    Cd(CdCommand),
    Exit(ExitCommand),
    Which(WhichCommand),
    Var(VarCommand),
}

impl Command for CommandType {
    fn execute(&self, args: &[String], state: &mut ShellState) -> Result<Flow, CommandError> {
        match self {
            CommandType::Pwd(cmd) => cmd.execute(args, state),
            CommandType::Cd(cmd) => cmd.execute(args, state),
            CommandType::Exit(cmd) => cmd.execute(args, state),
            CommandType::Which(cmd) => cmd.execute(args, state),
            CommandType::Var(cmd) => cmd.execute(args, state),
        }
    }
}

/// Routes a tokenized line to a built-in or to the process executor.
pub struct CommandExecutor {
    commands: BTreeMap<&'static str, CommandType>,
    process_executor: ProcessExecutor,
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandExecutor {
    pub fn new() -> Self {
        Self::with_process_executor(ProcessExecutor::new())
    }

    pub fn with_process_executor(process_executor: ProcessExecutor) -> Self {
        let mut commands = BTreeMap::new();
        commands.insert("pwd", CommandType::Pwd(PwdCommand::new()));
        commands.insert("cd", CommandType::Cd(CdCommand::new()));
        commands.insert("exit", CommandType::Exit(ExitCommand::new()));
        commands.insert("which", CommandType::Which(WhichCommand::new()));
        commands.insert("var", CommandType::Var(VarCommand::new()));

        Self {
            commands,
            process_executor,
        }
    }

    pub fn execute(&self, args: &[String], state: &mut ShellState) -> Result<Flow, CommandError> {
        let Some(name) = args.first() else {
            return Ok(Flow::Continue);
        };

        if let Some(cmd) = self.commands.get(name.as_str()) {
            log::debug!("built-in {}", name);
            return cmd.execute(args, state);
        }

        let status = self.process_executor.execute(args, state)?;
        log::debug!("{} exited with {}", name, status);
        Ok(Flow::Continue)
    }

    pub fn is_builtin(&self, command: &str) -> bool {
        self.commands.contains_key(command)
    }
}
