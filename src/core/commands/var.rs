use super::{Command, CommandError, Flow};
use crate::core::env::is_valid_name;
use crate::core::state::ShellState;
use crate::core::substitution::{substitute, substitute_all};
use crate::input::tokenizer;
use crate::process::capture_output;

/// `var NAME VALUE` and `var -s NAME COMMAND...`.
#[derive(Clone, Default)]
pub struct VarCommand;

impl VarCommand {
    pub fn new() -> Self {
        Self
    }

    fn assign(&self, args: &[String], state: &mut ShellState) -> Result<(), CommandError> {
        let [_, name, _] = args else {
            return Err(argument_count(args));
        };
        if !is_valid_name(name) {
            return Err(CommandError::InvalidVariableName {
                command: "var",
                name: name.clone(),
            });
        }

        let expanded = substitute_all(args, &state.env)?;
        if let Some(value) = expanded.last() {
            state.env.set(name, value);
        }
        Ok(())
    }

    fn capture(&self, name: &str, command: &[String], state: &mut ShellState) -> Result<(), CommandError> {
        let name = substitute(name, &state.env)?;
        if !is_valid_name(&name) {
            return Err(CommandError::InvalidVariableName { command: "var", name });
        }

        let command = substitute_all(command, &state.env)?;
        let command = match command.as_slice() {
            [line] => tokenizer::split(line)?,
            _ => command,
        };
        if command.is_empty() {
            return Ok(());
        }

        let output = capture_output(&command, state)?;
        state.env.set(&name, &output);
        Ok(())
    }
}

fn argument_count(args: &[String]) -> CommandError {
    CommandError::ArgumentCount {
        command: "var",
        expected: 2,
        got: args.len().saturating_sub(1),
    }
}

impl Command for VarCommand {
    fn execute(&self, args: &[String], state: &mut ShellState) -> Result<Flow, CommandError> {
        match args {
            [_, _, _] => self.assign(args, state)?,
            [_, flag, name, command @ ..] if flag.starts_with('-') => {
                if flag != "-s" {
                    return Err(CommandError::InvalidOption {
                        command: "var",
                        option: flag.clone(),
                    });
                }
                self.capture(name, command, state)?
            }
            _ => return Err(argument_count(args)),
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::testing::{args, state_with_home};
    use std::path::Path;

    fn run(line: &[&str], state: &mut ShellState) -> Result<Flow, CommandError> {
        VarCommand::new().execute(&args(line), state)
    }

    #[test]
    fn test_assignment() -> Result<(), CommandError> {
        let mut state = state_with_home(Path::new("/tmp"));
        run(&["var", "GREETING", "hello world"], &mut state)?;
        assert_eq!(state.env.get("GREETING"), Some("hello world"));
        Ok(())
    }

    #[test]
    fn test_assignment_substitutes_value() -> Result<(), CommandError> {
        let mut state = state_with_home(Path::new("/tmp"));
        state.env.set("A", "1");
        run(&["var", "B", "${A}-\\${A}"], &mut state)?;
        assert_eq!(state.env.get("B"), Some("1-${A}"));
        Ok(())
    }

    #[test]
    fn test_invalid_name_assigns_nothing() {
        let mut state = state_with_home(Path::new("/tmp"));
        let result = run(&["var", "bad-name", "x"], &mut state);
        match result {
            Err(e) => assert_eq!(e.to_string(), "var: invalid characters for variable bad-name"),
            Ok(flow) => panic!("expected an error, got {:?}", flow),
        }
        assert!(!state.env.contains("bad-name"));
    }

    #[test]
    fn test_failed_substitution_assigns_nothing() {
        let mut state = state_with_home(Path::new("/tmp"));
        let result = run(&["var", "X", "${no good}"], &mut state);
        assert!(matches!(result, Err(CommandError::Substitution(_))));
        assert!(!state.env.contains("X"));
    }

    #[test]
    fn test_argument_counts() {
        let mut state = state_with_home(Path::new("/tmp"));
        let cases: Vec<(&[&str], &str)> = vec![
            (&["var"], "var: expected 2 arguments, got 0"),
            (&["var", "A"], "var: expected 2 arguments, got 1"),
            (&["var", "A", "b", "c"], "var: expected 2 arguments, got 3"),
        ];
        for (line, expected) in cases {
            match run(line, &mut state) {
                Err(e) => assert_eq!(e.to_string(), expected),
                Ok(flow) => panic!("expected an error for {:?}, got {:?}", line, flow),
            }
        }
    }

    #[test]
    fn test_unknown_option() {
        let mut state = state_with_home(Path::new("/tmp"));
        match run(&["var", "-x", "A", "echo"], &mut state) {
            Err(e) => assert_eq!(e.to_string(), "var: invalid option: -x"),
            Ok(flow) => panic!("expected an error, got {:?}", flow),
        }
    }

    #[test]
    fn test_capture_from_arguments() -> Result<(), CommandError> {
        let mut state = state_with_home(Path::new("/tmp"));
        run(&["var", "-s", "name", "echo", "hello"], &mut state)?;
        assert_eq!(state.env.get("name"), Some("hello"));
        Ok(())
    }

    #[test]
    fn test_capture_from_single_command_line() -> Result<(), CommandError> {
        let mut state = state_with_home(Path::new("/tmp"));
        state.env.set("WHO", "there");
        run(&["var", "-s", "out", "echo hi ${WHO}"], &mut state)?;
        assert_eq!(state.env.get("out"), Some("hi there"));
        Ok(())
    }

    #[test]
    fn test_capture_substitutes_name() -> Result<(), CommandError> {
        let mut state = state_with_home(Path::new("/tmp"));
        state.env.set("TARGET", "RESULT");
        run(&["var", "-s", "${TARGET}", "echo", "ok"], &mut state)?;
        assert_eq!(state.env.get("RESULT"), Some("ok"));
        Ok(())
    }

    #[test]
    fn test_capture_launch_failure_assigns_nothing() {
        let mut state = state_with_home(Path::new("/tmp"));
        let result = run(&["var", "-s", "out", "nonexistent-binary-xyz"], &mut state);
        assert!(matches!(result, Err(CommandError::ProcessError(_))));
        assert!(!state.env.contains("out"));
    }

    #[test]
    fn test_capture_rejects_invalid_name() {
        let mut state = state_with_home(Path::new("/tmp"));
        let result = run(&["var", "-s", "a-b", "echo", "x"], &mut state);
        assert!(matches!(result, Err(CommandError::InvalidVariableName { .. })));
    }
}
