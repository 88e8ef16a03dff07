//! `${NAME}` expansion against the shell's [`Environment`].
//!
//! Escaped references (`\${NAME}`) are located first and held aside, so the
//! expansion pass only ever sees the text between them. Each held reference
//! is put back, minus its backslash, in the order it was found.

use crate::core::env::{is_valid_name, Environment};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

lazy_static! {
    static ref ESCAPED_RE: Regex = Regex::new(r"\\\$\{[^}]+\}").expect("escaped reference regex");
    static ref REFERENCE_RE: Regex = Regex::new(r"\$\{([^}]+)\}").expect("reference regex");
}

/// A `${...}` reference whose name is not a valid variable name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionError {
    pub name: String,
}

impl fmt::Display for SubstitutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mysh: syntax error: invalid characters for variable {}",
            self.name
        )
    }
}

impl std::error::Error for SubstitutionError {}

/// Expands every unescaped `${NAME}` in `input`. Unset names expand to the
/// empty string. A single invalid reference invalidates the whole input.
pub fn substitute(input: &str, env: &Environment) -> Result<String, SubstitutionError> {
    if !input.contains("${") {
        return Ok(input.to_string());
    }

    let mut output = String::with_capacity(input.len());
    let mut last = 0;
    for escaped in ESCAPED_RE.find_iter(input) {
        expand_into(&mut output, &input[last..escaped.start()], env)?;
        output.push_str(&escaped.as_str()[1..]);
        last = escaped.end();
    }
    expand_into(&mut output, &input[last..], env)?;

    Ok(output)
}

/// Substitutes each argument in turn, stopping at the first failure.
pub fn substitute_all(args: &[String], env: &Environment) -> Result<Vec<String>, SubstitutionError> {
    args.iter().map(|arg| substitute(arg, env)).collect()
}

fn expand_into(output: &mut String, segment: &str, env: &Environment) -> Result<(), SubstitutionError> {
    let mut last = 0;
    for caps in REFERENCE_RE.captures_iter(segment) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let name = name.as_str();
        if !is_valid_name(name) {
            return Err(SubstitutionError {
                name: name.to_string(),
            });
        }
        output.push_str(&segment[last..whole.start()]);
        output.push_str(env.get(name).unwrap_or_default());
        last = whole.end();
    }
    output.push_str(&segment[last..]);
    Ok(())
}
