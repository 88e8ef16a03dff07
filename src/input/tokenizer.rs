use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    UnterminatedQuote,
}

impl fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenizeError::UnterminatedQuote => write!(f, "mysh: syntax error: unterminated quote"),
        }
    }
}

impl std::error::Error for TokenizeError {}

/// Splits a command line into arguments with shell quoting rules.
/// Backslashes are kept literally so escaped `\${...}` references reach the
/// substitution engine intact.
pub fn split(line: &str) -> Result<Vec<String>, TokenizeError> {
    let escaped = line.replace('\\', "\\\\");
    shlex::split(&escaped).ok_or(TokenizeError::UnterminatedQuote)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_words_and_quotes() -> Result<(), TokenizeError> {
        assert_eq!(split("echo  hello   world")?, vec!["echo", "hello", "world"]);
        assert_eq!(split(r#"echo "a b" 'c d'"#)?, vec!["echo", "a b", "c d"]);
        assert_eq!(split("")?, Vec::<String>::new());
        Ok(())
    }

    #[test]
    fn test_backslashes_survive() -> Result<(), TokenizeError> {
        assert_eq!(split(r"echo \${HOME}")?, vec!["echo", r"\${HOME}"]);
        assert_eq!(split(r#"var X "\${Y}""#)?, vec!["var", "X", r"\${Y}"]);
        Ok(())
    }

    #[test]
    fn test_unterminated_quote() {
        assert_eq!(split("echo \"open"), Err(TokenizeError::UnterminatedQuote));
        assert_eq!(split("echo 'open"), Err(TokenizeError::UnterminatedQuote));
    }
}
