use crate::core::commands::BUILTINS;
use inksac::prelude::*;

#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self::with_support(support)
    }

    pub fn with_support(color_support: ColorSupport) -> Self {
        Self { color_support }
    }

    fn enabled(&self) -> bool {
        !matches!(self.color_support, ColorSupport::NoColor)
    }

    /// Colors the command word, options and `${...}` references while
    /// keeping the line's spacing as typed.
    pub fn highlight_command(&self, input: &str) -> String {
        if !self.enabled() {
            return input.to_string();
        }

        let mut output = String::with_capacity(input.len() * 2);
        let mut word_start = None;
        let mut first_word = true;
        for (i, c) in input.char_indices() {
            match (c.is_whitespace(), word_start) {
                (true, Some(start)) => {
                    output.push_str(&self.highlight_word(&input[start..i], first_word));
                    first_word = false;
                    word_start = None;
                    output.push(c);
                }
                (true, None) => output.push(c),
                (false, None) => word_start = Some(i),
                (false, Some(_)) => {}
            }
        }
        if let Some(start) = word_start {
            output.push_str(&self.highlight_word(&input[start..], first_word));
        }
        output
    }

    fn highlight_word(&self, word: &str, is_command: bool) -> String {
        let style = if is_command && BUILTINS.contains(&word) {
            Style::builder().foreground(Color::Green).bold().build()
        } else if is_command {
            Style::builder().foreground(Color::Cyan).bold().build()
        } else if word.starts_with('-') {
            Style::builder().foreground(Color::Yellow).build()
        } else if word.contains("${") {
            Style::builder().foreground(Color::Magenta).build()
        } else {
            return word.to_string();
        };
        word.style(style).to_string()
    }

    pub fn highlight_error(&self, error: &str) -> String {
        if !self.enabled() {
            return error.to_string();
        }

        let error_style = Style::builder().foreground(Color::Red).bold().build();
        error.style(error_style).to_string()
    }

    pub fn highlight_hint(&self, hint: &str) -> String {
        if !self.enabled() {
            return hint.to_string();
        }

        let hint_style = Style::builder()
            .foreground(Color::RGB(128, 128, 128))
            .build();
        hint.style(hint_style).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_color_is_identity() {
        let highlighter = SyntaxHighlighter::with_support(ColorSupport::NoColor);
        let line = "  var -s  out \"echo ${X}\" ";
        assert_eq!(highlighter.highlight_command(line), line);
        assert_eq!(highlighter.highlight_error("mysh: oops"), "mysh: oops");
    }

    #[test]
    fn test_highlighted_line_keeps_words_and_spacing() {
        let highlighted = SyntaxHighlighter::new().highlight_command("ls   -la  ${HOME}");
        for part in ["ls", "   ", "-la", "  ", "${HOME}"] {
            assert!(highlighted.contains(part));
        }
    }
}
