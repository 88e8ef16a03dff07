use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use rustyline::{
    completion::{Completer, Pair},
    highlight::{CmdKind, Highlighter},
    hint::Hinter,
    validate::Validator,
    Context, Helper,
};

use crate::core::commands::BUILTINS;
use crate::highlight::SyntaxHighlighter;
use crate::path::{is_executable, PathExpander};

/// Line-editor helper: completes command names from the built-ins and the
/// search path, completes later words as file paths, and colors the line.
#[derive(Clone)]
pub struct ShellHelper {
    commands: BTreeSet<String>,
    search_path: Vec<PathBuf>,
    paths: PathExpander,
    highlighter: SyntaxHighlighter,
}

impl ShellHelper {
    pub fn new(paths: PathExpander) -> Self {
        let mut helper = Self {
            commands: BTreeSet::new(),
            search_path: Vec::new(),
            paths,
            highlighter: SyntaxHighlighter::new(),
        };
        helper.refresh_commands();
        helper
    }

    /// Replaces the directories scanned for command names. Rescans only
    /// when they differ from the current ones.
    pub fn set_search_path(&mut self, search_path: Vec<PathBuf>) {
        if search_path != self.search_path {
            self.search_path = search_path;
            self.refresh_commands();
        }
    }

    fn refresh_commands(&mut self) {
        self.commands = BUILTINS.iter().map(|name| name.to_string()).collect();
        for dir in &self.search_path {
            let Ok(entries) = fs::read_dir(dir) else {
                continue;
            };
            for entry in entries.filter_map(Result::ok) {
                let path = entry.path();
                if path.is_file() && is_executable(&path) {
                    if let Some(name) = entry.file_name().to_str() {
                        self.commands.insert(name.to_string());
                    }
                }
            }
        }
        log::debug!("{} command names available for completion", self.commands.len());
    }

    pub fn complete_command(&self, prefix: &str) -> Vec<Pair> {
        self.commands
            .iter()
            .filter(|name| name.starts_with(prefix))
            .map(|name| Pair {
                display: name.clone(),
                replacement: format!("{} ", name),
            })
            .collect()
    }

    pub fn complete_path(&self, incomplete: &str) -> Vec<Pair> {
        let (typed_dir, file_prefix) = match incomplete.rfind('/') {
            Some(i) => incomplete.split_at(i + 1),
            None => ("", incomplete),
        };
        let search_dir = if typed_dir.is_empty() {
            PathBuf::from(".")
        } else {
            PathBuf::from(self.paths.expand(typed_dir))
        };

        let Ok(entries) = fs::read_dir(&search_dir) else {
            return Vec::new();
        };
        let mut matches: Vec<Pair> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                if !name.starts_with(file_prefix) || (file_prefix.is_empty() && name.starts_with('.')) {
                    return None;
                }
                Some(path_pair(typed_dir, &name, &entry.path()))
            })
            .collect();
        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }
}

fn path_pair(typed_dir: &str, name: &str, path: &Path) -> Pair {
    let completed = format!("{}{}", typed_dir, name);
    if path.is_dir() {
        Pair {
            display: format!("{}/", name),
            replacement: format!("{}/", completed),
        }
    } else {
        Pair {
            display: name.to_string(),
            replacement: format!("{} ", completed),
        }
    }
}

impl Helper for ShellHelper {}

impl Highlighter for ShellHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned(self.highlighter.highlight_command(line))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(self.highlighter.highlight_hint(hint))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;
}

impl Validator for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let before_cursor = &line[..pos];
        let word = before_cursor
            .rsplit(char::is_whitespace)
            .next()
            .unwrap_or_default();
        let start = pos - word.len();
        let is_command_word = before_cursor[..start].trim().is_empty();

        let matches = if is_command_word && !word.contains('/') {
            self.complete_command(word)
        } else {
            self.complete_path(word)
        };
        Ok((start, matches))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    fn replacements(pairs: &[Pair]) -> Vec<&str> {
        pairs.iter().map(|p| p.replacement.as_str()).collect()
    }

    #[test]
    fn test_builtins_always_complete() {
        let helper = ShellHelper::new(PathExpander::with_home("/tmp"));
        assert_eq!(replacements(&helper.complete_command("wh")), vec!["which "]);
        assert_eq!(helper.complete_command("").len(), BUILTINS.len());
    }

    #[test]
    fn test_search_path_commands() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        let tool = dir.path().join("mytool");
        fs::write(&tool, "#!/bin/sh\n")?;
        fs::set_permissions(&tool, fs::Permissions::from_mode(0o755))?;
        fs::write(dir.path().join("mydata"), "")?;

        let mut helper = ShellHelper::new(PathExpander::with_home("/tmp"));
        helper.set_search_path(vec![dir.path().to_path_buf()]);
        assert_eq!(replacements(&helper.complete_command("my")), vec!["mytool "]);
        Ok(())
    }

    #[test]
    fn test_path_completion() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        fs::create_dir(dir.path().join("src"))?;
        fs::write(dir.path().join("sample.txt"), "")?;
        fs::write(dir.path().join("other"), "")?;

        let helper = ShellHelper::new(PathExpander::with_home(dir.path()));
        let typed = format!("{}/s", dir.path().display());
        let found = helper.complete_path(&typed);
        assert_eq!(
            replacements(&found),
            vec![
                format!("{}/sample.txt ", dir.path().display()).as_str(),
                format!("{}/src/", dir.path().display()).as_str(),
            ]
        );

        let found = helper.complete_path("~/o");
        assert_eq!(replacements(&found), vec!["~/other "]);
        Ok(())
    }
}
