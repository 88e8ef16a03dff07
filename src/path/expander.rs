use std::path::{Component, Path, PathBuf};

/// Tilde expansion against the session's home directory, which is fixed
/// when the shell starts.
#[derive(Debug, Clone)]
pub struct PathExpander {
    home: PathBuf,
}

impl Default for PathExpander {
    fn default() -> Self {
        Self::new()
    }
}

impl PathExpander {
    pub fn new() -> Self {
        Self::with_home(dirs::home_dir().unwrap_or_else(|| PathBuf::from("/home")))
    }

    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Replaces every `~` in `arg`, wherever it occurs.
    pub fn expand(&self, arg: &str) -> String {
        if arg.contains('~') {
            arg.replace('~', &self.home.to_string_lossy())
        } else {
            arg.to_string()
        }
    }

    pub fn expand_all(&self, args: &[String]) -> Vec<String> {
        args.iter().map(|arg| self.expand(arg)).collect()
    }
}

/// Lexical normalization: drops `.` and empty components and folds `..`
/// into its parent without touching the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}
