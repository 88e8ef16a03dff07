use std::env;
use std::path::{Path, PathBuf};

pub const RC_FILE_NAME: &str = ".myshrc";

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub rc_path: PathBuf,
}

impl ConfigPaths {
    /// An explicit path wins; otherwise the rc file lives in `MYSHDOTDIR`,
    /// falling back to the home directory.
    pub fn resolve(explicit: Option<&str>, home: &Path) -> Self {
        if let Some(path) = explicit {
            return Self {
                rc_path: PathBuf::from(path),
            };
        }

        let dir = env::var_os("MYSHDOTDIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| home.to_path_buf());
        Self {
            rc_path: dir.join(RC_FILE_NAME),
        }
    }
}
