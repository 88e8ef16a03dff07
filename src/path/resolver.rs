use super::normalize;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

pub fn is_executable(path: &Path) -> bool {
    path.metadata()
        .map(|meta| meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// Lookup used when launching a command: the first `dir/name` that exists
/// and carries an execute bit. Directories qualify here so the caller can
/// report them. A name containing `/` is a path and is never looked up.
pub fn resolve_command(name: &str, search_path: &[PathBuf]) -> Option<PathBuf> {
    if name.contains('/') {
        return None;
    }
    let relative = normalize(Path::new(name));
    search_path
        .iter()
        .map(|dir| dir.join(&relative))
        .find(|candidate| candidate.exists() && is_executable(candidate))
}

/// Lookup used by `which`: only executable regular files count.
pub fn find_executable(name: &str, search_path: &[PathBuf]) -> Option<PathBuf> {
    search_path
        .iter()
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file() && is_executable(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn make_file(path: &Path, mode: u32) -> std::io::Result<()> {
        fs::write(path, "#!/bin/sh\n")?;
        fs::set_permissions(path, fs::Permissions::from_mode(mode))
    }

    #[test]
    fn test_first_directory_wins() -> std::io::Result<()> {
        let first = tempfile::tempdir()?;
        let second = tempfile::tempdir()?;
        make_file(&first.path().join("tool"), 0o755)?;
        make_file(&second.path().join("tool"), 0o755)?;

        let search_path = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        assert_eq!(
            find_executable("tool", &search_path),
            Some(first.path().join("tool"))
        );
        assert_eq!(
            resolve_command("tool", &search_path),
            Some(first.path().join("tool"))
        );
        Ok(())
    }

    #[test]
    fn test_skips_non_executable() -> std::io::Result<()> {
        let first = tempfile::tempdir()?;
        let second = tempfile::tempdir()?;
        make_file(&first.path().join("tool"), 0o644)?;
        make_file(&second.path().join("tool"), 0o700)?;

        let search_path = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        assert_eq!(
            find_executable("tool", &search_path),
            Some(second.path().join("tool"))
        );
        Ok(())
    }

    #[test]
    fn test_directories() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        fs::create_dir(dir.path().join("sub"))?;

        let search_path = vec![dir.path().to_path_buf()];
        assert_eq!(find_executable("sub", &search_path), None);
        assert_eq!(
            resolve_command("sub", &search_path),
            Some(dir.path().join("sub"))
        );
        Ok(())
    }

    #[test]
    fn test_paths_bypass_search_path() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        make_file(&dir.path().join("tool"), 0o755)?;
        fs::create_dir(dir.path().join("sub"))?;
        make_file(&dir.path().join("sub").join("tool"), 0o755)?;

        let search_path = vec![dir.path().to_path_buf()];
        for name in ["./tool", "sub/tool", "../tool", "/bin/sh"] {
            assert_eq!(resolve_command(name, &search_path), None, "{}", name);
        }
        assert_eq!(resolve_command("no-such-command-xyz", &search_path), None);
        Ok(())
    }
}
