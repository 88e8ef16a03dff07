use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

/// Variable names are non-empty runs of letters, digits and underscores.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_')
}

/// The shell's variable table. Launched children receive exactly these
/// entries as their environment.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the environment this process was started with.
    pub fn inherited() -> Self {
        let mut environment = Self::new();
        for (key, value) in env::vars() {
            environment.set(&key, &value);
        }
        environment
    }

    /// Applies `defaults` for names that are not yet present, then installs
    /// `loaded` unconditionally.
    pub fn initialize<D, L>(&mut self, defaults: D, loaded: L)
    where
        D: IntoIterator<Item = (String, String)>,
        L: IntoIterator<Item = (String, String)>,
    {
        for (name, value) in defaults {
            self.vars.entry(name).or_insert(value);
        }
        for (name, value) in loaded {
            self.set(&name, &value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn set(&mut self, name: &str, value: &str) {
        self.vars.insert(name.to_string(), value.to_string());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Directories listed in `PATH`, in search order.
    pub fn search_path(&self) -> Vec<PathBuf> {
        env::split_paths(self.get("PATH").unwrap_or_default()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut environment = Environment::new();
        environment.set("TEST_VAR", "test value");
        assert_eq!(environment.get("TEST_VAR"), Some("test value"));
        assert_eq!(environment.get("MISSING"), None);
    }

    #[test]
    fn test_set_overwrites() {
        let mut environment = Environment::new();
        environment.set("A", "1");
        environment.set("A", "2");
        assert_eq!(environment.get("A"), Some("2"));
        assert_eq!(environment.iter().count(), 1);
    }

    #[test]
    fn test_valid_names() {
        assert!(is_valid_name("PATH"));
        assert!(is_valid_name("_under_score9"));
        assert!(!is_valid_name("a b"));
        assert!(!is_valid_name("a$"));
        assert!(!is_valid_name("a{b"));
        assert!(!is_valid_name(""));
    }

    #[test]
    fn test_initialize_only_fills_missing_defaults() {
        let mut environment = Environment::new();
        environment.set("PROMPT", "$ ");
        environment.initialize(
            [
                ("PROMPT".to_string(), ">> ".to_string()),
                ("MYSH_VERSION".to_string(), "1.0".to_string()),
            ],
            [("EDITOR".to_string(), "vi".to_string())],
        );
        assert_eq!(environment.get("PROMPT"), Some("$ "));
        assert_eq!(environment.get("MYSH_VERSION"), Some("1.0"));
        assert_eq!(environment.get("EDITOR"), Some("vi"));
    }

    #[test]
    fn test_search_path_order() {
        let mut environment = Environment::new();
        environment.set("PATH", "/usr/local/bin:/usr/bin:/bin");
        assert_eq!(
            environment.search_path(),
            vec![
                PathBuf::from("/usr/local/bin"),
                PathBuf::from("/usr/bin"),
                PathBuf::from("/bin")
            ]
        );
    }
}
