use serde_json::Value;

use super::ConfigError;
use crate::core::env::{is_valid_name, Environment};
use crate::core::substitution::substitute;

/// Entries accepted from an rc file, in file order, plus the diagnostics
/// for the ones that were skipped.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub entries: Vec<(String, String)>,
    pub rejected: Vec<ConfigError>,
}

/// Evaluates rc file entries. Each accepted value is expanded against the
/// base environment plus the entries accepted before it.
pub struct ConfigLoader {
    scratch: Environment,
}

impl ConfigLoader {
    pub fn new(base: &Environment) -> Self {
        Self {
            scratch: base.clone(),
        }
    }

    pub fn load_str(mut self, content: &str) -> Result<LoadReport, ConfigError> {
        let Ok(Value::Object(entries)) = serde_json::from_str::<Value>(content) else {
            return Err(ConfigError::InvalidFormat);
        };

        let mut report = LoadReport::default();
        for (key, value) in entries {
            match self.process_entry(key, value) {
                Ok(entry) => report.entries.push(entry),
                Err(e) => report.rejected.push(e),
            }
        }
        Ok(report)
    }

    fn process_entry(&mut self, key: String, value: Value) -> Result<(String, String), ConfigError> {
        let Value::String(raw) = value else {
            return Err(ConfigError::NotAString(key));
        };
        if !is_valid_name(&key) {
            return Err(ConfigError::InvalidName(key));
        }

        let expanded = substitute(&raw, &self.scratch)
            .map_err(|source| ConfigError::Substitution {
                key: key.clone(),
                source,
            })?;
        self.scratch.set(&key, &expanded);
        Ok((key, expanded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(content: &str) -> Result<LoadReport, ConfigError> {
        let mut base = Environment::new();
        base.set("HOME", "/home/test");
        ConfigLoader::new(&base).load_str(content)
    }

    #[test]
    fn test_entries_keep_file_order() -> Result<(), ConfigError> {
        let report = load(r#"{"ZED": "1", "ALPHA": "2", "MID": "3"}"#)?;
        let names: Vec<&str> = report.entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, vec!["ZED", "ALPHA", "MID"]);
        Ok(())
    }

    #[test]
    fn test_values_see_earlier_entries() -> Result<(), ConfigError> {
        let report = load(
            r#"{"BIN": "${HOME}/bin", "TOOLS": "${BIN}/tools", "LATE": "${NEXT}", "NEXT": "x"}"#,
        )?;
        assert_eq!(
            report.entries,
            vec![
                ("BIN".to_string(), "/home/test/bin".to_string()),
                ("TOOLS".to_string(), "/home/test/bin/tools".to_string()),
                ("LATE".to_string(), String::new()),
                ("NEXT".to_string(), "x".to_string()),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_rejected_entries_are_skipped() -> Result<(), ConfigError> {
        let report = load(
            r#"{"NUM": 5, "bad-key": "x", "REF": "${a b}", "GOOD": "ok", "LIST": ["a"]}"#,
        )?;
        assert_eq!(report.entries, vec![("GOOD".to_string(), "ok".to_string())]);
        assert_eq!(report.rejected.len(), 4);
        assert!(matches!(&report.rejected[0], ConfigError::NotAString(k) if k == "NUM"));
        assert!(matches!(&report.rejected[1], ConfigError::InvalidName(k) if k == "bad-key"));
        assert!(matches!(&report.rejected[2], ConfigError::Substitution { key, .. } if key == "REF"));
        assert!(matches!(&report.rejected[3], ConfigError::NotAString(k) if k == "LIST"));
        Ok(())
    }

    #[test]
    fn test_non_object_is_invalid() {
        assert!(matches!(load("[1, 2]"), Err(ConfigError::InvalidFormat)));
        assert!(matches!(load("PROMPT: x"), Err(ConfigError::InvalidFormat)));
    }
}
