use crate::error::ShellError;

#[derive(Debug, Clone)]
pub struct Flag {
    pub name: &'static str,
    pub short: &'static str,
    pub long: &'static str,
    pub description: &'static str,
    pub takes_value: bool,
    pub value: Option<String>,
}

impl Flag {
    const fn new(
        name: &'static str,
        short: &'static str,
        long: &'static str,
        description: &'static str,
        takes_value: bool,
    ) -> Self {
        Self {
            name,
            short,
            long,
            description,
            takes_value,
            value: None,
        }
    }

    fn matches(&self, arg: &str) -> bool {
        arg == self.short || arg == self.long
    }
}

/// Command-line switches of the `mysh` binary, in help order.
#[derive(Debug, Clone)]
pub struct Flags {
    flags: Vec<Flag>,
}

impl Default for Flags {
    fn default() -> Self {
        Self::new()
    }
}

impl Flags {
    pub fn new() -> Self {
        Flags {
            flags: vec![
                Flag::new("help", "-h", "--help", "Print this help message", false),
                Flag::new("version", "-v", "--version", "Show version information", false),
                Flag::new("config", "-c", "--config", "Read variables from this rc file", true),
                Flag::new("quiet", "-q", "--quiet", "Do not report rejected rc entries", false),
                Flag::new("debug", "-d", "--debug", "Enable debug logging", false),
            ],
        }
    }

    pub fn parse(&mut self, args: &[String]) -> Result<(), ShellError> {
        let mut args = args.iter();
        while let Some(arg) = args.next() {
            let Some(flag) = self.flags.iter_mut().find(|flag| flag.matches(arg)) else {
                continue;
            };

            if flag.takes_value {
                let value = args
                    .next()
                    .ok_or_else(|| ShellError::FlagError(format!("{} requires a value", arg)))?;
                flag.value = Some(value.clone());
            } else {
                flag.value = Some("true".to_string());
            }
        }
        Ok(())
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.get_value(name).is_some()
    }

    pub fn get_value(&self, name: &str) -> Option<&String> {
        self.flags
            .iter()
            .find(|flag| flag.name == name)
            .and_then(|flag| flag.value.as_ref())
    }

    pub fn help(&self) -> String {
        let mut help = String::from("Usage: mysh [OPTIONS]\n\nOptions:\n");
        for flag in &self.flags {
            let long = if flag.takes_value {
                format!("{} <path>", flag.long)
            } else {
                flag.long.to_string()
            };
            help.push_str(&format!("  {}, {:<17} {}\n", flag.short, long, flag.description));
        }
        help
    }

    pub fn print_help(&self) {
        print!("{}", self.help());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_switches() -> Result<(), ShellError> {
        let mut flags = Flags::new();
        flags.parse(&strings(&["-q", "--debug"]))?;
        assert!(flags.is_set("quiet"));
        assert!(flags.is_set("debug"));
        assert!(!flags.is_set("help"));
        Ok(())
    }

    #[test]
    fn test_config_value() -> Result<(), ShellError> {
        let mut flags = Flags::new();
        flags.parse(&strings(&["--config", "/tmp/rc.json"]))?;
        assert_eq!(flags.get_value("config").map(String::as_str), Some("/tmp/rc.json"));
        Ok(())
    }

    #[test]
    fn test_missing_value() {
        let mut flags = Flags::new();
        assert!(matches!(
            flags.parse(&strings(&["-c"])),
            Err(ShellError::FlagError(_))
        ));
    }

    #[test]
    fn test_unknown_options_are_ignored() -> Result<(), ShellError> {
        let mut flags = Flags::new();
        flags.parse(&strings(&["--nope", "-q"]))?;
        assert!(flags.is_set("quiet"));
        Ok(())
    }

    #[test]
    fn test_help_lists_every_flag() {
        let help = Flags::new().help();
        for option in ["--help", "--version", "--config <path>", "--quiet", "--debug"] {
            assert!(help.contains(option), "missing {}", option);
        }
    }
}
