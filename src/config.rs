use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use crate::io::DEFAULT_PROMPT;

/// Where the program text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Code given on the command line; parts are concatenated.
    Inline(Vec<String>),
    /// Files read and concatenated in order.
    Files(Vec<PathBuf>),
    /// Everything available on stdin.
    Stdin,
}

impl Source {
    /// Slurp the whole program text before execution begins.
    pub fn load(&self) -> io::Result<String> {
        match self {
            Source::Inline(parts) => Ok(parts.concat()),
            Source::Files(paths) => {
                let mut text = String::new();
                for path in paths {
                    text.push_str(&fs::read_to_string(path)?);
                }
                Ok(text)
            }
            Source::Stdin => {
                let mut text = String::new();
                io::stdin().lock().read_to_string(&mut text)?;
                Ok(text)
            }
        }
    }
}

/// Settings that may come from a flag or the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub prompt: Option<String>,
    pub debug: bool,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub source: Source,
    /// Cue shown before each `,` read; empty disables it.
    pub prompt: String,
    /// Print a step table instead of performing I/O.
    pub debug: bool,
}

impl Config {
    /// Resolve settings: flags -> env -> defaults.
    pub fn resolve(source: Source, flags: Overrides) -> Self {
        Self::resolve_with(source, flags, |key| std::env::var(key).ok())
    }

    pub fn resolve_with<F>(source: Source, flags: Overrides, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let prompt = flags
            .prompt
            .or_else(|| env("BF_PROMPT"))
            .unwrap_or_else(|| DEFAULT_PROMPT.to_string());
        let debug = flags.debug || env("BF_DEBUG").as_deref() == Some("1");

        Self {
            source,
            prompt,
            debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_apply_without_flags_or_env() {
        let cfg = Config::resolve_with(Source::Stdin, Overrides::default(), no_env);
        assert_eq!(cfg.prompt, DEFAULT_PROMPT);
        assert!(!cfg.debug);
    }

    #[test]
    fn env_overrides_defaults() {
        let env = |key: &str| match key {
            "BF_PROMPT" => Some("? ".to_string()),
            "BF_DEBUG" => Some("1".to_string()),
            _ => None,
        };
        let cfg = Config::resolve_with(Source::Stdin, Overrides::default(), env);
        assert_eq!(cfg.prompt, "? ");
        assert!(cfg.debug);
    }

    #[test]
    fn flags_override_env() {
        let env = |key: &str| (key == "BF_PROMPT").then(|| "? ".to_string());
        let flags = Overrides {
            prompt: Some(String::new()),
            debug: false,
        };
        let cfg = Config::resolve_with(Source::Stdin, flags, env);
        assert_eq!(cfg.prompt, "");
    }

    #[test]
    fn inline_parts_are_concatenated() {
        let source = Source::Inline(vec!["++".into(), "+.".into()]);
        assert_eq!(source.load().unwrap(), "+++.");
    }

    #[test]
    fn files_are_concatenated_in_order() {
        let mut a = tempfile::NamedTempFile::new().unwrap();
        let mut b = tempfile::NamedTempFile::new().unwrap();
        write!(a, "+++\n").unwrap();
        write!(b, "[-]").unwrap();
        let source = Source::Files(vec![a.path().to_path_buf(), b.path().to_path_buf()]);
        assert_eq!(source.load().unwrap(), "+++\n[-]");
    }

    #[test]
    fn missing_file_is_an_error() {
        let source = Source::Files(vec![PathBuf::from("/definitely/not/here.bf")]);
        assert!(source.load().is_err());
    }
}
