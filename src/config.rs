//! Application configuration.
//!
//! Values are resolved with priority: `config.toml` > `.env` / environment > defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file read from the working directory
pub const CONFIG_FILE: &str = "config.toml";

/// Environment variable naming the default deck file
pub const DECK_ENV: &str = "FLASHDECK_DECK";

/// Environment variable overriding the log filter
pub const LOG_ENV: &str = "FLASHDECK_LOG";

/// Log filter used when nothing else is configured
pub const DEFAULT_LOG_FILTER: &str = "flashdeck=info";

/// Structure of config.toml
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    deck: Option<DeckSection>,
    log: Option<LogSection>,
}

#[derive(Debug, Default, Deserialize)]
struct DeckSection {
    path: Option<String>,
    auto_save: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct LogSection {
    filter: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Deck used when a command is given no path
    pub deck_path: Option<PathBuf>,
    pub log_filter: String,
    /// Save the deck after every rating during study
    pub auto_save: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            deck_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            auto_save: true,
        }
    }
}

impl Config {
    /// Load from `config.toml` in the working directory and the process environment.
    pub fn load() -> Self {
        // Load .env file if present
        let _ = dotenvy::dotenv();
        Self::load_with(Path::new(CONFIG_FILE), |key| std::env::var(key).ok())
    }

    /// Resolve configuration from `config_path` and an environment lookup.
    pub fn load_with(config_path: &Path, env: impl Fn(&str) -> Option<String>) -> Self {
        let file = match std::fs::read_to_string(config_path) {
            Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
                Ok(parsed) => parsed,
                Err(e) => {
                    // tracing is not initialised yet when config loads
                    eprintln!("Ignoring invalid {}: {}", config_path.display(), e);
                    ConfigFile::default()
                }
            },
            Err(_) => ConfigFile::default(),
        };

        let deck = file.deck.unwrap_or_default();
        let log = file.log.unwrap_or_default();
        let defaults = Config::default();

        Self {
            deck_path: deck.path.or_else(|| env(DECK_ENV)).map(PathBuf::from),
            log_filter: log
                .filter
                .or_else(|| env(LOG_ENV))
                .unwrap_or(defaults.log_filter),
            auto_save: deck.auto_save.unwrap_or(defaults.auto_save),
        }
    }

    /// Pick the deck from the command line, falling back to the configured one.
    pub fn resolve_deck(&self, arg: Option<PathBuf>) -> Option<PathBuf> {
        arg.or_else(|| self.deck_path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_file_or_env() {
        let temp = TempDir::new().unwrap();
        let config = Config::load_with(&temp.path().join(CONFIG_FILE), env_from(&[]));
        assert_eq!(config, Config::default());
        assert!(config.auto_save);
        assert_eq!(config.log_filter, "flashdeck=info");
    }

    #[test]
    fn test_env_fills_missing_values() {
        let temp = TempDir::new().unwrap();
        let config = Config::load_with(
            &temp.path().join(CONFIG_FILE),
            env_from(&[(DECK_ENV, "cards.json"), (LOG_ENV, "flashdeck=debug")]),
        );
        assert_eq!(config.deck_path, Some(PathBuf::from("cards.json")));
        assert_eq!(config.log_filter, "flashdeck=debug");
    }

    #[test]
    fn test_file_takes_priority_over_env() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        std::fs::write(
            &path,
            r#"
            [deck]
            path = "from-file.json"
            auto_save = false

            [log]
            filter = "flashdeck=trace"
            "#,
        )
        .unwrap();

        let config = Config::load_with(&path, env_from(&[(DECK_ENV, "from-env.json")]));
        assert_eq!(config.deck_path, Some(PathBuf::from("from-file.json")));
        assert_eq!(config.log_filter, "flashdeck=trace");
        assert!(!config.auto_save);
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        std::fs::write(&path, "[deck\npath = ").unwrap();

        let config = Config::load_with(&path, env_from(&[(DECK_ENV, "env.json")]));
        assert_eq!(config.deck_path, Some(PathBuf::from("env.json")));
    }

    #[test]
    fn test_resolve_deck_prefers_argument() {
        let config = Config {
            deck_path: Some(PathBuf::from("configured.json")),
            ..Config::default()
        };
        assert_eq!(
            config.resolve_deck(Some(PathBuf::from("arg.json"))),
            Some(PathBuf::from("arg.json"))
        );
        assert_eq!(config.resolve_deck(None), Some(PathBuf::from("configured.json")));
        assert_eq!(Config::default().resolve_deck(None), None);
    }
}
