use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ghibli_core::{BrowserSettings, MatchMode};
use ghibli_engine::{CharacterFailurePolicy, EngineConfig, FetchSettings, DEFAULT_BASE_URL};
use ghibli_logging::ghibli_info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

pub const DEFAULT_CONFIG_FILE: &str = "ghibli.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("invalid config {path:?}: {field} must be greater than zero")]
    Invalid { path: PathBuf, field: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CharacterFailures {
    #[default]
    Skip,
    Abort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SearchMode {
    #[default]
    Prefix,
    Contains,
}

/// Everything the binary can be told through `ghibli.ron`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_body_bytes: u64,
    pub character_failures: CharacterFailures,
    pub search_mode: SearchMode,
    pub spotlight_director: String,
    pub featured_title: String,
    pub log: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        let browser = BrowserSettings::default();
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
            max_body_bytes: fetch.max_bytes,
            character_failures: CharacterFailures::default(),
            search_mode: SearchMode::default(),
            spotlight_director: browser.spotlight_director,
            featured_title: browser.featured_title,
            log: LogDestination::default(),
        }
    }
}

impl AppConfig {
    /// Loads `path`, or `./ghibli.ron` when no path is given.
    ///
    /// Only a missing default file falls back to defaults; a missing explicit
    /// file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if !explicit && err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        let config: Self = ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        if let Some(field) = config.zero_limit() {
            return Err(ConfigError::Invalid { path, field });
        }
        ghibli_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Names the first fetch limit set to zero; such a limit fails every request.
    fn zero_limit(&self) -> Option<&'static str> {
        [
            ("connect_timeout_secs", self.connect_timeout_secs),
            ("request_timeout_secs", self.request_timeout_secs),
            ("max_body_bytes", self.max_body_bytes),
        ]
        .into_iter()
        .find(|(_, value)| *value == 0)
        .map(|(field, _)| field)
    }

    pub fn engine_config(&self) -> EngineConfig {
        let defaults = FetchSettings::default();
        EngineConfig {
            base_url: self.base_url.clone(),
            fetch: FetchSettings {
                connect_timeout: Duration::from_secs(self.connect_timeout_secs),
                request_timeout: Duration::from_secs(self.request_timeout_secs),
                max_bytes: self.max_body_bytes,
                ..defaults
            },
            character_failures: match self.character_failures {
                CharacterFailures::Skip => CharacterFailurePolicy::Skip,
                CharacterFailures::Abort => CharacterFailurePolicy::Abort,
            },
        }
    }

    pub fn browser_settings(&self, cover_seed: u64) -> BrowserSettings {
        BrowserSettings {
            search_mode: match self.search_mode {
                SearchMode::Prefix => MatchMode::Prefix,
                SearchMode::Contains => MatchMode::Contains,
            },
            spotlight_director: self.spotlight_director.clone(),
            featured_title: self.featured_title.clone(),
            cover_seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;
    use tempfile::{NamedTempFile, TempDir};

    use super::*;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let file = write_config(
            r#"(
                base_url: "http://localhost:8080",
                search_mode: Contains,
                character_failures: Abort,
            )"#,
        );
        let config = AppConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.search_mode, SearchMode::Contains);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.spotlight_director, "Miyazaki");
        assert_eq!(config.log, LogDestination::File);

        let engine = config.engine_config();
        assert_eq!(engine.character_failures, CharacterFailurePolicy::Abort);
        assert_eq!(engine.fetch.request_timeout, Duration::from_secs(30));
        assert_eq!(config.browser_settings(4).search_mode, MatchMode::Contains);
        assert_eq!(config.browser_settings(4).cover_seed, 4);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = AppConfig::load(Some(&dir.path().join("absent.ron"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let file = write_config("(base_url: 42");
        let err = AppConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn zero_limits_are_rejected() {
        let file = write_config("(request_timeout_secs: 0)");
        let err = AppConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "request_timeout_secs",
                ..
            }
        ));

        let file = write_config("(max_body_bytes: 0)");
        let err = AppConfig::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("max_body_bytes must be greater than zero"));
    }

    #[test]
    fn defaults_round_trip_through_ron() {
        let text = ron::ser::to_string_pretty(&AppConfig::default(), Default::default()).unwrap();
        let file = write_config(&text);
        assert_eq!(AppConfig::load(Some(file.path())).unwrap(), AppConfig::default());
    }
}
