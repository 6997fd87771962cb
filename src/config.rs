//! Runtime configuration from environment variables.
//!
//! | Variable                   | Default                     |
//! |----------------------------|-----------------------------|
//! | `MEDIPREDICT_API_URL`      | `http://localhost:5000/api` |
//! | `MEDIPREDICT_TIMEOUT_SECS` | none (transport default)    |
//! | `MEDIPREDICT_LOG_MODE`     | `auto`                      |
//! | `MEDIPREDICT_LOG_FILE`     | `medipredict.log`           |

use std::path::PathBuf;
use std::time::Duration;

pub const API_URL_ENV: &str = "MEDIPREDICT_API_URL";
pub const TIMEOUT_ENV: &str = "MEDIPREDICT_TIMEOUT_SECS";
pub const LOG_MODE_ENV: &str = "MEDIPREDICT_LOG_MODE";
pub const LOG_FILE_ENV: &str = "MEDIPREDICT_LOG_FILE";

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
const DEFAULT_LOG_FILE: &str = "medipredict.log";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be an http:// or https:// URL, got {value:?}")]
    InvalidUrl { var: &'static str, value: String },

    #[error("{var} must be a positive integer number of seconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },

    #[error("{var} must be one of auto, file, stdout; got {value:?}")]
    InvalidLogMode { var: &'static str, value: String },
}

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// File when attached to a terminal, stdout otherwise
    Auto,
    File,
    Stdout,
}

impl LogMode {
    /// Resolve `Auto` against whether stdout is interactive.
    #[must_use]
    pub fn use_file(&self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

/// Prediction backend settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Origin plus base path, without trailing slash
    pub base_url: String,
    /// Transport timeout; `None` leaves it to the OS
    pub timeout: Option<Duration>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: None,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub mode: LogMode,
    pub file: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            mode: LogMode::Auto,
            file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub api: ApiConfig,
    pub log: LogConfig,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    /// Returns error if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    /// Returns error if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = match get(API_URL_ENV) {
            Some(raw) => parse_base_url(&raw)?,
            None => DEFAULT_API_URL.to_string(),
        };

        let timeout = get(TIMEOUT_ENV)
            .map(|raw| match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
                _ => Err(ConfigError::InvalidTimeout {
                    var: TIMEOUT_ENV,
                    value: raw,
                }),
            })
            .transpose()?;

        let mode = match get(LOG_MODE_ENV).as_deref().map(str::trim) {
            None | Some("auto") => LogMode::Auto,
            Some("file") => LogMode::File,
            Some("stdout") => LogMode::Stdout,
            Some(other) => {
                return Err(ConfigError::InvalidLogMode {
                    var: LOG_MODE_ENV,
                    value: other.to_string(),
                })
            }
        };

        let file = get(LOG_FILE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

        Ok(Self {
            api: ApiConfig { base_url, timeout },
            log: LogConfig { mode, file },
        })
    }
}

fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let has_host = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .is_some_and(|rest| !rest.is_empty());

    if has_host {
        Ok(trimmed.to_string())
    } else {
        Err(ConfigError::InvalidUrl {
            var: API_URL_ENV,
            value: raw.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).expect("Should load");
        assert_eq!(config, Config::default());
        assert_eq!(config.api.base_url, "http://localhost:5000/api");
        assert!(config.api.timeout.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            (API_URL_ENV, "https://predict.example.org/api/"),
            (TIMEOUT_ENV, "15"),
            (LOG_MODE_ENV, "stdout"),
            (LOG_FILE_ENV, "/tmp/mp.log"),
        ])
        .expect("Should load");

        assert_eq!(config.api.base_url, "https://predict.example.org/api");
        assert_eq!(config.api.timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.log.mode, LogMode::Stdout);
        assert_eq!(config.log.file, PathBuf::from("/tmp/mp.log"));
    }

    #[test]
    fn test_invalid_values_name_the_variable() {
        let err = load(&[(API_URL_ENV, "localhost:5000")]).unwrap_err();
        assert!(err.to_string().contains(API_URL_ENV));

        let err = load(&[(TIMEOUT_ENV, "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout { .. }));

        let err = load(&[(LOG_MODE_ENV, "syslog")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogMode { .. }));
    }

    #[test]
    fn test_log_mode_resolution() {
        assert!(LogMode::Auto.use_file(true));
        assert!(!LogMode::Auto.use_file(false));
        assert!(LogMode::File.use_file(false));
        assert!(!LogMode::Stdout.use_file(true));
    }
}
