//! Client and logging configuration.
//!
//! Configuration is resolved once, before a client exists. A `.env` file in
//! the working directory is loaded first if present; real environment
//! variables win over it.
//!
//! ## Variables
//!
//! - `API_BASE_URL` - base URL of the REST API (required, `http` or `https`)
//! - `RUST_LOG` - log filter (default: `info`)
//! - `API_LOG_FILE` - write logs to this file as well as the console
//! - `API_LOG_DIR` - write logs to `app_<timestamp>.log` in this directory
//!   (ignored when `API_LOG_FILE` is set)

use std::env;
use std::path::PathBuf;

use url::Url;

use crate::error::ConfigError;

pub const BASE_URL_VAR: &str = "API_BASE_URL";
pub const LOG_FILE_VAR: &str = "API_LOG_FILE";
pub const LOG_DIR_VAR: &str = "API_LOG_DIR";

/// Validated settings for a `RestClient`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
}

impl ClientConfig {
    /// Validate `base_url` and normalize away any trailing slash.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::MissingBaseUrl);
        }

        let parsed = Url::parse(trimmed).map_err(|e| ConfigError::InvalidBaseUrl {
            value: trimmed.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                value: trimmed.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(ConfigError::InvalidBaseUrl {
                value: trimmed.to_string(),
                reason: "query and fragment are not allowed".to_string(),
            });
        }

        Ok(Self {
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// Load from `.env` and the process environment.
    ///
    /// # Errors
    ///
    /// Returns `MissingBaseUrl` when `API_BASE_URL` is absent. There is no
    /// fallback URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw = lookup(BASE_URL_VAR).ok_or(ConfigError::MissingBaseUrl)?;
        Self::new(&raw)
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Where and how verbosely to log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `info` or `rest_client=debug`.
    pub level: String,
    pub log_file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_file: None,
        }
    }
}

impl LogConfig {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let level = lookup("RUST_LOG")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "info".to_string());

        let log_file = lookup(LOG_FILE_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .or_else(|| {
                lookup(LOG_DIR_VAR)
                    .filter(|v| !v.trim().is_empty())
                    .map(|dir| PathBuf::from(dir).join(timestamped_log_name()))
            });

        Self { level, log_file }
    }
}

fn timestamped_log_name() -> String {
    format!("app_{}.log", chrono::Local::now().format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let config = ClientConfig::new("http://localhost:3000/").unwrap();
        assert_eq!(config.base_url(), "http://localhost:3000");
    }

    #[test]
    fn base_path_is_kept() {
        let config = ClientConfig::new("https://example.com/api/v1/").unwrap();
        assert_eq!(config.base_url(), "https://example.com/api/v1");
    }

    #[test]
    fn empty_base_url_is_missing() {
        assert!(matches!(
            ClientConfig::new("  "),
            Err(ConfigError::MissingBaseUrl)
        ));
    }

    #[test]
    fn relative_base_url_is_rejected() {
        let err = ClientConfig::new("localhost/api").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let err = ClientConfig::new("ftp://example.com").unwrap_err();
        match err {
            ConfigError::InvalidBaseUrl { reason, .. } => assert!(reason.contains("ftp")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn query_string_is_rejected() {
        let err = ClientConfig::new("https://example.com/?key=1").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn missing_variable_is_fatal() {
        let err = ClientConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingBaseUrl));
    }

    #[test]
    fn variable_is_read() {
        let config = ClientConfig::from_lookup(lookup(&[(
            BASE_URL_VAR,
            "https://jsonplaceholder.typicode.com",
        )]))
        .unwrap();
        assert_eq!(config.base_url(), "https://jsonplaceholder.typicode.com");
    }

    #[test]
    fn log_config_defaults_to_console_info() {
        let config = LogConfig::from_lookup(lookup(&[]));
        assert_eq!(config, LogConfig::default());
    }

    #[test]
    fn log_file_wins_over_log_dir() {
        let config = LogConfig::from_lookup(lookup(&[
            ("RUST_LOG", "debug"),
            (LOG_FILE_VAR, "/tmp/client.log"),
            (LOG_DIR_VAR, "/tmp/logs"),
        ]));
        assert_eq!(config.level, "debug");
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/client.log")));
    }

    #[test]
    fn log_dir_gets_timestamped_name() {
        let config = LogConfig::from_lookup(lookup(&[(LOG_DIR_VAR, "logs")]));
        let path = config.log_file.unwrap();
        assert_eq!(path.parent(), Some(std::path::Path::new("logs")));
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("app_"));
        assert!(name.ends_with(".log"));
    }
}
