//! Subscriber setup for binaries and test harnesses.
//!
//! Installs a global `tracing` subscriber with an `EnvFilter`, a console
//! layer and, when `LogConfig::log_file` is set, a plain-text file layer.

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LogConfig;
use crate::error::ConfigError;

/// Install the global subscriber described by `config`.
///
/// # Errors
///
/// Fails if the filter directive does not parse, the log file cannot be
/// opened, or a global subscriber is already installed.
pub fn init(config: &LogConfig) -> Result<(), ConfigError> {
    let filter = EnvFilter::try_new(&config.level).map_err(|e| ConfigError::Logging {
        message: format!("invalid filter '{}': {e}", config.level),
    })?;

    let file_layer = match &config.log_file {
        Some(path) => {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(dir).map_err(|e| ConfigError::Logging {
                    message: format!("cannot create {}: {e}", dir.display()),
                })?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| ConfigError::Logging {
                    message: format!("cannot open {}: {e}", path.display()),
                })?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .with(file_layer)
        .try_init()
        .map_err(|e| ConfigError::Logging {
            message: e.to_string(),
        })?;

    tracing::info!(log_file = ?config.log_file, "logging configured");
    Ok(())
}
