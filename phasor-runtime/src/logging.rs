//! Logging setup
//!
//! Each service carries a `log_config` block in its YAML file:
//!
//! ```yaml
//! log_config:
//!   level: "info"      # trace, debug, info, warn, error
//!   format: "json"     # json, text
//!   add_source: false  # file + line in every record
//! ```
//!
//! `RUST_LOG` still wins over `level` when it is set.

use serde::Deserialize;
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub format: LogFormat,
    pub add_source: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Json,
            add_source: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log level: {0}")]
    InvalidLevel(String),
    #[error("failed to install log subscriber: {0}")]
    Install(String),
}

impl LogConfig {
    /// Parse `level`, accepting "warning" as an alias of "warn"
    pub fn parsed_level(&self) -> Result<Level, LoggingError> {
        let raw = self.level.trim().to_ascii_lowercase();
        let raw = if raw == "warning" { "warn".to_string() } else { raw };
        raw.parse::<Level>()
            .map_err(|_| LoggingError::InvalidLevel(self.level.clone()))
    }
}

/// Installs the global tracing subscriber. Calling it twice is an error, not a panic.
pub fn init_logging(cfg: &LogConfig) -> Result<(), LoggingError> {
    let level = cfg.parsed_level()?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_ascii_lowercase()));

    let builder = fmt()
        .with_env_filter(filter)
        .with_file(cfg.add_source)
        .with_line_number(cfg.add_source);

    let installed = match cfg.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
    installed.map_err(|e| LoggingError::Install(e.to_string()))
}
