use phasor_runtime::LogConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

pub const CONFIG_PATH_ENV: &str = "PHASOR_BACKEND_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "/config/config.yaml";
pub const VERSION_ENV: &str = "VERSION";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Uniquement via la variable d'env VERSION, jamais depuis le fichier
    #[serde(skip)]
    pub version: String,
    pub environment: String,
    pub port: u16,
    pub log_config: LogConfig,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            version: String::new(),
            environment: "production".into(),
            port: 8080,
            log_config: LogConfig::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file path must be absolute: {0}")]
    PathNotAbsolute(PathBuf),
    #[error("failed to open config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to decode config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to decode config: file is empty")]
    Empty,
    #[error("VERSION environment variable is required")]
    VersionRequired,
}

/// Charge la config depuis `path` + la version depuis l'env VERSION
pub async fn load(path: impl AsRef<Path>) -> Result<BackendConfig, ConfigError> {
    load_with_version(path, std::env::var(VERSION_ENV).ok()).await
}

pub async fn load_with_version(
    path: impl AsRef<Path>,
    version: Option<String>,
) -> Result<BackendConfig, ConfigError> {
    let path = path.as_ref();
    if !path.is_absolute() {
        return Err(ConfigError::PathNotAbsolute(path.to_path_buf()));
    }

    let txt = fs::read_to_string(path).await?;
    if txt.trim().is_empty() {
        return Err(ConfigError::Empty);
    }
    let mut cfg = serde_yaml::from_str::<BackendConfig>(&txt)?;

    cfg.version = version
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::VersionRequired)?;
    Ok(cfg)
}
