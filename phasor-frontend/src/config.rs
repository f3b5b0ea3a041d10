use crate::tiles::FetchMode;
use phasor_runtime::LogConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tokio::fs;

pub const CONFIG_PATH_ENV: &str = "PHASOR_FRONTEND_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "/config/config.yaml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FrontendConfig {
    pub backend_url: String,
    pub tile_colors: Vec<String>,
    pub environment: String,
    pub port: u16,
    pub fetch_mode: FetchMode,
    pub request_timeout_ms: u64,
    pub log_config: LogConfig,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            backend_url: String::new(),
            tile_colors: Vec::new(),
            environment: "production".into(),
            port: 8081,
            fetch_mode: FetchMode::Sequential,
            request_timeout_ms: 3_000,
            log_config: LogConfig::default(),
        }
    }
}

impl FrontendConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
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
    #[error("backend_url is required")]
    BackendUrlRequired,
    #[error("tile_colors is required and must not be empty")]
    TileColorsRequired,
    #[error("request_timeout_ms must be greater than 0")]
    RequestTimeoutZero,
}

pub async fn load(path: impl AsRef<Path>) -> Result<FrontendConfig, ConfigError> {
    let path = path.as_ref();
    if !path.is_absolute() {
        return Err(ConfigError::PathNotAbsolute(path.to_path_buf()));
    }

    let txt = fs::read_to_string(path).await?;
    if txt.trim().is_empty() {
        return Err(ConfigError::Empty);
    }
    let cfg = serde_yaml::from_str::<FrontendConfig>(&txt)?;

    if cfg.backend_url.trim().is_empty() {
        return Err(ConfigError::BackendUrlRequired);
    }
    if cfg.tile_colors.is_empty() {
        return Err(ConfigError::TileColorsRequired);
    }
    if cfg.request_timeout_ms == 0 {
        return Err(ConfigError::RequestTimeoutZero);
    }
    Ok(cfg)
}
