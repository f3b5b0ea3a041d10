//! Instance info
//!
//! The hostname is resolved once, when the service is built, and then served for the
//! whole life of the process. Uptime and timestamp are computed per call.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use time::OffsetDateTime;
use tracing::warn;

pub const INSTANCE_INFO_PATH: &str = "/instance/info";
pub const UNKNOWN_HOSTNAME: &str = "unknown";
pub const RUNTIME_VERSION: &str = env!("PHASOR_RUSTC_VERSION");

/// Fonction de résolution du hostname, injectable pour les tests
pub type HostnameProvider = Arc<dyn Fn() -> std::io::Result<String> + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceInfo {
    pub version: String,
    pub hostname: String,
    /// Human-readable, e.g. "1h 2m 3s 4ms"
    pub uptime: String,
    pub runtime_version: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct InstanceService {
    version: String,
    hostname: String,
    started: Instant,
}

impl InstanceService {
    pub fn new(version: impl Into<String>, hostname: &HostnameProvider) -> Self {
        let hostname = match hostname() {
            Ok(h) if !h.trim().is_empty() => h,
            Ok(_) => UNKNOWN_HOSTNAME.to_string(),
            Err(e) => {
                warn!(error = %e, "failed to resolve hostname");
                UNKNOWN_HOSTNAME.to_string()
            }
        };

        Self {
            version: version.into(),
            hostname,
            started: Instant::now(),
        }
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn snapshot(&self) -> InstanceInfo {
        InstanceInfo {
            version: self.version.clone(),
            hostname: self.hostname.clone(),
            uptime: format_uptime(self.started.elapsed()),
            runtime_version: RUNTIME_VERSION.to_string(),
            timestamp: OffsetDateTime::now_utc(),
        }
    }
}

pub fn system_hostname() -> std::io::Result<String> {
    hostname::get().map(|h| h.to_string_lossy().into_owned())
}

/// Millisecond precision so two calls a few ms apart still differ
pub fn format_uptime(elapsed: Duration) -> String {
    let truncated = Duration::from_millis(elapsed.as_millis() as u64);
    humantime::format_duration(truncated).to_string()
}

// GET /instance/info
pub async fn get_instance_info(State(service): State<InstanceService>) -> Json<InstanceInfo> {
    Json(service.snapshot())
}
