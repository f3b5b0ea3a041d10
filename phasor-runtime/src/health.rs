use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::time::Instant;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub environment: String,
    pub uptime_seconds: u64,
}

#[derive(Clone)]
pub struct HealthTracker {
    start_time: Instant,
    version: Option<String>,
    environment: String,
}

impl HealthTracker {
    pub fn new(environment: impl Into<String>) -> Self {
        Self {
            start_time: Instant::now(),
            version: None,
            environment: environment.into(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn report(&self) -> HealthReport {
        HealthReport {
            status: "ok".to_string(),
            version: self.version.clone(),
            environment: self.environment.clone(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// Routes à monter sous `/health`
    pub fn routes(self) -> Router {
        Router::new()
            .route("/live", get(live))
            .route("/ready", get(ready))
            .with_state(self)
    }
}

// GET /health/live
async fn live(State(tracker): State<HealthTracker>) -> Json<HealthReport> {
    Json(tracker.report())
}

// GET /health/ready (aucune dépendance à vérifier, le process qui répond est prêt)
async fn ready(State(tracker): State<HealthTracker>) -> Json<HealthReport> {
    Json(tracker.report())
}
