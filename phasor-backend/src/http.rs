/**
 * API HTTP BACKEND - Routes du service d'infos d'instance
 *
 * RÔLE :
 * Expose l'identité du process courant pour le dashboard.
 *
 * ROUTES :
 * - GET /instance/info  → InstanceInfo JSON
 * - GET /health/live    → liveness
 * - GET /health/ready   → readiness
 *
 * Toutes les requêtes passent par le middleware de logs (span + trace id).
 */

use crate::instance::{self, HostnameProvider, InstanceService, INSTANCE_INFO_PATH};
use axum::{middleware, routing::get, Router};
use phasor_runtime::{recover_panic, request_logger, HealthTracker};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppOptions {
    pub version: String,
    pub environment: String,
    pub hostname: HostnameProvider,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            version: "unknown".into(),
            environment: "production".into(),
            hostname: Arc::new(instance::system_hostname),
        }
    }
}

impl AppOptions {
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    pub fn with_hostname<F>(mut self, provider: F) -> Self
    where
        F: Fn() -> std::io::Result<String> + Send + Sync + 'static,
    {
        self.hostname = Arc::new(provider);
        self
    }
}

pub fn build_router(options: AppOptions) -> Router {
    let service = InstanceService::new(options.version.clone(), &options.hostname);
    let health = HealthTracker::new(options.environment).with_version(options.version);

    Router::new()
        .route(INSTANCE_INFO_PATH, get(instance::get_instance_info))
        .with_state(service)
        .nest("/health", health.routes())
        .layer(middleware::from_fn(request_logger))
        .layer(middleware::from_fn(recover_panic))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::InstanceInfo;
    use phasor_devkit::spawn_app;
    use std::time::Duration;

    fn options(version: &str) -> AppOptions {
        AppOptions::default()
            .with_version(version)
            .with_environment("test")
            .with_hostname(|| Ok("test-host".to_string()))
    }

    async fn fetch(url: &str) -> InstanceInfo {
        reqwest::get(url).await.unwrap().json().await.unwrap()
    }

    #[tokio::test]
    async fn test_returns_instance_info_with_all_fields() {
        let server = spawn_app(build_router(options("1.2.3"))).await.unwrap();

        let resp = reqwest::get(server.url(INSTANCE_INFO_PATH)).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], "application/json");

        let info: InstanceInfo = resp.json().await.unwrap();
        assert_eq!(info.version, "1.2.3");
        assert_eq!(info.hostname, "test-host");
        assert!(!info.runtime_version.is_empty());
        assert!(!info.uptime.is_empty());
    }

    #[tokio::test]
    async fn test_consistent_hostname_and_advancing_uptime() {
        let server = spawn_app(build_router(AppOptions::default().with_version("1.0.0")))
            .await
            .unwrap();
        let url = server.url(INSTANCE_INFO_PATH);

        let first = fetch(&url).await;
        tokio::time::sleep(Duration::from_millis(100)).await;
        let second = fetch(&url).await;

        assert_eq!(first.hostname, second.hostname);
        assert_ne!(first.uptime, second.uptime);
        assert!(second.timestamp > first.timestamp);
    }

    #[tokio::test]
    async fn test_empty_version_is_served_as_is() {
        let server = spawn_app(build_router(options(""))).await.unwrap();

        let info = fetch(&server.url(INSTANCE_INFO_PATH)).await;
        assert!(info.version.is_empty());
    }

    #[tokio::test]
    async fn test_health_reports_version() {
        let server = spawn_app(build_router(options("2.0.0"))).await.unwrap();

        for path in ["/health/live", "/health/ready"] {
            let resp = reqwest::get(server.url(path)).await.unwrap();
            assert_eq!(resp.status(), reqwest::StatusCode::OK);
            let body: serde_json::Value = resp.json().await.unwrap();
            assert_eq!(body["version"], "2.0.0");
            assert_eq!(body["environment"], "test");
        }
    }
}
