/**
 * API HTTP FRONTEND - Dashboard des instances
 *
 * RÔLE :
 * Sert la page du dashboard et le fragment de tuiles, construit à chaque requête
 * en interrogeant le backend d'infos d'instance.
 *
 * ROUTES :
 * - GET /              → page index (3 tuiles par défaut)
 * - GET /tiles?count=N → fragment HTML, N borné à [1, 20], 3 si invalide (jamais de 4xx)
 * - GET /health/live, /health/ready
 *
 * Un backend en panne ne casse jamais la page : chaque tuile dégrade seule.
 */

use crate::models::IndexView;
use crate::render::{render_index, render_tiles};
use crate::source::{HttpInstanceSource, SourceError, DEFAULT_REQUEST_TIMEOUT};
use crate::tiles::{aggregate, FetchMode, TileCount, DEFAULT_TILE_COUNT};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Html;
use axum::{middleware, routing::get, Router};
use phasor_runtime::{recover_panic, request_logger, HealthTracker};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppOptions {
    pub backend_url: String,
    pub tile_colors: Vec<String>,
    pub environment: String,
    pub fetch_mode: FetchMode,
    pub request_timeout: Duration,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8080/instance/info".into(),
            tile_colors: vec!["#667eea".into(), "#f093fb".into(), "#4facfe".into()],
            environment: "production".into(),
            fetch_mode: FetchMode::Sequential,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl AppOptions {
    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = url.into();
        self
    }

    pub fn with_tile_colors<I, C>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        self.tile_colors = colors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    pub fn with_fetch_mode(mut self, mode: FetchMode) -> Self {
        self.fetch_mode = mode;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

#[derive(Clone)]
pub struct AppState {
    pub source: HttpInstanceSource,
    pub palette: Arc<[String]>,
    pub fetch_mode: FetchMode,
}

pub fn build_router(options: AppOptions) -> Result<Router, SourceError> {
    let source = HttpInstanceSource::new(&options.backend_url, options.request_timeout)?;
    let state = AppState {
        source,
        palette: options.tile_colors.into(),
        fetch_mode: options.fetch_mode,
    };
    let health = HealthTracker::new(options.environment);

    Ok(Router::new()
        .route("/", get(index))
        .route("/tiles", get(tiles))
        .with_state(state)
        .nest("/health", health.routes())
        .layer(middleware::from_fn(request_logger))
        .layer(middleware::from_fn(recover_panic)))
}

// GET /
async fn index() -> Html<String> {
    Html(render_index(IndexView {
        count: DEFAULT_TILE_COUNT,
    }))
}

// GET /tiles?count=N
async fn tiles(
    State(app): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Html<String> {
    let pairs = query.map(|Query(pairs)| pairs).unwrap_or_default();
    let count = TileCount::from_query(first_value(&pairs, "count"));
    let tiles = aggregate(&app.source, count, &app.palette, app.fetch_mode).await;
    Html(render_tiles(&tiles))
}

/// Première valeur pour `key`, les doublons suivants sont ignorés
fn first_value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = AppOptions::default();
        assert_eq!(options.backend_url, "http://localhost:8080/instance/info");
        assert_eq!(options.tile_colors.len(), 3);
        assert_eq!(options.fetch_mode, FetchMode::Sequential);
    }

    #[test]
    fn test_invalid_backend_url_fails_router_build() {
        let options = AppOptions::default().with_backend_url("::not-a-url::");
        assert!(matches!(build_router(options), Err(SourceError::InvalidUrl { .. })));
    }

    #[test]
    fn test_first_value_wins_on_repeated_key() {
        let pairs = vec![
            ("other".to_string(), "1".to_string()),
            ("count".to_string(), "2".to_string()),
            ("count".to_string(), "5".to_string()),
        ];
        assert_eq!(first_value(&pairs, "count"), Some("2"));
        assert_eq!(first_value(&pairs, "missing"), None);
    }

    #[test]
    fn test_builder_overrides() {
        let options = AppOptions::default()
            .with_tile_colors(["#000"])
            .with_environment("test")
            .with_fetch_mode(FetchMode::Concurrent)
            .with_request_timeout(Duration::from_millis(10));
        assert_eq!(options.tile_colors, vec!["#000".to_string()]);
        assert_eq!(options.environment, "test");
        assert_eq!(options.fetch_mode, FetchMode::Concurrent);
        assert_eq!(options.request_timeout, Duration::from_millis(10));
    }
}
