/*!
Mock du backend d'instances

Remplace `phasor-backend` dans les tests du dashboard. Toutes les routes
répondent selon le `MockBehavior` choisi, et chaque appel est compté.
*/

use crate::app_server::{spawn_app, TestServer};
use anyhow::Result;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const MOCK_INFO_PATH: &str = "/instance/info";

#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// 200 avec le même JSON à chaque appel
    Fixed(Value),
    /// Cycle sur les réponses, dans l'ordre, en fonction du nombre d'appels
    Rotate(Vec<Value>),
    /// Status sans body
    Status(u16),
    /// 200 avec un body qui n'est pas du JSON
    Malformed,
    /// Attend avant d'appliquer le comportement suivant
    Slow(Duration, Box<MockBehavior>),
}

struct MockState {
    behavior: MockBehavior,
    hits: AtomicUsize,
}

pub struct MockBackend {
    server: TestServer,
    state: Arc<MockState>,
}

impl MockBackend {
    pub async fn start(behavior: MockBehavior) -> Result<Self> {
        let state = Arc::new(MockState {
            behavior,
            hits: AtomicUsize::new(0),
        });
        let router = Router::new().fallback(respond).with_state(state.clone());
        let server = spawn_app(router).await?;
        log::info!("🎭 mock backend ready on {}", server.addr());
        Ok(Self { server, state })
    }

    /// Backend qui renvoie toujours la même instance
    pub async fn instance(hostname: &str, version: &str) -> Result<Self> {
        Self::start(MockBehavior::Fixed(instance_json(hostname, version))).await
    }

    /// URL complète de l'API d'infos, à passer comme `backend_url`
    pub fn info_url(&self) -> String {
        self.server.url(MOCK_INFO_PATH)
    }

    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }
}

/// Body JSON tel que le sert le vrai backend
pub fn instance_json(hostname: &str, version: &str) -> Value {
    json!({
        "version": version,
        "hostname": hostname,
        "uptime": "1h 2s",
        "runtime_version": "rustc 1.80.0",
        "timestamp": "2025-01-01T12:00:00Z",
    })
}

async fn respond(State(state): State<Arc<MockState>>) -> Response {
    let hit = state.hits.fetch_add(1, Ordering::SeqCst);
    render(&state.behavior, hit).await
}

async fn render(behavior: &MockBehavior, hit: usize) -> Response {
    let mut behavior = behavior;
    loop {
        match behavior {
            MockBehavior::Fixed(body) => return json_response(body),
            MockBehavior::Rotate(bodies) if bodies.is_empty() => {
                return StatusCode::NO_CONTENT.into_response()
            }
            MockBehavior::Rotate(bodies) => return json_response(&bodies[hit % bodies.len()]),
            MockBehavior::Status(code) => {
                let status = StatusCode::from_u16(*code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                return status.into_response();
            }
            MockBehavior::Malformed => {
                return (
                    StatusCode::OK,
                    [(header::CONTENT_TYPE, "application/json")],
                    "{ this is not json",
                )
                    .into_response()
            }
            MockBehavior::Slow(delay, next) => {
                tokio::time::sleep(*delay).await;
                behavior = next.as_ref();
            }
        }
    }
}

fn json_response(body: &Value) -> Response {
    (StatusCode::OK, axum::Json(body.clone())).into_response()
}
