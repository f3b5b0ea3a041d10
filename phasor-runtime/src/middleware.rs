//! Request logging middleware
//!
//! Every request runs inside a `request` span carrying a trace id. The id comes from a
//! well-formed W3C `traceparent` header when the caller sent one, otherwise a fresh one is
//! generated. It is echoed back in `x-trace-id`.
//!
//! `recover_panic` sits outside the logger and turns a panicking handler into a 500.

use axum::extract::Request;
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Instant;
use tracing::{error, info, warn, Instrument};

pub const TRACEPARENT_HEADER: &str = "traceparent";
pub const TRACE_ID_HEADER: &str = "x-trace-id";

pub async fn request_logger(req: Request, next: Next) -> Response {
    let trace_id = req
        .headers()
        .get(TRACEPARENT_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_traceparent)
        .unwrap_or_else(new_trace_id);

    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let span = tracing::info_span!("request", %method, %path, trace_id = %trace_id);

    let started = Instant::now();
    let mut response = next.run(req).instrument(span.clone()).await;
    let status = response.status().as_u16();
    let latency_ms = started.elapsed().as_millis() as u64;

    span.in_scope(|| {
        if response.status().is_server_error() {
            warn!(status, latency_ms, "request failed");
        } else {
            info!(status, latency_ms, "request completed");
        }
    });

    if let Ok(value) = HeaderValue::from_str(&trace_id) {
        response.headers_mut().insert(TRACE_ID_HEADER, value);
    }
    response
}

pub async fn recover_panic(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    match AssertUnwindSafe(next.run(req)).catch_unwind().await {
        Ok(response) => response,
        Err(payload) => {
            error!(%method, %path, panic = %panic_message(payload.as_ref()), "handler panicked");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        *msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "unknown panic"
    }
}

/// Extracts the trace id from `00-<32 hex>-<16 hex>-<2 hex>`. All-zero ids are invalid.
pub fn parse_traceparent(value: &str) -> Option<String> {
    let parts: Vec<&str> = value.trim().split('-').collect();
    let &[version, trace_id, parent_id, flags] = parts.as_slice() else {
        return None;
    };

    let is_hex = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_hexdigit());
    if !is_hex(version, 2) || !is_hex(trace_id, 32) || !is_hex(parent_id, 16) || !is_hex(flags, 2) {
        return None;
    }
    if trace_id.bytes().all(|b| b == b'0') {
        return None;
    }
    Some(trace_id.to_ascii_lowercase())
}

fn new_trace_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware, routing::get, Router};
    use phasor_devkit::spawn_app;

    #[test]
    fn test_parse_valid_traceparent() {
        let id = parse_traceparent("00-4BF92F3577B34DA6A3CE929D0E0E4736-00f067aa0ba902b7-01");
        assert_eq!(id.as_deref(), Some("4bf92f3577b34da6a3ce929d0e0e4736"));
    }

    #[test]
    fn test_parse_rejects_malformed_traceparent() {
        assert_eq!(parse_traceparent(""), None);
        assert_eq!(parse_traceparent("00-abc-00f067aa0ba902b7-01"), None);
        assert_eq!(
            parse_traceparent("00-00000000000000000000000000000000-00f067aa0ba902b7-01"),
            None
        );
        assert_eq!(
            parse_traceparent("00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01-extra"),
            None
        );
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = new_trace_id();
        let b = new_trace_id();
        assert_eq!(a.len(), 32);
        assert_ne!(a, b);
    }

    #[test]
    fn test_panic_message_from_payload() {
        let boxed: Box<dyn Any + Send> = Box::new("static message");
        assert_eq!(panic_message(boxed.as_ref()), "static message");

        let boxed: Box<dyn Any + Send> = Box::new(format!("formatted {}", 42));
        assert_eq!(panic_message(boxed.as_ref()), "formatted 42");

        let boxed: Box<dyn Any + Send> = Box::new(7_u32);
        assert_eq!(panic_message(boxed.as_ref()), "unknown panic");
    }

    #[tokio::test]
    async fn test_panicking_handler_returns_500_and_server_keeps_serving() {
        async fn boom() -> &'static str {
            panic!("handler exploded")
        }

        let app = Router::new()
            .route("/boom", get(boom))
            .route("/ok", get(|| async { "ok" }))
            .layer(middleware::from_fn(request_logger))
            .layer(middleware::from_fn(recover_panic));
        let server = spawn_app(app).await.unwrap();

        let resp = reqwest::get(server.url("/boom")).await.unwrap();
        assert_eq!(resp.status().as_u16(), 500);
        assert_eq!(resp.text().await.unwrap(), "Internal Server Error");

        let resp = reqwest::get(server.url("/ok")).await.unwrap();
        assert_eq!(resp.status().as_u16(), 200);
        assert_eq!(resp.text().await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn test_trace_id_is_echoed() {
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(middleware::from_fn(request_logger));
        let server = spawn_app(app).await.unwrap();

        let resp = reqwest::Client::new()
            .get(server.url("/"))
            .header(TRACEPARENT_HEADER, "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01")
            .send()
            .await
            .unwrap();
        assert_eq!(
            resp.headers().get(TRACE_ID_HEADER).unwrap(),
            "4bf92f3577b34da6a3ce929d0e0e4736"
        );

        let resp = reqwest::get(server.url("/")).await.unwrap();
        let generated = resp.headers().get(TRACE_ID_HEADER).unwrap().to_str().unwrap();
        assert_eq!(generated.len(), 32);
    }
}
