//! HTTP serving with graceful shutdown
//!
//! On Ctrl-C / SIGTERM the listener stops accepting, in-flight requests get
//! `shutdown_timeout` to finish, then the remaining connections are dropped.
//! Dropping a connection drops its handler future, which cancels any upstream
//! call that handler still had in flight.

use axum::Router;
use std::future::{Future, IntoFuture};
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct ServerOptions {
    pub port: u16,
    pub shutdown_timeout: Duration,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            port: 8080,
            shutdown_timeout: Duration::from_secs(20),
        }
    }
}

pub async fn serve(router: Router, options: &ServerOptions) -> io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], options.port));
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    serve_on(listener, router, shutdown_signal(), options.shutdown_timeout).await
}

/// Serves until `shutdown` resolves, then drains for at most `drain_timeout`.
pub async fn serve_on<F>(
    listener: TcpListener,
    router: Router,
    shutdown: F,
    drain_timeout: Duration,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = axum::serve(listener, router).with_graceful_shutdown(async move {
        let _ = stop_rx.await;
    });
    let mut server = tokio::spawn(server.into_future());

    tokio::select! {
        joined = &mut server => return joined.map_err(io::Error::other)?,
        _ = shutdown => {
            info!(timeout_secs = drain_timeout.as_secs(), "shutdown requested, draining connections");
            let _ = stop_tx.send(());
        }
    }

    match tokio::time::timeout(drain_timeout, &mut server).await {
        Ok(joined) => {
            joined.map_err(io::Error::other)??;
            info!("server stopped");
            Ok(())
        }
        Err(_) => {
            warn!("drain timeout elapsed, dropping remaining connections");
            server.abort();
            Ok(())
        }
    }
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;

    #[tokio::test]
    async fn test_serve_on_stops_after_shutdown() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = Router::new().route("/", get(|| async { "ok" }));
        let (tx, rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(serve_on(
            listener,
            router,
            async move {
                let _ = rx.await;
            },
            Duration::from_secs(2),
        ));

        let body = reqwest::get(format!("http://{addr}/")).await.unwrap().text().await.unwrap();
        assert_eq!(body, "ok");

        tx.send(()).unwrap();
        let result = tokio::time::timeout(Duration::from_secs(5), handle).await.unwrap().unwrap();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_slow_request_is_cut_by_drain_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                "late"
            }),
        );
        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(serve_on(
            listener,
            router,
            async move {
                let _ = rx.await;
            },
            Duration::from_millis(200),
        ));

        let pending = tokio::spawn(reqwest::get(format!("http://{addr}/slow")));
        tokio::time::sleep(Duration::from_millis(100)).await;
        tx.send(()).unwrap();

        let result = tokio::time::timeout(Duration::from_secs(5), handle).await.unwrap().unwrap();
        assert!(result.is_ok());
        pending.abort();
    }
}
