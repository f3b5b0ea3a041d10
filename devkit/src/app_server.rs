/*!
Serveur de test in-process

Bind sur 127.0.0.1:0 et sert le router dans une task tokio. Le serveur est
arrêté quand le `TestServer` est droppé.
*/

use anyhow::{Context, Result};
use axum::Router;
use std::future::IntoFuture;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// URL absolue pour un chemin (`/tiles?count=2` → `http://127.0.0.1:xxxx/tiles?count=2`)
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub async fn spawn_app(router: Router) -> Result<TestServer> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .context("failed to bind test listener")?;
    let addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).into_future().await {
            log::error!("❌ test server on {} failed: {}", addr, e);
        }
    });

    log::debug!("🧪 test server listening on {}", addr);
    Ok(TestServer { addr, handle })
}
