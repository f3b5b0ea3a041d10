/*!
Utilitaires de test

- Logging des tests via env_logger (`RUST_LOG=debug cargo test`)
- Fichiers de config YAML temporaires
- Harness full-stack : un backend réel + un frontend branché dessus
*/

use crate::app_server::{spawn_app, TestServer};
use anyhow::{Context, Result};
use axum::Router;
use std::path::PathBuf;
use tempfile::TempDir;

/// Init logging pour tests, sans erreur si déjà fait
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Écrit `content` dans `<tmpdir>/config.yaml`. Garder le `TempDir` vivant pendant le test.
pub fn write_temp_config(content: &str) -> Result<(TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("failed to create temp dir")?;
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, content).context("failed to write config")?;
    Ok((dir, path))
}

/// Harness de test full-stack
pub struct StackHarness {
    pub backend: TestServer,
    pub frontend: TestServer,
    client: reqwest::Client,
}

impl StackHarness {
    /// Démarre le backend, puis construit le frontend avec l'URL d'infos du backend
    pub async fn start<F>(backend: Router, info_path: &str, frontend: F) -> Result<Self>
    where
        F: FnOnce(String) -> Result<Router>,
    {
        init_test_logging();

        let backend = spawn_app(backend).await?;
        let backend_url = backend.url(info_path);
        let frontend = spawn_app(frontend(backend_url.clone())?).await?;
        log::info!("🔗 stack up: frontend {} -> backend {}", frontend.addr(), backend_url);

        Ok(Self {
            backend,
            frontend,
            client: reqwest::Client::new(),
        })
    }

    /// GET sur le frontend, renvoie (status, body)
    pub async fn get_frontend(&self, path: &str) -> Result<(u16, String)> {
        self.get(self.frontend.url(path)).await
    }

    /// GET sur le backend, renvoie (status, body)
    pub async fn get_backend(&self, path: &str) -> Result<(u16, String)> {
        self.get(self.backend.url(path)).await
    }

    async fn get(&self, url: String) -> Result<(u16, String)> {
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("GET {url} failed"))?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        Ok((status, body))
    }
}
