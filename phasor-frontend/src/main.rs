/**
 * PHASOR FRONTEND - Point d'entrée du dashboard
 *
 * RÔLE : charge la config YAML (backend_url, tile_colors, logs), installe les logs,
 * construit le router et sert jusqu'au signal d'arrêt.
 */

use anyhow::{Context, Result};
use phasor_frontend::config::{self, CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH};
use phasor_frontend::{build_router, AppOptions};
use phasor_runtime::{init_logging, serve, ServerOptions};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Charger les variables d'environnement depuis .env (si présent)
    dotenvy::dotenv().ok();

    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
    let cfg = config::load(&path)
        .await
        .with_context(|| format!("failed to load config from {path}"))?;

    init_logging(&cfg.log_config).context("failed to create logger")?;
    info!(
        backend_url = %cfg.backend_url,
        colors = cfg.tile_colors.len(),
        fetch_mode = ?cfg.fetch_mode,
        "starting phasor frontend"
    );

    let router = build_router(
        AppOptions::default()
            .with_backend_url(cfg.backend_url.clone())
            .with_tile_colors(cfg.tile_colors.clone())
            .with_environment(cfg.environment.clone())
            .with_fetch_mode(cfg.fetch_mode)
            .with_request_timeout(cfg.request_timeout()),
    )
    .context("failed to create frontend handler")?;

    let options = ServerOptions {
        port: cfg.port,
        ..ServerOptions::default()
    };
    serve(router, &options).await.context("server error")?;
    Ok(())
}
