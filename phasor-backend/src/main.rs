/**
 * PHASOR BACKEND - Point d'entrée du service d'infos d'instance
 *
 * RÔLE : charge la config (fichier YAML + VERSION), installe les logs,
 * construit le router et sert jusqu'au signal d'arrêt.
 */

use anyhow::{Context, Result};
use phasor_backend::config::{self, CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH};
use phasor_backend::{build_router, AppOptions};
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
    info!(version = %cfg.version, environment = %cfg.environment, "starting phasor backend");

    let router = build_router(
        AppOptions::default()
            .with_version(cfg.version.clone())
            .with_environment(cfg.environment.clone()),
    );

    let options = ServerOptions {
        port: cfg.port,
        ..ServerOptions::default()
    };
    serve(router, &options).await.context("server error")?;
    Ok(())
}
