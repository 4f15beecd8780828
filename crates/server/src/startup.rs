use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use dotenvy::dotenv;
use service::{DataProvider, MemoryStore};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Config file first, env vars as the fallback.
fn load_config() -> Result<AppConfig, StartupError> {
    match AppConfig::load_and_validate() {
        Ok(cfg) => Ok(cfg),
        Err(e) => {
            warn!(error = %e, "config.toml unavailable, falling back to env");
            AppConfig::load_or_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))
        }
    }
}

/// Seed the store from the configured snapshot, or the bundled one.
pub async fn build_store(cfg: &AppConfig) -> Result<MemoryStore, StartupError> {
    let store = match cfg.site.snapshot_path.as_deref() {
        Some(path) => MemoryStore::from_snapshot_file(path).await?,
        None => MemoryStore::seeded()?,
    };
    for (resource, count) in store.summary().await {
        info!(%resource, count, "collection_loaded");
    }
    Ok(store)
}

/// Router over the given provider. Tests use this with their own store.
pub fn build_app(provider: Arc<dyn DataProvider>, frontend_dir: &str) -> Result<Router, StartupError> {
    let state = AppState::new(provider)?;
    Ok(routes::build_router(state, build_cors(), frontend_dir))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C");
        return;
    }
    info!(service = "server", event = "shutdown_signal", "received Ctrl+C, shutting down");
}

/// Public entry: build the app and run the HTTP server until Ctrl+C.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();

    let cfg = load_config()?;
    common::env::ensure_env(&cfg.site.frontend_dir, cfg.site.snapshot_path.as_deref()).await?;

    let store = build_store(&cfg).await?;
    let app = build_app(Arc::new(store), &cfg.site.frontend_dir)?;

    let addr: SocketAddr = cfg.server.bind_addr().parse()?;
    info!(%addr, "starting server crate");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!(service = "server", event = "stop", "server stopped");
    Ok(())
}
