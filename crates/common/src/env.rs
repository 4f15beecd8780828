//! Environment/runtime helpers
//!
//! Sanity checks run once at startup, before the router is built.

use std::path::Path;

use tracing::{info, warn};

/// Warn when the admin frontend directory is missing and make sure the
/// snapshot file, when configured, is readable.
pub async fn ensure_env(frontend_dir: &str, snapshot_path: Option<&str>) -> anyhow::Result<()> {
    if tokio::fs::metadata(frontend_dir).await.is_err() {
        warn!(%frontend_dir, "frontend assets directory not found; /admin will 404");
    }
    if let Some(path) = snapshot_path {
        let meta = tokio::fs::metadata(Path::new(path))
            .await
            .map_err(|e| anyhow::anyhow!("cannot read snapshot {path}: {e}"))?;
        if !meta.is_file() {
            return Err(anyhow::anyhow!("snapshot {path} is not a file"));
        }
        info!(%path, bytes = meta.len(), "snapshot file found");
    }
    Ok(())
}
