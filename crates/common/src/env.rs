//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::{Path, PathBuf};

use tracing::info;

/// Directory that must exist before SQLite can create a file database at `url`.
///
/// Returns `None` for in-memory SQLite, for files in the working directory, and for
/// non-SQLite URLs.
pub fn sqlite_parent_dir(url: &str) -> Option<PathBuf> {
    let rest = url.strip_prefix("sqlite://").or_else(|| url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path.contains(":memory:") {
        return None;
    }
    Path::new(path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.to_path_buf())
}

/// Ensure the data directory for a file-backed SQLite database exists.
pub async fn ensure_env(database_url: &str) -> anyhow::Result<()> {
    if let Some(dir) = sqlite_parent_dir(database_url) {
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", dir.display()))?;
        info!(dir = %dir.display(), "sqlite data directory ready");
    }
    Ok(())
}
