//! Idempotent file writes for derived documentation.

use std::path::Path;

use tracing::info;

use crate::error::Result;

/// Outcome of an idempotent write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Updated,
    Unchanged,
}

/// Write `content` to `path` only when it differs from what is already
/// there, keeping modification times stable for downstream tooling.
pub async fn write_if_changed(path: &Path, content: &str) -> Result<WriteOutcome> {
    match tokio::fs::read_to_string(path).await {
        Ok(existing) if existing == content => {
            info!(path = %path.display(), "already up to date");
            Ok(WriteOutcome::Unchanged)
        },
        Ok(_) => {
            tokio::fs::write(path, content).await?;
            info!(path = %path.display(), "updated");
            Ok(WriteOutcome::Updated)
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tokio::fs::write(path, content).await?;
            info!(path = %path.display(), "created");
            Ok(WriteOutcome::Created)
        },
        Err(err) => Err(err.into()),
    }
}
