//! Path containment and the error-isolation boundary shared by every
//! parser in the crate.

use std::{
    future::Future,
    path::{Component, Path, PathBuf},
};

use tracing::{debug, warn};

use crate::error::Result;

/// Resolve a path to absolute form and collapse `.`/`..` components
/// lexically, without consulting the filesystem. Nonexistent paths
/// normalize the same way existing ones do.
fn normalize(path: &Path) -> std::io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    let mut resolved = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::ParentDir => {
                resolved.pop();
            },
            Component::CurDir => {},
            other => resolved.push(other),
        }
    }
    Ok(resolved)
}

/// Check that `path` resolves to a location equal to or nested under
/// `allowed_root`. Malformed input is a rejection, never an error.
#[must_use]
pub fn path_within(path: &Path, allowed_root: &Path) -> bool {
    let resolved = match normalize(path) {
        Ok(resolved) => resolved,
        Err(err) => {
            debug!(path = %path.display(), %err, "cannot resolve candidate path");
            return false;
        },
    };
    let root = match normalize(allowed_root) {
        Ok(root) => root,
        Err(err) => {
            debug!(root = %allowed_root.display(), %err, "cannot resolve allowed root");
            return false;
        },
    };
    if resolved.starts_with(&root) {
        true
    } else {
        debug!(
            path = %resolved.display(),
            root = %root.display(),
            "path escapes allowed root"
        );
        false
    }
}

/// Run a fallible file operation, converting any failure into a single
/// warning plus `default`. No error escapes this boundary.
pub async fn safe_file_op<T, F>(path: &Path, default: T, op: F) -> T
where
    F: Future<Output = Result<T>>,
{
    match op.await {
        Ok(value) => value,
        Err(err) => {
            warn!(path = %path.display(), %err, "file operation failed");
            default
        },
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_paths_under_the_root() {
        assert!(path_within(
            Path::new("/repo/eng/agents/demo.agent.md"),
            Path::new("/repo/eng")
        ));
        assert!(path_within(Path::new("/repo/eng"), Path::new("/repo/eng")));
        // Lexical `..` that stays inside the root is fine.
        assert!(path_within(
            Path::new("/repo/eng/a/../b.md"),
            Path::new("/repo/eng")
        ));
    }

    #[test]
    fn rejects_traversal_attempts() {
        assert!(!path_within(
            Path::new("../../etc/passwd"),
            Path::new("/repo/eng")
        ));
        assert!(!path_within(
            Path::new("/repo/eng/../secrets.txt"),
            Path::new("/repo/eng")
        ));
    }

    #[test]
    fn rejects_sibling_directories_with_a_shared_prefix() {
        assert!(!path_within(
            Path::new("/repo/engine/file.md"),
            Path::new("/repo/eng")
        ));
    }

    #[test]
    fn rejects_empty_input() {
        assert!(!path_within(Path::new(""), Path::new("/repo/eng")));
        assert!(!path_within(Path::new("/repo/eng/file.md"), Path::new("")));
    }

    #[tokio::test]
    async fn safe_op_passes_successes_through() {
        let value = safe_file_op(Path::new("x"), 0, async { Ok(7) }).await;
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn safe_op_converts_failures_to_the_default() {
        let value = safe_file_op(Path::new("x"), 42, async {
            Err::<i32, _>(std::io::Error::other("boom").into())
        })
        .await;
        assert_eq!(value, 42);
    }
}
