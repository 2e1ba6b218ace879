use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("path escapes allowed root: {}", path.display())]
    PathOutsideRoot { path: PathBuf },

    #[error("no frontmatter block: {}", path.display())]
    MissingFrontmatter { path: PathBuf },
}

impl Error {
    #[must_use]
    pub fn path_outside_root(path: impl Into<PathBuf>) -> Self {
        Self::PathOutsideRoot { path: path.into() }
    }

    #[must_use]
    pub fn missing_frontmatter(path: impl Into<PathBuf>) -> Self {
        Self::MissingFrontmatter { path: path.into() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
