//! Content categories and per-category directory listings.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;

/// The categories of curated content the repository tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentKind {
    Instruction,
    Prompt,
    ChatMode,
    Agent,
    Collection,
}

impl ContentKind {
    pub const ALL: [ContentKind; 5] = [
        ContentKind::Instruction,
        ContentKind::Prompt,
        ContentKind::ChatMode,
        ContentKind::Agent,
        ContentKind::Collection,
    ];

    /// Directory under the repository root holding this kind.
    #[must_use]
    pub fn dir_name(self) -> &'static str {
        match self {
            ContentKind::Instruction => "instructions",
            ContentKind::Prompt => "prompts",
            ContentKind::ChatMode => "chatmodes",
            ContentKind::Agent => "agents",
            ContentKind::Collection => "collections",
        }
    }

    /// File suffix identifying this kind.
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            ContentKind::Instruction => ".instructions.md",
            ContentKind::Prompt => ".prompt.md",
            ContentKind::ChatMode => ".chatmode.md",
            ContentKind::Agent => ".agent.md",
            ContentKind::Collection => ".collection.yml",
        }
    }

    /// Classify a file by its suffix.
    #[must_use]
    pub fn of(path: &Path) -> Option<ContentKind> {
        let name = path.file_name()?.to_str()?;
        ContentKind::ALL
            .into_iter()
            .find(|kind| name.ends_with(kind.suffix()))
    }
}

/// List the files of one kind, one level deep, sorted by file name.
/// A missing directory is an empty listing, not an error.
pub async fn list_files(root: &Path, kind: ContentKind) -> Result<Vec<PathBuf>> {
    let dir = root.join(kind.dir_name());
    let mut reader = match tokio::fs::read_dir(&dir).await {
        Ok(reader) => reader,
        Err(_) => return Ok(Vec::new()),
    };

    let mut files = Vec::new();
    while let Some(entry) = reader.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        let path = entry.path();
        if path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(kind.suffix()))
        {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_suffix() {
        assert_eq!(
            ContentKind::of(Path::new("prompts/react.prompt.md")),
            Some(ContentKind::Prompt)
        );
        assert_eq!(
            ContentKind::of(Path::new("agents/reviewer.agent.md")),
            Some(ContentKind::Agent)
        );
        assert_eq!(
            ContentKind::of(Path::new("collections/web.collection.yml")),
            Some(ContentKind::Collection)
        );
        assert_eq!(ContentKind::of(Path::new("README.md")), None);
    }

    #[tokio::test]
    async fn lists_matching_files_sorted() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("prompts");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("zeta.prompt.md"), "").unwrap();
        std::fs::write(dir.join("alpha.prompt.md"), "").unwrap();
        std::fs::write(dir.join("notes.md"), "").unwrap();
        std::fs::create_dir_all(dir.join("nested.prompt.md")).unwrap();

        let files = list_files(tmp.path(), ContentKind::Prompt).await.unwrap();
        let names: Vec<_> = files
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(names, ["alpha.prompt.md", "zeta.prompt.md"]);
    }

    #[tokio::test]
    async fn missing_directory_is_an_empty_listing() {
        let tmp = tempfile::tempdir().unwrap();
        let files = list_files(tmp.path(), ContentKind::Agent).await.unwrap();
        assert!(files.is_empty());
    }
}
