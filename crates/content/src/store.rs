//! The extraction façade a generation driver talks to.

use std::path::{Path, PathBuf};

use crate::{
    agent::{self, AgentMetadata, McpServerConfig},
    cache::FileCache,
    collection::{self, Collection},
    error::{Error, Result},
    parse::{self, Frontmatter},
    safety, title,
};

/// Extraction façade over a content repository.
///
/// Owns the file-content cache and the allowed root. Every public
/// contract validates its path against the root and runs the fallible
/// parser inside the safe-operation boundary, so callers always get a
/// default (`None` or an empty container) instead of an error, and each
/// failure is logged exactly once.
pub struct ContentStore {
    root: PathBuf,
    cache: FileCache,
}

impl ContentStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: FileCache::new(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn cache(&self) -> &FileCache {
        &self.cache
    }

    /// Gate applied before any read of an externally-supplied path.
    fn guard(&self, path: &Path) -> Result<()> {
        if safety::path_within(path, &self.root) {
            Ok(())
        } else {
            Err(Error::path_outside_root(path))
        }
    }

    /// Parsed and normalized frontmatter, or `None` when the path is
    /// rejected, the file is unreadable, or the block is missing or
    /// invalid.
    pub async fn frontmatter(&self, path: &Path) -> Option<Frontmatter> {
        safety::safe_file_op(path, None, async {
            self.guard(path)?;
            parse::parse_frontmatter(&self.cache, path).await.map(Some)
        })
        .await
    }

    /// Parsed collection manifest, or `None` on any failure. Never a
    /// partially-populated collection.
    pub async fn collection(&self, path: &Path) -> Option<Collection> {
        safety::safe_file_op(path, None, async {
            self.guard(path)?;
            collection::parse_collection(&self.cache, path)
                .await
                .map(Some)
        })
        .await
    }

    /// Typed agent metadata, or `None` when no frontmatter is found.
    pub async fn agent_metadata(&self, path: &Path) -> Option<AgentMetadata> {
        safety::safe_file_op(path, None, async {
            self.guard(path)?;
            agent::extract_metadata(&self.cache, path).await.map(Some)
        })
        .await
    }

    /// MCP server names in document order; empty when metadata or the
    /// server map is absent.
    pub async fn mcp_server_names(&self, path: &Path) -> Vec<String> {
        self.agent_metadata(path)
            .await
            .map(|meta| meta.server_names())
            .unwrap_or_default()
    }

    /// Typed MCP server configs in document order; empty when absent.
    pub async fn mcp_server_configs(&self, path: &Path) -> Vec<McpServerConfig> {
        self.agent_metadata(path)
            .await
            .map(|meta| meta.server_configs())
            .unwrap_or_default()
    }

    /// Display title, resolved from frontmatter, the first heading, or
    /// the file name. Always yields something usable.
    pub async fn title(&self, path: &Path) -> String {
        let fallback = title::title_from_path(path);
        safety::safe_file_op(path, fallback, async {
            self.guard(path)?;
            let content = self.cache.read_cached(path).await?;
            Ok(title::resolve_title(path, &content))
        })
        .await
    }

    /// Normalized frontmatter description, when present.
    pub async fn description(&self, path: &Path) -> Option<String> {
        self.frontmatter(path)
            .await
            .and_then(|frontmatter| frontmatter.description().map(str::to_string))
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(files: &[(&str, &str)]) -> (tempfile::TempDir, ContentStore) {
        let tmp = tempfile::tempdir().unwrap();
        for (name, content) in files {
            let path = tmp.path().join(name);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::write(path, content).unwrap();
        }
        let store = ContentStore::new(tmp.path());
        (tmp, store)
    }

    #[tokio::test]
    async fn rejects_paths_outside_the_root() {
        let (_tmp, store) = store_with(&[]);
        assert!(store.frontmatter(Path::new("/etc/passwd")).await.is_none());
        assert!(
            store
                .mcp_server_names(&store.root().join("../outside.agent.md"))
                .await
                .is_empty()
        );
        // Title still has its filename fallback.
        assert_eq!(store.title(Path::new("/etc/passwd")).await, "Passwd");
    }

    #[tokio::test]
    async fn extracts_frontmatter_and_description() {
        let (_tmp, store) = store_with(&[(
            "prompts/react.prompt.md",
            "---\ntitle: React Tips\ndescription: 'Hooks and friends   '\n---\n# Ignored\n",
        )]);
        let path = store.root().join("prompts/react.prompt.md");
        let frontmatter = store.frontmatter(&path).await.unwrap();
        assert_eq!(frontmatter.title(), Some("React Tips"));
        assert_eq!(
            store.description(&path).await.as_deref(),
            Some("Hooks and friends")
        );
        assert_eq!(store.title(&path).await, "React Tips");
    }

    #[tokio::test]
    async fn missing_frontmatter_degrades_to_defaults() {
        let (_tmp, store) = store_with(&[(
            "chatmodes/plain.chatmode.md",
            "# Plain Heading\nNo metadata here.\n",
        )]);
        let path = store.root().join("chatmodes/plain.chatmode.md");
        assert!(store.frontmatter(&path).await.is_none());
        assert!(store.agent_metadata(&path).await.is_none());
        assert!(store.mcp_server_names(&path).await.is_empty());
        assert!(store.description(&path).await.is_none());
        // The heading still resolves as the title.
        assert_eq!(store.title(&path).await, "Plain Heading");
    }

    #[tokio::test]
    async fn malformed_collection_is_none() {
        let (_tmp, store) = store_with(&[(
            "collections/broken.collection.yml",
            "invalid: yaml: content: [",
        )]);
        let path = store.root().join("collections/broken.collection.yml");
        assert!(store.collection(&path).await.is_none());
    }

    #[tokio::test]
    async fn collection_parses_through_the_store() {
        let (_tmp, store) = store_with(&[(
            "collections/web.collection.yml",
            "id: web\nname: Web\ndescription: d\ntags: [a, b]\nitems: []\n",
        )]);
        let path = store.root().join("collections/web.collection.yml");
        let collection = store.collection(&path).await.unwrap();
        assert_eq!(collection.tags, ["a", "b"]);
    }

    #[tokio::test]
    async fn repeated_passes_share_one_read() {
        let (_tmp, store) = store_with(&[(
            "agents/demo.agent.md",
            "---\nname: demo-agent\ndescription: d\nmcp-servers:\n  s1:\n    command: run\n---\nBody.\n",
        )]);
        let path = store.root().join("agents/demo.agent.md");

        // The passes a generator makes per file: title, description,
        // server names.
        assert_eq!(store.title(&path).await, "Demo Agent");
        assert_eq!(store.description(&path).await.as_deref(), Some("d"));
        assert_eq!(store.mcp_server_names(&path).await, ["s1"]);

        let stats = store.cache().stats().await;
        assert_eq!(stats[&path].reads, 3);
        assert_eq!(stats[&path].hits, 2);
    }
}
