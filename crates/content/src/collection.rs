//! Collection manifest parsing.
//!
//! Collections are standalone `*.collection.yml` files (pure YAML, no
//! frontmatter delimiters) naming an ordered bundle of content files
//! plus display preferences.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{cache::FileCache, error::Result};

/// A named, ordered bundle of content-file references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub items: Vec<CollectionItem>,
    #[serde(default)]
    pub display: Option<DisplayOptions>,
}

impl Collection {
    /// Whether this collection is flagged for the featured block of the
    /// root README.
    #[must_use]
    pub fn is_featured(&self) -> bool {
        self.display
            .as_ref()
            .and_then(|display| display.featured)
            .unwrap_or(false)
    }
}

/// One referenced content file within a collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionItem {
    pub path: String,
    /// Item category: `prompt`, `instruction`, `chat-mode`, or `agent`.
    pub kind: String,
    /// Optional usage notes shown on the collection page.
    #[serde(default)]
    pub usage: Option<String>,
}

/// Rendering preferences for a collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayOptions {
    /// `alpha` or `manual` (preserve the order items are listed in).
    #[serde(default)]
    pub ordering: Option<String>,
    #[serde(default)]
    pub show_badge: Option<bool>,
    #[serde(default)]
    pub featured: Option<bool>,
}

/// Parse a collection manifest, reading through the cache.
///
/// Decoding is strict: a scalar that does not fit its declared field
/// type (an unquoted version-like `1.0` where a string is required, a
/// YAML tag, a mistyped list) fails the whole manifest. A manifest is
/// never partially populated.
pub async fn parse_collection(cache: &FileCache, path: &Path) -> Result<Collection> {
    let content = cache.read_cached(path).await?;
    Ok(serde_yaml::from_str(&content)?)
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    async fn parse_str(content: &str) -> Result<Collection> {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("test.collection.yml");
        std::fs::write(&path, content).unwrap();
        parse_collection(&FileCache::new(), &path).await
    }

    #[tokio::test]
    async fn parses_a_full_manifest_preserving_tag_order() {
        let collection = parse_str(
            "id: web-dev\nname: Web Development\ndescription: Front-end essentials\ntags:\n  - a\n  - b\nitems:\n  - path: prompts/react.prompt.md\n    kind: prompt\n  - path: agents/reviewer.agent.md\n    kind: agent\n    usage: |\n      Run after every PR.\ndisplay:\n  ordering: alpha\n  show_badge: false\n  featured: true\n",
        )
        .await
        .unwrap();

        assert_eq!(collection.id, "web-dev");
        assert_eq!(collection.tags, ["a", "b"]);
        assert_eq!(collection.items.len(), 2);
        assert_eq!(collection.items[0].kind, "prompt");
        assert_eq!(
            collection.items[1].usage.as_deref(),
            Some("Run after every PR.\n")
        );
        assert!(collection.is_featured());
        let display = collection.display.unwrap();
        assert_eq!(display.ordering.as_deref(), Some("alpha"));
        assert_eq!(display.show_badge, Some(false));
    }

    #[tokio::test]
    async fn empty_items_and_absent_display_are_fine() {
        let collection = parse_str("id: tiny\nname: Tiny\ndescription: d\nitems: []\n")
            .await
            .unwrap();
        assert!(collection.items.is_empty());
        assert!(collection.tags.is_empty());
        assert!(!collection.is_featured());
    }

    #[tokio::test]
    async fn malformed_yaml_fails_the_whole_manifest() {
        assert!(parse_str("invalid: yaml: content: [").await.is_err());
    }

    #[tokio::test]
    async fn mistyped_scalar_fails_the_whole_manifest() {
        // An unquoted version-like scalar decodes as a number, which is
        // rejected where a string is declared.
        assert!(
            parse_str("id: 1.0\nname: Versioned\ndescription: d\n")
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("absent.collection.yml");
        assert!(parse_collection(&FileCache::new(), &path).await.is_err());
    }
}
