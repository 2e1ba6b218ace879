//! Metadata extraction for curated content repositories.
//!
//! Parses YAML frontmatter from markdown content files, standalone
//! collection manifests, and agent MCP server configurations, sharing a
//! modification-time-validated file cache across the cross-referencing
//! passes a documentation generator makes over the same files.

pub mod agent;
pub mod cache;
pub mod collection;
pub mod error;
pub mod kind;
pub mod parse;
pub mod registry;
pub mod safety;
pub mod store;
pub mod title;
pub mod write;

pub use {
    agent::{AgentMetadata, McpServerConfig, McpTransport},
    cache::{CacheStats, FileCache},
    collection::{Collection, CollectionItem, DisplayOptions},
    error::{Error, Result},
    kind::ContentKind,
    parse::Frontmatter,
    registry::{McpRegistryIndex, RegistryEntry},
    store::ContentStore,
    write::WriteOutcome,
};
