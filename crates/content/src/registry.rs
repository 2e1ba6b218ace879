//! Lookup index over the local MCP registry snapshot.
//!
//! The snapshot is a JSON export of known MCP server identities, used to
//! resolve the display names agents reference into canonical registry
//! identifiers. It is read at most once per process; a missing or
//! malformed snapshot degrades to an empty index (no known servers),
//! never an error.

use std::{collections::HashMap, path::Path, sync::OnceLock};

use {
    serde::{Deserialize, Serialize},
    tracing::{debug, warn},
};

use crate::error::Result;

/// A known MCP server identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryEntry {
    pub canonical_name: String,
    pub display_name: String,
}

/// Lowercased display-name index over the registry snapshot.
#[derive(Debug, Default)]
pub struct McpRegistryIndex {
    entries: HashMap<String, RegistryEntry>,
}

#[derive(Deserialize)]
struct Snapshot {
    #[serde(default)]
    payload: Option<SnapshotPayload>,
}

#[derive(Deserialize)]
struct SnapshotPayload {
    #[serde(default, rename = "mcpRegistryRoute")]
    mcp_registry_route: Option<SnapshotRoute>,
}

#[derive(Deserialize)]
struct SnapshotRoute {
    #[serde(default, rename = "serversData")]
    servers_data: Option<SnapshotServers>,
}

#[derive(Deserialize)]
struct SnapshotServers {
    #[serde(default)]
    servers: Vec<ServerRecord>,
}

#[derive(Deserialize)]
struct ServerRecord {
    name: String,
    display_name: String,
}

static GLOBAL: OnceLock<McpRegistryIndex> = OnceLock::new();

impl McpRegistryIndex {
    /// Build an index from a snapshot file.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "MCP registry snapshot not found, using empty index");
            return Self::default();
        }

        let records = match std::fs::read_to_string(path)
            .map_err(crate::error::Error::from)
            .and_then(|data| parse_snapshot(&data))
        {
            Ok(records) => records,
            Err(err) => {
                warn!(path = %path.display(), %err, "failed to load MCP registry snapshot");
                return Self::default();
            },
        };

        let mut entries = HashMap::new();
        for record in records {
            let display_name = record.display_name.to_lowercase();
            entries.insert(display_name.clone(), RegistryEntry {
                canonical_name: record.name,
                display_name,
            });
        }
        Self { entries }
    }

    /// Process-wide index, loaded from `path` on first use and never
    /// re-read. Use [`McpRegistryIndex::load`] where a fresh, resettable
    /// instance is needed (tests, long-lived services).
    pub fn global(path: &Path) -> &'static Self {
        GLOBAL.get_or_init(|| Self::load(path))
    }

    /// Resolve a display name (lowercased on the way in) to its registry
    /// identity.
    #[must_use]
    pub fn lookup(&self, display_name: &str) -> Option<&RegistryEntry> {
        self.entries.get(&display_name.to_lowercase())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_snapshot(data: &str) -> Result<Vec<ServerRecord>> {
    let snapshot: Snapshot = serde_json::from_str(data)?;
    Ok(snapshot
        .payload
        .and_then(|payload| payload.mcp_registry_route)
        .and_then(|route| route.servers_data)
        .map(|servers| servers.servers)
        .unwrap_or_default())
}
