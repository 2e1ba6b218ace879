//! Agent metadata extraction.
//!
//! Agent files declare MCP server configurations in frontmatter under
//! the hyphenated `mcp-servers` key. Extraction applies per-field type
//! guards: an absent or mistyped field degrades to `None` or an empty
//! container, never an error. Downstream rendering distinguishes an
//! absent field from an empty one, so guards produce absence, not
//! defaults.

use std::{collections::HashMap, path::Path};

use {
    serde::Serialize,
    serde_yaml::{Mapping, Value},
};

use crate::{
    cache::FileCache,
    error::Result,
    parse::{self, Frontmatter},
};

/// Typed metadata derived from an agent file's frontmatter.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AgentMetadata {
    pub name: Option<String>,
    pub description: Option<String>,
    pub tools: Vec<Value>,
    /// Raw server configurations keyed by server name, in document order.
    pub mcp_servers: Mapping,
}

/// One MCP server reference with its transport configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct McpServerConfig {
    pub name: String,
    #[serde(flatten)]
    pub transport: McpTransport,
}

/// Transport shape for an MCP server, discriminated by the `type` field.
/// Only the selected shape's fields exist; the other shape's fields are
/// absent entirely, not null.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum McpTransport {
    /// A locally launched process.
    Stdio {
        #[serde(skip_serializing_if = "Option::is_none")]
        command: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        args: Option<Vec<String>>,
    },
    /// A remote HTTP endpoint.
    Http {
        #[serde(skip_serializing_if = "Option::is_none")]
        url: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        headers: Option<HashMap<String, String>>,
    },
}

/// Extract agent metadata from a file's frontmatter, reading through
/// the cache.
pub async fn extract_metadata(cache: &FileCache, path: &Path) -> Result<AgentMetadata> {
    let frontmatter = parse::parse_frontmatter(cache, path).await?;
    Ok(metadata_from(&frontmatter))
}

/// Build the typed record from parsed frontmatter.
#[must_use]
pub fn metadata_from(frontmatter: &Frontmatter) -> AgentMetadata {
    AgentMetadata {
        name: frontmatter.str_field("name").map(str::to_string),
        description: frontmatter.str_field("description").map(str::to_string),
        tools: match frontmatter.get("tools") {
            Some(Value::Sequence(tools)) => tools.clone(),
            _ => Vec::new(),
        },
        mcp_servers: match frontmatter.get("mcp-servers") {
            Some(Value::Mapping(servers)) => servers.clone(),
            _ => Mapping::new(),
        },
    }
}

impl AgentMetadata {
    /// Server names in document order.
    #[must_use]
    pub fn server_names(&self) -> Vec<String> {
        self.mcp_servers
            .keys()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()
    }

    /// Typed transport configs in document order.
    #[must_use]
    pub fn server_configs(&self) -> Vec<McpServerConfig> {
        self.mcp_servers
            .iter()
            .filter_map(|(name, config)| {
                Some(McpServerConfig {
                    name: name.as_str()?.to_string(),
                    transport: transport_from(config),
                })
            })
            .collect()
    }
}

/// Build the tagged transport from a raw server config value. A
/// case-insensitive `http` type selects the HTTP shape; anything else,
/// including an absent or mistyped `type`, selects stdio.
fn transport_from(config: &Value) -> McpTransport {
    let kind = config
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("stdio");
    if kind.eq_ignore_ascii_case("http") {
        McpTransport::Http {
            url: config
                .get("url")
                .and_then(Value::as_str)
                .map(str::to_string),
            headers: string_map(config.get("headers")),
        }
    } else {
        McpTransport::Stdio {
            command: config
                .get("command")
                .and_then(Value::as_str)
                .map(str::to_string),
            args: string_seq(config.get("args")),
        }
    }
}

fn string_seq(value: Option<&Value>) -> Option<Vec<String>> {
    match value {
        Some(Value::Sequence(items)) => Some(items.iter().filter_map(scalar_string).collect()),
        _ => None,
    }
}

fn string_map(value: Option<&Value>) -> Option<HashMap<String, String>> {
    match value {
        Some(Value::Mapping(map)) => Some(
            map.iter()
                .filter_map(|(key, value)| Some((key.as_str()?.to_string(), scalar_string(value)?)))
                .collect(),
        ),
        _ => None,
    }
}

/// Render a YAML scalar as a string; non-scalar values are dropped.
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}
