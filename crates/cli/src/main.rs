use std::path::{Path, PathBuf};

use {
    anthology_content::{
        ContentKind, ContentStore, McpRegistryIndex, McpServerConfig, kind, write,
    },
    clap::{Parser, Subcommand},
    serde::Serialize,
    tracing::info,
    tracing_subscriber::EnvFilter,
};

#[derive(Parser)]
#[command(name = "anthology", about = "Anthology — curated content metadata toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Content repository root.
    #[arg(long, global = true, default_value = ".", env = "ANTHOLOGY_ROOT")]
    root: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Inventory every content file with its extracted metadata.
    Scan {
        /// Write the JSON inventory here instead of stdout (the write is
        /// skipped when nothing changed).
        #[arg(long)]
        out: Option<PathBuf>,
        /// Log per-file cache hit rates after the pass.
        #[arg(long, default_value_t = false)]
        stats: bool,
    },
    /// Parse and print every collection manifest.
    Collections,
    /// Print one agent's metadata and MCP server configs.
    Agent {
        file: PathBuf,
        /// MCP registry snapshot for canonical name resolution.
        #[arg(long)]
        registry: Option<PathBuf>,
    },
}

fn init_tracing(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let store = ContentStore::new(cli.root.clone());
    match cli.command {
        Commands::Scan { out, stats } => scan(&store, out.as_deref(), stats).await,
        Commands::Collections => collections(&store).await,
        Commands::Agent { file, registry } => agent(&store, &file, registry).await,
    }
}

#[derive(Serialize)]
struct InventoryEntry {
    path: String,
    kind: ContentKind,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    mcp_servers: Vec<String>,
}

fn display_path(store: &ContentStore, path: &Path) -> String {
    path.strip_prefix(store.root())
        .unwrap_or(path)
        .display()
        .to_string()
}

async fn scan(store: &ContentStore, out: Option<&Path>, stats: bool) -> anyhow::Result<()> {
    let mut inventory = Vec::new();
    for content_kind in ContentKind::ALL {
        let files = kind::list_files(store.root(), content_kind).await?;
        info!(kind = ?content_kind, count = files.len(), "scanned content directory");

        for path in files {
            let entry = if content_kind == ContentKind::Collection {
                let Some(collection) = store.collection(&path).await else {
                    continue;
                };
                InventoryEntry {
                    path: display_path(store, &path),
                    kind: content_kind,
                    title: collection.name,
                    description: Some(collection.description),
                    mcp_servers: Vec::new(),
                }
            } else {
                InventoryEntry {
                    path: display_path(store, &path),
                    kind: content_kind,
                    title: store.title(&path).await,
                    description: store.description(&path).await,
                    mcp_servers: if content_kind == ContentKind::Agent {
                        store.mcp_server_names(&path).await
                    } else {
                        Vec::new()
                    },
                }
            };
            inventory.push(entry);
        }
    }

    let json = serde_json::to_string_pretty(&inventory)?;
    match out {
        Some(path) => {
            let outcome = write::write_if_changed(path, &json).await?;
            info!(path = %path.display(), ?outcome, "inventory export");
        },
        None => println!("{json}"),
    }

    if stats {
        for (path, file_stats) in store.cache().stats().await {
            info!(
                path = %path.display(),
                reads = file_stats.reads,
                hits = file_stats.hits,
                hit_rate = file_stats.hit_rate(),
                "cache"
            );
        }
    }
    Ok(())
}

async fn collections(store: &ContentStore) -> anyhow::Result<()> {
    let files = kind::list_files(store.root(), ContentKind::Collection).await?;
    let mut parsed = Vec::new();
    for path in files {
        if let Some(collection) = store.collection(&path).await {
            parsed.push(collection);
        }
    }
    println!("{}", serde_json::to_string_pretty(&parsed)?);
    Ok(())
}

#[derive(Serialize)]
struct ServerReport {
    #[serde(flatten)]
    config: McpServerConfig,
    /// Canonical registry identifier, when the display name resolves.
    #[serde(skip_serializing_if = "Option::is_none")]
    canonical_name: Option<String>,
}

async fn agent(store: &ContentStore, file: &Path, registry: Option<PathBuf>) -> anyhow::Result<()> {
    let path = if file.is_absolute() {
        file.to_path_buf()
    } else {
        store.root().join(file)
    };
    let Some(metadata) = store.agent_metadata(&path).await else {
        anyhow::bail!("no agent metadata in {}", path.display());
    };

    let registry_path = registry.unwrap_or_else(|| store.root().join("mcp-registry.json"));
    let index = McpRegistryIndex::global(&registry_path);

    let servers: Vec<ServerReport> = metadata
        .server_configs()
        .into_iter()
        .map(|config| ServerReport {
            canonical_name: index
                .lookup(&config.name)
                .map(|entry| entry.canonical_name.clone()),
            config,
        })
        .collect();

    let report = serde_json::json!({
        "name": metadata.name,
        "description": metadata.description,
        "tools": metadata.tools,
        "servers": servers,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
