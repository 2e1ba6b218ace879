//! File content cache keyed by path and validated by modification time.
//!
//! The generator makes several cross-referencing passes over the same
//! files (frontmatter, title, description, server configs); this cache
//! collapses those into one read per file per run while staying correct
//! when a file changes between passes.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    time::SystemTime,
};

use {serde::Serialize, tokio::sync::Mutex};

use crate::error::Result;

/// A cached read: the content plus the modification time it was taken at.
#[derive(Debug, Clone)]
struct CacheEntry {
    content: String,
    modified: SystemTime,
}

/// Per-path read accounting, kept for observability only.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct CacheStats {
    pub reads: u64,
    pub hits: u64,
}

impl CacheStats {
    /// Percentage of reads served from the cache; 0 when nothing was read.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        if self.reads == 0 {
            0.0
        } else {
            self.hits as f64 / self.reads as f64 * 100.0
        }
    }
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<PathBuf, CacheEntry>,
    stats: HashMap<PathBuf, CacheStats>,
}

/// Memoizes raw file contents, invalidated by modification-time
/// comparison.
///
/// A hit is only served when the stored modification time equals the
/// file's current one; any mismatch triggers a fresh read that replaces
/// the entry. The lock is never held across file I/O, so concurrent
/// readers of one path may both read the file — the loser merely
/// overwrites the entry with equally fresh content.
#[derive(Default)]
pub struct FileCache {
    state: Mutex<CacheState>,
}

impl FileCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read through the cache.
    pub async fn read_cached(&self, path: &Path) -> Result<String> {
        let modified = match tokio::fs::metadata(path).await.and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(err) => {
                // A file that cannot be statted must not keep stale content.
                self.state.lock().await.entries.remove(path);
                return Err(err.into());
            },
        };

        {
            let mut state = self.state.lock().await;
            let cached = match state.entries.get(path) {
                Some(entry) if entry.modified == modified => Some(entry.content.clone()),
                _ => None,
            };
            if let Some(content) = cached {
                let stats = state.stats.entry(path.to_path_buf()).or_default();
                stats.reads += 1;
                stats.hits += 1;
                return Ok(content);
            }
        }

        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(err) => {
                self.state.lock().await.entries.remove(path);
                return Err(err.into());
            },
        };

        let mut state = self.state.lock().await;
        state.entries.insert(path.to_path_buf(), CacheEntry {
            content: content.clone(),
            modified,
        });
        state.stats.entry(path.to_path_buf()).or_default().reads += 1;
        Ok(content)
    }

    /// Read directly, bypassing and not populating the cache. For call
    /// sites that need freshness regardless of cost.
    pub async fn read_fresh(&self, path: &Path) -> Result<String> {
        Ok(tokio::fs::read_to_string(path).await?)
    }

    /// Drop the entry and statistics for one path.
    pub async fn invalidate(&self, path: &Path) {
        let mut state = self.state.lock().await;
        state.entries.remove(path);
        state.stats.remove(path);
    }

    /// Drop all entries and statistics.
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        state.entries.clear();
        state.stats.clear();
    }

    /// Snapshot of the per-path read/hit counters.
    pub async fn stats(&self) -> HashMap<PathBuf, CacheStats> {
        self.state.lock().await.stats.clone()
    }
}
