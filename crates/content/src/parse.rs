//! Frontmatter extraction and field normalization.
//!
//! Content markdown files (instructions, prompts, chat modes, agents)
//! carry their metadata in a leading `---`-delimited YAML block. YAML
//! multiline scalars accumulate trailing whitespace that breaks string
//! comparisons downstream, so the string fields used for display are
//! normalized at parse time.

use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::{
    cache::FileCache,
    error::{Error, Result},
};

/// Parsed YAML frontmatter with document key order preserved.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct Frontmatter {
    fields: Mapping,
}

impl Frontmatter {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// A field's value when it is a string; `None` otherwise.
    #[must_use]
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.str_field("title")
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.str_field("description")
    }

    #[must_use]
    pub fn fields(&self) -> &Mapping {
        &self.fields
    }
}

impl From<Mapping> for Frontmatter {
    fn from(mut fields: Mapping) -> Self {
        normalize_fields(&mut fields);
        Self { fields }
    }
}

/// Strip trailing newline runs, then surrounding whitespace. Applied to
/// `name` and `title`.
#[must_use]
pub fn normalize_label(value: &str) -> String {
    value.trim_end_matches(['\r', '\n']).trim().to_string()
}

/// Strip only trailing whitespace and newlines, preserving internal
/// formatting verbatim. Applied to `description`.
#[must_use]
pub fn normalize_description(value: &str) -> String {
    value.trim_end().to_string()
}

/// Split a markdown document at the leading `---` delimiters into
/// `(frontmatter, body)`. `None` when the document has no block.
pub(crate) fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let after_open = content.trim_start().strip_prefix("---")?;
    let close = after_open.find("\n---")?;
    let frontmatter = after_open[..close].trim();
    let body = after_open[close + 4..].trim();
    Some((frontmatter, body))
}

/// Parse a raw frontmatter block into a normalized mapping. An empty
/// block is an empty mapping, not an error.
pub(crate) fn parse_block(raw: &str) -> Result<Frontmatter> {
    if raw.is_empty() {
        return Ok(Frontmatter::default());
    }
    let fields: Mapping = serde_yaml::from_str(raw)?;
    Ok(Frontmatter::from(fields))
}

/// Parse the frontmatter block of already-read document content.
pub fn parse_frontmatter_str(content: &str, path: &Path) -> Result<Frontmatter> {
    let (raw, _body) =
        split_frontmatter(content).ok_or_else(|| Error::missing_frontmatter(path))?;
    parse_block(raw)
}

/// Read a markdown file (through the cache) and parse its frontmatter.
pub async fn parse_frontmatter(cache: &FileCache, path: &Path) -> Result<Frontmatter> {
    let content = cache.read_cached(path).await?;
    parse_frontmatter_str(&content, path)
}

fn normalize_fields(fields: &mut Mapping) {
    for key in ["name", "title"] {
        if let Some(Value::String(value)) = fields.get_mut(key) {
            *value = normalize_label(value);
        }
    }
    if let Some(Value::String(value)) = fields.get_mut("description") {
        *value = normalize_description(value);
    }
}
