//! Display-title resolution for content files.
//!
//! Titles come from frontmatter when present, otherwise from the first
//! markdown heading, otherwise from the file name itself.

use std::path::Path;

use crate::{kind::ContentKind, parse};

/// Convert a hyphen/underscore slug into Title Case words. Characters
/// after the first of each word keep their case.
#[must_use]
pub fn title_from_slug(slug: &str) -> String {
    slug.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// First `# ` heading in a markdown body, ignoring fenced code blocks.
#[must_use]
pub fn first_heading(markdown: &str) -> Option<String> {
    let mut in_code_block = false;
    for line in markdown.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("```") || trimmed.starts_with("````") {
            in_code_block = !in_code_block;
            continue;
        }
        if !in_code_block && line.starts_with("# ") {
            return Some(line[2..].trim().to_string());
        }
    }
    None
}

/// File name with its known content suffix (or plain extension) stripped.
#[must_use]
pub fn file_stem(path: &Path) -> String {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    match ContentKind::of(path) {
        Some(kind) => name.trim_end_matches(kind.suffix()).to_string(),
        None => Path::new(name)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(name)
            .to_string(),
    }
}

/// Fallback title derived from the file name alone.
#[must_use]
pub fn title_from_path(path: &Path) -> String {
    title_from_slug(&file_stem(path))
}

/// Resolve a document's display title: frontmatter `title`, then
/// frontmatter `name` expanded from its slug, then the first heading
/// after the frontmatter block, then the file name.
#[must_use]
pub fn resolve_title(path: &Path, content: &str) -> String {
    let split = parse::split_frontmatter(content);
    if let Some((raw, _)) = split
        && let Ok(frontmatter) = parse::parse_block(raw)
    {
        if let Some(title) = frontmatter.title() {
            return title.to_string();
        }
        if let Some(name) = frontmatter.name() {
            return title_from_slug(name);
        }
    }

    let body = split.map_or(content, |(_, body)| body);
    match first_heading(body) {
        Some(heading) => heading,
        None => title_from_path(path),
    }
}
