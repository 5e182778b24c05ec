//! Front-matter extraction for markdown files.
//!
//! A front-matter block is YAML between two `---` lines at the very top of
//! the file:
//!
//! ```text
//! ---
//! title: Vue Basics
//! tags: [vue, intro]
//! ---
//! # Body starts here
//! ```
//!
//! Extraction never fails the build. A file that cannot be read, or whose
//! block is unterminated or not valid YAML, is logged with `tracing::warn!`
//! and indexed without metadata. Files that simply have no block, and files
//! that are not markdown at all, produce `None` silently.

use crate::types::{MetaValue, Metadata};
use serde_yaml::{Mapping, Value};
use std::path::Path;
use thiserror::Error;

const DELIMITER: &str = "---";

#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("front-matter opened with '---' but never closed")]
    Unterminated,
    #[error("invalid YAML in front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("front-matter is not a key/value mapping")]
    NotAMapping,
}

/// Whether `path` has one of the given extensions (case-insensitive, no dot).
pub fn is_markdown(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy();
            extensions.iter().any(|m| m.eq_ignore_ascii_case(&ext))
        })
        .unwrap_or(false)
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

/// Return the raw text between the opening and closing delimiters.
///
/// `Ok(None)` means the document has no front-matter. The opening delimiter
/// must be the first line; a UTF-8 BOM before it is ignored.
pub fn split_front_matter(content: &str) -> Result<Option<&str>, FrontMatterError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split_inclusive('\n');

    match lines.next() {
        Some(first) if is_delimiter(first) => {}
        _ => return Ok(None),
    }

    let start = content.find('\n').map(|i| i + 1).unwrap_or(content.len());
    let mut offset = start;
    for line in lines {
        if is_delimiter(line) {
            return Ok(Some(&content[start..offset]));
        }
        offset += line.len();
    }

    Err(FrontMatterError::Unterminated)
}

/// Parse the front-matter block of a markdown document.
///
/// Empty and comment-only blocks yield `Ok(None)`, the same as no block.
pub fn parse_front_matter(content: &str) -> Result<Option<Metadata>, FrontMatterError> {
    let Some(block) = split_front_matter(content)? else {
        return Ok(None);
    };
    if block.trim().is_empty() {
        return Ok(None);
    }

    match serde_yaml::from_str::<Value>(block)? {
        Value::Null => Ok(None),
        Value::Mapping(mapping) => Ok(Some(to_metadata(mapping))),
        _ => Err(FrontMatterError::NotAMapping),
    }
}

/// Scalar keys (`2024`, `true`) are kept in their string form; a key that is
/// itself a sequence, mapping or null is dropped with the value under it.
fn to_metadata(mapping: Mapping) -> Metadata {
    mapping
        .into_iter()
        .filter_map(|(key, value)| {
            let key = match key {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                other => {
                    tracing::debug!(key = ?other, "Skipping non-scalar front-matter key");
                    return None;
                }
            };
            Some((key, to_meta_value(value)))
        })
        .collect()
}

fn to_meta_value(value: Value) -> MetaValue {
    match value {
        Value::Null => MetaValue::Null,
        Value::Bool(b) => MetaValue::Bool(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => MetaValue::Integer(i),
            None => MetaValue::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => MetaValue::String(s),
        Value::Sequence(items) => MetaValue::Sequence(items.into_iter().map(to_meta_value).collect()),
        Value::Mapping(mapping) => MetaValue::Mapping(to_metadata(mapping)),
        Value::Tagged(tagged) => to_meta_value(tagged.value),
    }
}

/// Read `path` and return its front-matter, degrading to `None` on any failure.
pub fn extract_metadata(path: &Path, extensions: &[String]) -> Option<Metadata> {
    if !is_markdown(path, extensions) {
        return None;
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read markdown file, indexing without metadata");
            return None;
        }
    };

    match parse_front_matter(&content) {
        Ok(meta) => meta,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to parse front-matter, indexing without metadata");
            None
        }
    }
}
