//! # doctree
//!
//! Scans a documentation directory and writes the JSON tree that a
//! documentation site builds its navigation from. Directories become
//! sections, markdown files become pages, and each page's front-matter rides
//! along as metadata.
//!
//! ```text
//! docs/  →  walk  →  nodes (links + front-matter)  →  nest  →  docsTree.json
//! ```
//!
//! The tree is rebuilt from scratch on every run and written once; it is a
//! snapshot, never patched in place. Running twice over an unchanged
//! directory produces byte-identical output, provided the filesystem lists
//! entries in a stable order (or `index.sort` is enabled).
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`walk`] | Pre-order directory listing with exclusions and symlink-cycle detection |
//! | [`metadata`] | Front-matter extraction; failures degrade to "no metadata" |
//! | [`link`] | Relative path → `/docs/...` link, optional percent-encoding |
//! | [`naming`] | Title/extension split for file names |
//! | [`scan`] | Tree building: parallel node construction, stack-based nesting |
//! | [`manifest`] | JSON index writing and reading |
//! | [`nav`] | Navigation menu entries and section lookup over a written index |
//! | [`types`] | `TreeNode`, `MetaValue`, `TreeStats` |
//! | [`config`] | `doctree.toml` loading over stock defaults |
//! | [`output`] | CLI output formatting |
//!
//! # Failure Policy
//!
//! An unreadable base directory, a symlink cycle, or an unwritable output
//! file stops the run with an error naming the path. A markdown file that
//! cannot be read or has broken front-matter is logged as a warning and
//! indexed without metadata.

pub mod config;
pub mod link;
pub mod manifest;
pub mod metadata;
pub mod naming;
pub mod nav;
pub mod output;
pub mod scan;
pub mod types;
pub mod walk;

#[cfg(test)]
pub(crate) mod test_helpers;

use std::path::Path;
use thiserror::Error;

pub use config::IndexConfig;
pub use types::{MetaValue, Metadata, TreeNode, TreeStats};

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Scan(#[from] scan::ScanError),
    #[error(transparent)]
    Manifest(#[from] manifest::ManifestError),
}

/// Build the tree for `source` and write it to `output`.
pub fn run_index(
    source: &Path,
    output: &Path,
    config: &IndexConfig,
) -> Result<Vec<TreeNode>, Error> {
    let tree = scan::build_tree(source, config)?;
    manifest::write_tree(&tree, output)?;
    Ok(tree)
}
