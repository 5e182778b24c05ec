//! Reading and writing the JSON index.
//!
//! The index is pretty-printed with two-space indentation and a trailing
//! newline, so it diffs cleanly under version control. Writing replaces any
//! existing file. There is no partial-write recovery: a failed write is
//! reported and the build stops.

use crate::types::TreeNode;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("cannot write index {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot read index {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid index {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Render the tree exactly as [`write_tree`] stores it.
pub fn to_json(nodes: &[TreeNode]) -> Result<String, serde_json::Error> {
    let mut json = serde_json::to_string_pretty(nodes)?;
    json.push('\n');
    Ok(json)
}

/// Serialize `nodes` to `path`, creating parent directories as needed.
pub fn write_tree(nodes: &[TreeNode], path: &Path) -> Result<(), ManifestError> {
    let json = to_json(nodes).map_err(|source| ManifestError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let write_err = |source| ManifestError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, json).map_err(write_err)?;

    tracing::info!(path = %path.display(), "Wrote documentation index");
    Ok(())
}

/// Load a previously written index.
pub fn read_tree(path: &Path) -> Result<Vec<TreeNode>, ManifestError> {
    let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ManifestError::Json {
        path: path.to_path_buf(),
        source,
    })
}
