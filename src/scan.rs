//! Documentation tree building.
//!
//! Walks the documentation directory and turns it into the nested
//! [`TreeNode`] list that the site's navigation is generated from.
//!
//! ## Directory Structure
//!
//! ```text
//! docs/                       # Base directory
//! ├── index.md                # Excluded: content of the root page itself
//! ├── intro.md                # → { title: "intro", link: "/docs/intro", ... }
//! ├── .DS_Store               # Excluded: OS artifact
//! └── vue/                    # → { title: "vue", link: "/docs/vue", items: [...] }
//!     ├── index.md            # Excluded
//!     └── basics.md           # → { title: "basics", link: "/docs/vue/basics",
//!                             #     metadata: { title: "Vue Basics" }, fileExtension: ".md" }
//! ```
//!
//! ## Pipeline
//!
//! 1. [`Walker`] lists every non-excluded entry in pre-order, each tagged
//!    with its depth.
//! 2. Each entry becomes a childless node. This is where files are read for
//!    front-matter, so it runs on the rayon pool; `collect` keeps walker order.
//! 3. Nodes are nested with an explicit stack of open directories, so deep
//!    trees cannot overflow the call stack.
//!
//! Walker and link failures abort the build. Front-matter failures never do;
//! see [`crate::metadata`].

use crate::config::{IndexConfig, TreeMode};
use crate::link::{LinkError, LinkStyle};
use crate::metadata::extract_metadata;
use crate::naming::parse_file_name;
use crate::types::TreeNode;
use crate::walk::{Entry, WalkError, Walker};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error(transparent)]
    Walk(#[from] WalkError),
    #[error(transparent)]
    Link(#[from] LinkError),
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

/// Build the documentation tree rooted at `root`.
///
/// The returned list holds one node per non-excluded entry directly inside
/// `root`, in walker order.
pub fn build_tree(root: &Path, config: &IndexConfig) -> Result<Vec<TreeNode>, ScanError> {
    let root_meta = fs::metadata(root).map_err(|source| WalkError::Io {
        path: root.to_path_buf(),
        source,
    })?;
    if !root_meta.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let walk_options = config.walk_options();
    let entries = Walker::new(&walk_options).walk(root)?;
    tracing::debug!(root = %root.display(), entries = entries.len(), "Walked documentation tree");

    let builder = NodeBuilder {
        root,
        mode: config.index.mode,
        links: config.link_style(),
        markdown_extensions: &config.index.markdown_extensions,
    };
    let nodes = entries
        .par_iter()
        .map(|entry| builder.node(entry))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(assemble(&entries, nodes))
}

/// Turns one walker entry into a node without children.
struct NodeBuilder<'a> {
    root: &'a Path,
    mode: TreeMode,
    links: LinkStyle,
    markdown_extensions: &'a [String],
}

impl NodeBuilder<'_> {
    fn node(&self, entry: &Entry) -> Result<TreeNode, ScanError> {
        if self.mode == TreeMode::Minimal {
            return Ok(TreeNode {
                title: entry.name.clone(),
                link: None,
                metadata: None,
                file_extension: None,
                items: entry.is_dir().then(Vec::new),
            });
        }

        let link = self.links.link_for(self.root, &entry.path, !entry.is_dir())?;

        if entry.is_dir() {
            return Ok(TreeNode {
                title: entry.name.clone(),
                link: Some(link),
                metadata: None,
                file_extension: None,
                items: Some(Vec::new()),
            });
        }

        let parsed = parse_file_name(&entry.name);
        let metadata = extract_metadata(&entry.path, self.markdown_extensions);
        tracing::debug!(
            path = %entry.path.display(),
            has_metadata = metadata.is_some(),
            "Indexed file"
        );

        Ok(TreeNode {
            title: parsed.title,
            link: Some(link),
            metadata,
            file_extension: Some(parsed.extension),
            items: None,
        })
    }
}

/// Nest pre-order `nodes` using each entry's depth.
///
/// `open` holds the chain of directories that are still receiving children;
/// a directory is closed and attached to its parent as soon as an entry at
/// its own depth or shallower arrives.
fn assemble(entries: &[Entry], nodes: Vec<TreeNode>) -> Vec<TreeNode> {
    let mut top: Vec<TreeNode> = Vec::new();
    let mut open: Vec<(TreeNode, Vec<TreeNode>)> = Vec::new();

    for (entry, node) in entries.iter().zip(nodes) {
        while open.len() >= entry.depth {
            close_last(&mut open, &mut top);
        }
        if entry.is_dir() {
            open.push((node, Vec::new()));
        } else {
            match open.last_mut() {
                Some((_, children)) => children.push(node),
                None => top.push(node),
            }
        }
    }
    while !open.is_empty() {
        close_last(&mut open, &mut top);
    }

    top
}

fn close_last(open: &mut Vec<(TreeNode, Vec<TreeNode>)>, top: &mut Vec<TreeNode>) {
    let Some((mut dir, children)) = open.pop() else {
        return;
    };
    dir.items = Some(children);
    match open.last_mut() {
        Some((_, siblings)) => siblings.push(dir),
        None => top.push(dir),
    }
}
