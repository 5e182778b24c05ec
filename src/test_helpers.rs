//! Shared test utilities for the doctree test suite.
//!
//! Builds a small documentation tree in a temp directory and provides lookup
//! helpers that panic with a readable message on a miss.
//!
//! ```text
//! <tmp>/
//! ├── index.md                 (excluded)
//! ├── .DS_Store                (excluded)
//! ├── intro.md                 title: Introduction
//! ├── nav/
//! │   └── links.md
//! ├── typescript/
//! │   ├── generics.md          unterminated front-matter
//! │   └── notes.txt
//! └── vue/
//!     ├── index.md             (excluded)
//!     ├── advanced.md          no front-matter
//!     ├── basics.md            title: Vue Basics, order: 1, tags: [vue, intro]
//!     └── components/
//!         └── props.md
//! ```

use std::fs;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use crate::config::IndexConfig;
use crate::types::TreeNode;

// =========================================================================
// Fixture setup
// =========================================================================

/// Write the fixture documentation tree into a fresh temp directory.
pub fn setup_docs() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_docs(tmp.path());
    tmp
}

pub fn write_docs(root: &Path) {
    let files: &[(&str, &str)] = &[
        ("index.md", "---\nlayout: home\n---\n# Home\n"),
        (".DS_Store", "\0\0\0\x01Bud1"),
        ("intro.md", "---\ntitle: Introduction\n---\n# Intro\n"),
        ("nav/links.md", "# Links\n"),
        (
            "typescript/generics.md",
            "---\ntitle: Generics\nthis block never closes\n",
        ),
        ("typescript/notes.txt", "plain notes\n"),
        ("vue/index.md", "# Vue\n"),
        ("vue/advanced.md", "# Advanced\n"),
        (
            "vue/basics.md",
            "---\ntitle: Vue Basics\norder: 1\ntags: [vue, intro]\n---\n# Basics\n",
        ),
        ("vue/components/props.md", "---\ntitle: Props\n---\n"),
    ];

    for (rel, content) in files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
    }
}

/// Default config with name-sorted siblings, so assertions can rely on order.
pub fn sorted_config() -> IndexConfig {
    let mut config = IndexConfig::default();
    config.index.sort = true;
    config
}

// =========================================================================
// Tree lookups
// =========================================================================

/// Find a node by title among `nodes`. Panics if not found.
pub fn find_node<'a>(nodes: &'a [TreeNode], title: &str) -> &'a TreeNode {
    nodes.iter().find(|n| n.title == title).unwrap_or_else(|| {
        panic!("node '{title}' not found. Available: {:?}", titles(nodes))
    })
}

/// Titles of `nodes` in order.
pub fn titles(nodes: &[TreeNode]) -> Vec<&str> {
    nodes.iter().map(|n| n.title.as_str()).collect()
}

/// Rebuilt file names of every file node in the tree, depth-first.
pub fn collect_file_names(nodes: &[TreeNode], out: &mut Vec<String>) {
    for node in nodes {
        if node.is_dir() {
            collect_file_names(node.children(), out);
        } else {
            out.push(node.file_name());
        }
    }
}

// =========================================================================
// Log capture
// =========================================================================

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a plain-text subscriber installed on this thread and return
/// its result with everything logged at INFO and above.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.0.lock().unwrap()).into_owned();
    (result, logs)
}
