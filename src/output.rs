//! CLI output formatting.
//!
//! Each view has a `format_*` function that returns lines (pure, testable)
//! and a `print_*` wrapper that writes them to stdout.
//!
//! ## Tree
//!
//! ```text
//! docs
//! ├── intro.md  [title: Introduction]
//! ├── typescript
//! │   └── generics.md
//! └── vue
//!     ├── basics.md  [order: 1, title: Vue Basics]
//!     └── components
//!         └── props.md
//! ```
//!
//! ## Summary
//!
//! ```text
//! Indexed 9 entries (3 directories, 6 files, 4 with front-matter, depth 3)
//!     Output: docsTree.json
//! ```

use crate::nav::NavEntry;
use crate::types::{MetaValue, Metadata, TreeNode, TreeStats};
use std::path::Path;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// Inline preview of scalar metadata, e.g. `title: Foo, order: 1`.
fn metadata_preview(meta: &Metadata) -> String {
    meta.iter()
        .filter_map(|(key, value)| {
            let shown = match value {
                MetaValue::String(s) => s.clone(),
                MetaValue::Integer(n) => n.to_string(),
                MetaValue::Float(f) => f.to_string(),
                MetaValue::Bool(b) => b.to_string(),
                _ => return None,
            };
            Some(format!("{key}: {shown}"))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Box-drawing listing of the tree under a root label.
pub fn format_tree(root_label: &str, nodes: &[TreeNode]) -> Vec<String> {
    let mut lines = vec![root_label.to_string()];
    // (node, prefix for its line, prefix for its children)
    let mut stack: Vec<(&TreeNode, String, String)> = Vec::new();
    push_children(&mut stack, nodes, "");

    while let Some((node, line_prefix, child_prefix)) = stack.pop() {
        let mut line = format!("{line_prefix}{}", node.file_name());
        if let Some(meta) = &node.metadata {
            let preview = metadata_preview(meta);
            if !preview.is_empty() {
                line.push_str(&format!("  [{preview}]"));
            }
        }
        lines.push(line);
        push_children(&mut stack, node.children(), &child_prefix);
    }

    lines
}

/// Push `nodes` in reverse so the stack pops them in order.
fn push_children<'a>(
    stack: &mut Vec<(&'a TreeNode, String, String)>,
    nodes: &'a [TreeNode],
    prefix: &str,
) {
    let last = nodes.len().saturating_sub(1);
    for (i, node) in nodes.iter().enumerate().rev() {
        let (pointer, continuation) = if i == last {
            (LAST_BRANCH, SPACE)
        } else {
            (BRANCH, PIPE)
        };
        stack.push((
            node,
            format!("{prefix}{pointer}"),
            format!("{prefix}{continuation}"),
        ));
    }
}

/// One-line count of what was indexed, plus the output path when written.
pub fn format_summary(stats: &TreeStats, output: Option<&Path>) -> Vec<String> {
    let mut lines = vec![format!(
        "Indexed {} entries ({} directories, {} files, {} with front-matter, depth {})",
        stats.entries(),
        stats.directories,
        stats.files,
        stats.with_metadata,
        stats.max_depth
    )];
    if let Some(path) = output {
        lines.push(format!("    Output: {}", path.display()));
    }
    lines
}

/// Navigation menu entries as `text → link`.
pub fn format_nav(entries: &[NavEntry]) -> Vec<String> {
    if entries.is_empty() {
        return vec!["(no navigation entries)".to_string()];
    }
    entries
        .iter()
        .map(|e| format!("{} → {}", e.text, e.link))
        .collect()
}

/// Section listing as `title → link`, nested by indentation.
pub fn format_section(name: &str, nodes: &[TreeNode]) -> Vec<String> {
    let mut lines = vec![name.to_string()];
    let mut stack: Vec<(&TreeNode, usize)> = nodes.iter().rev().map(|n| (n, 1)).collect();
    while let Some((node, depth)) = stack.pop() {
        let indent = SPACE.repeat(depth);
        match &node.link {
            Some(link) => lines.push(format!("{indent}{} → {link}", node.title)),
            None => lines.push(format!("{indent}{}", node.title)),
        }
        stack.extend(node.children().iter().rev().map(|c| (c, depth + 1)));
    }
    lines
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}

pub fn print_tree(root_label: &str, nodes: &[TreeNode]) {
    print_lines(format_tree(root_label, nodes));
}

pub fn print_summary(stats: &TreeStats, output: Option<&Path>) {
    print_lines(format_summary(stats, output));
}

pub fn print_nav(entries: &[NavEntry]) {
    print_lines(format_nav(entries));
}

pub fn print_section(name: &str, nodes: &[TreeNode]) {
    print_lines(format_section(name, nodes));
}
