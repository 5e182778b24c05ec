//! Shared types serialized into the documentation index.
//!
//! The JSON artifact written by [`crate::manifest`] is an array of [`TreeNode`]
//! values, and the navigation helpers in [`crate::nav`] read the same shape
//! back. Field names follow the site's conventions (`fileExtension` is
//! camel-cased) and absent optionals are omitted instead of written as `null`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Front-matter mapping attached to a markdown node.
///
/// A `BTreeMap` keeps keys sorted, so repeated runs over the same files emit
/// byte-identical JSON.
pub type Metadata = BTreeMap<String, MetaValue>;

/// A single front-matter value.
///
/// YAML front-matter is open-ended, but everything it can express that makes
/// sense in a JSON index fits one of these cases. Serialized untagged, so
/// `MetaValue::String("Foo")` is written as `"Foo"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(Vec<MetaValue>),
    Mapping(BTreeMap<String, MetaValue>),
}

impl MetaValue {
    /// The string payload, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::String(s) => Some(s),
            _ => None,
        }
    }
}

/// One entry (file or directory) of the documentation tree.
///
/// A directory always has `items` (possibly empty) and never a
/// `file_extension`; a file never has `items`. In minimal mode only `title`
/// and `items` are populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    /// Entry name with the last extension removed (directories keep their name).
    pub title: String,
    /// Site-relative URL, e.g. `/docs/vue/basics`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Parsed front-matter, only for markdown files that have a valid block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    /// Extension including the leading dot (`.md`); `""` for extensionless files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_extension: Option<String>,
    /// Children of a directory, in walker order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<TreeNode>>,
}

impl TreeNode {
    pub fn is_dir(&self) -> bool {
        self.items.is_some()
    }

    /// The on-disk name this node was built from.
    ///
    /// Full-mode file nodes rejoin title and extension; everything else
    /// already carries the raw name in `title`.
    pub fn file_name(&self) -> String {
        match &self.file_extension {
            Some(ext) => format!("{}{}", self.title, ext),
            None => self.title.clone(),
        }
    }

    /// Children of a directory node; empty for files.
    pub fn children(&self) -> &[TreeNode] {
        self.items.as_deref().unwrap_or(&[])
    }
}

/// Aggregate counts over a built tree, used for CLI summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub directories: usize,
    pub files: usize,
    pub with_metadata: usize,
    pub max_depth: usize,
}

impl TreeStats {
    pub fn collect(nodes: &[TreeNode]) -> Self {
        let mut stats = TreeStats::default();
        let mut stack: Vec<(&TreeNode, usize)> = nodes.iter().map(|n| (n, 1)).collect();

        while let Some((node, depth)) = stack.pop() {
            stats.max_depth = stats.max_depth.max(depth);
            if node.is_dir() {
                stats.directories += 1;
                stack.extend(node.children().iter().map(|c| (c, depth + 1)));
            } else {
                stats.files += 1;
                if node.metadata.is_some() {
                    stats.with_metadata += 1;
                }
            }
        }

        stats
    }

    pub fn entries(&self) -> usize {
        self.directories + self.files
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(title: &str, ext: &str) -> TreeNode {
        TreeNode {
            title: title.to_string(),
            link: None,
            metadata: None,
            file_extension: Some(ext.to_string()),
            items: None,
        }
    }

    fn dir(title: &str, items: Vec<TreeNode>) -> TreeNode {
        TreeNode {
            title: title.to_string(),
            link: None,
            metadata: None,
            file_extension: None,
            items: Some(items),
        }
    }

    #[test]
    fn absent_fields_are_omitted_from_json() {
        let json = serde_json::to_value(file("basics", ".md")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "title": "basics", "fileExtension": ".md" })
        );
    }

    #[test]
    fn directory_serializes_empty_items() {
        let json = serde_json::to_value(dir("empty", vec![])).unwrap();
        assert_eq!(json, serde_json::json!({ "title": "empty", "items": [] }));
    }

    #[test]
    fn meta_values_serialize_as_plain_json() {
        let mut meta = Metadata::new();
        meta.insert("title".into(), MetaValue::String("Foo".into()));
        meta.insert("order".into(), MetaValue::Integer(3));
        meta.insert("draft".into(), MetaValue::Bool(false));
        meta.insert(
            "tags".into(),
            MetaValue::Sequence(vec![MetaValue::String("a".into())]),
        );
        meta.insert("empty".into(), MetaValue::Null);

        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "draft": false,
                "empty": null,
                "order": 3,
                "tags": ["a"],
                "title": "Foo"
            })
        );
    }

    #[test]
    fn deserializes_what_it_serializes() {
        let tree = vec![dir("vue", vec![file("basics", ".md")])];
        let json = serde_json::to_string(&tree).unwrap();
        let back: Vec<TreeNode> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tree);
    }

    #[test]
    fn file_name_rejoins_extension() {
        assert_eq!(file("basics", ".md").file_name(), "basics.md");
        assert_eq!(file("Makefile", "").file_name(), "Makefile");
        assert_eq!(dir("vue", vec![]).file_name(), "vue");
    }

    #[test]
    fn stats_count_nested_nodes() {
        let mut with_meta = file("intro", ".md");
        with_meta.metadata = Some(Metadata::new());
        let tree = vec![
            with_meta,
            dir("vue", vec![file("a", ".md"), dir("deep", vec![file("b", ".md")])]),
        ];

        let stats = TreeStats::collect(&tree);
        assert_eq!(stats.directories, 2);
        assert_eq!(stats.files, 3);
        assert_eq!(stats.with_metadata, 1);
        assert_eq!(stats.max_depth, 3);
        assert_eq!(stats.entries(), 5);
    }
}
