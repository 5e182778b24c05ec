//! Navigation helpers over a written index.
//!
//! The site reads the JSON index at configuration time and turns each
//! top-level section into a menu entry linking to `?name=<title>`. Sections
//! whose title is reserved (by default `nav`, which holds the menu's own
//! content) are skipped. Section pages look their entries up by directory name.

use crate::types::TreeNode;
use serde::Serialize;

/// One entry of the top navigation menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub text: String,
    pub link: String,
}

fn is_reserved(title: &str, reserved: &[String]) -> bool {
    reserved.iter().any(|r| r == title)
}

/// Menu entries for every non-reserved top-level node, in index order.
pub fn nav_entries(tree: &[TreeNode], reserved: &[String]) -> Vec<NavEntry> {
    title_set(tree, reserved)
        .into_iter()
        .map(|title| NavEntry {
            text: title.to_string(),
            link: format!("?name={title}"),
        })
        .collect()
}

/// Distinct non-reserved top-level titles, first occurrence wins.
pub fn title_set<'a>(tree: &'a [TreeNode], reserved: &[String]) -> Vec<&'a str> {
    let mut titles: Vec<&str> = Vec::new();
    for node in tree {
        if is_reserved(&node.title, reserved) || titles.contains(&node.title.as_str()) {
            continue;
        }
        titles.push(&node.title);
    }
    titles
}

/// Children of the top-level directory named `dir_name`.
///
/// `None` if there is no such node or it is a file.
pub fn find_section<'a>(tree: &'a [TreeNode], dir_name: &str) -> Option<&'a [TreeNode]> {
    tree.iter()
        .find(|n| n.title == dir_name)
        .and_then(|n| n.items.as_deref())
}
