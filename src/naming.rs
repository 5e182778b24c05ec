//! File name parsing shared by the tree builder and the link generator.
//!
//! A file's title is its name with the *last* extension removed, and the
//! removed part (dot included) is kept as the node's extension:
//!
//! - `basics.md` → title `basics`, extension `.md`
//! - `v1.2.notes.md` → title `v1.2.notes`, extension `.md`
//! - `Makefile` → title `Makefile`, extension `""`
//! - `.gitignore` → title `.gitignore`, extension `""` (leading dot is part of the name)
//!
//! Concatenating the two always yields the original name.

/// Result of splitting a file name like `basics.md`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Name without its last extension.
    pub title: String,
    /// Last extension including the dot, or empty.
    pub extension: String,
}

pub fn parse_file_name(name: &str) -> ParsedName {
    match name.rfind('.') {
        // A dot at position 0 marks a hidden file, not an extension.
        Some(dot) if dot > 0 => ParsedName {
            title: name[..dot].to_string(),
            extension: name[dot..].to_string(),
        },
        _ => ParsedName {
            title: name.to_string(),
            extension: String::new(),
        },
    }
}

/// Name with the last extension removed.
pub fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) if dot > 0 => &name[..dot],
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markdown_file() {
        let p = parse_file_name("basics.md");
        assert_eq!(p.title, "basics");
        assert_eq!(p.extension, ".md");
    }

    #[test]
    fn only_last_extension_is_removed() {
        let p = parse_file_name("v1.2.notes.md");
        assert_eq!(p.title, "v1.2.notes");
        assert_eq!(p.extension, ".md");
    }

    #[test]
    fn no_extension() {
        let p = parse_file_name("Makefile");
        assert_eq!(p.title, "Makefile");
        assert_eq!(p.extension, "");
    }

    #[test]
    fn hidden_file_keeps_leading_dot() {
        let p = parse_file_name(".gitignore");
        assert_eq!(p.title, ".gitignore");
        assert_eq!(p.extension, "");
    }

    #[test]
    fn trailing_dot() {
        let p = parse_file_name("draft.");
        assert_eq!(p.title, "draft");
        assert_eq!(p.extension, ".");
    }

    #[test]
    fn title_plus_extension_is_original_name() {
        for name in ["a.md", "b", ".env", "c.d.e", "笔记.markdown", "x."] {
            let p = parse_file_name(name);
            assert_eq!(format!("{}{}", p.title, p.extension), name);
        }
    }

    #[test]
    fn strip_extension_matches_parse() {
        assert_eq!(strip_extension("basics.md"), "basics");
        assert_eq!(strip_extension(".hidden"), ".hidden");
        assert_eq!(strip_extension("plain"), "plain");
    }
}
