//! Site link generation.
//!
//! Every node's link is derived from its path relative to the documentation
//! base directory, with the file extension dropped and the mount prefix in
//! front:
//!
//! ```text
//! <base>/vue/basics.md   →  /docs/vue/basics
//! <base>/intro.md        →  /docs/intro
//! <base>/vue             →  /docs/vue
//! <base>/docs/guide.md   →  /docs/guide        (prefix not repeated)
//! ```
//!
//! ## Encoding policy
//!
//! With `encode = true` (the default) each path segment is percent-encoded,
//! leaving RFC 3986 `pchar` characters untouched. ASCII names are therefore
//! unchanged, while spaces and non-ASCII names become URL-safe
//! (`笔记` → `%E7%AC%94%E8%AE%B0`). The prefix is used as configured.

use crate::naming;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Characters left alone inside a path segment: unreserved, sub-delims, `:` and `@`.
const SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=')
    .remove(b':')
    .remove(b'@');

#[derive(Error, Debug)]
pub enum LinkError {
    #[error("{} is outside the documentation base {}", path.display(), base.display())]
    OutsideBase { path: PathBuf, base: PathBuf },
}

/// How links are rendered.
#[derive(Debug, Clone)]
pub struct LinkStyle {
    prefix_segments: Vec<String>,
    encode: bool,
}

impl LinkStyle {
    /// `prefix` may be written `/docs/`, `/docs` or `docs`; `/` or `""` means no prefix.
    pub fn new(prefix: &str, encode: bool) -> Self {
        Self {
            prefix_segments: prefix
                .split('/')
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
            encode,
        }
    }

    /// Link for `path`, which must live under `base`.
    ///
    /// `strip_ext` is set for files; directory names are used verbatim.
    pub fn link_for(
        &self,
        base: &Path,
        path: &Path,
        strip_ext: bool,
    ) -> Result<String, LinkError> {
        let outside = || LinkError::OutsideBase {
            path: path.to_path_buf(),
            base: base.to_path_buf(),
        };
        let relative = path.strip_prefix(base).map_err(|_| outside())?;

        let mut segments = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(name) => segments.push(name.to_string_lossy().into_owned()),
                Component::CurDir => {}
                _ => return Err(outside()),
            }
        }
        if strip_ext && let Some(last) = segments.last_mut() {
            *last = naming::strip_extension(last).to_string();
        }

        // A file's own name never counts as the prefix: `docs.md` is a page
        // under the mount, not the mount itself.
        let dirs = if strip_ext {
            &segments[..segments.len().saturating_sub(1)]
        } else {
            &segments[..]
        };
        let already_prefixed = dirs.starts_with(&self.prefix_segments);
        let mut link = String::from("/");
        if !already_prefixed {
            for segment in &self.prefix_segments {
                link.push_str(segment);
                link.push('/');
            }
        }
        let encoded: Vec<String> = segments.iter().map(|s| self.encode_segment(s)).collect();
        link.push_str(&encoded.join("/"));

        Ok(link)
    }

    fn encode_segment(&self, segment: &str) -> String {
        if self.encode {
            utf8_percent_encode(segment, SEGMENT_ENCODE_SET).to_string()
        } else {
            segment.to_string()
        }
    }
}
