//! Filesystem walker.
//!
//! Produces a flat, pre-order listing of everything below a directory: each
//! directory is yielded before its contents, and siblings keep the order the
//! OS returns them in (or file-name order when sorting is enabled). The tree
//! builder in [`crate::scan`] rebuilds nesting from each entry's `depth`, so
//! no recursion is needed anywhere in the pipeline.
//!
//! Excluded names are pruned before descent. Following symlinks is allowed,
//! but a link that points back at one of its own ancestors is reported as
//! [`WalkError::SymlinkCycle`] instead of being walked forever. A link whose
//! target is gone is logged and left out.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum WalkError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("symlink cycle: {} points back to ancestor {}", path.display(), ancestor.display())]
    SymlinkCycle { path: PathBuf, ancestor: PathBuf },
}

impl WalkError {
    fn from_walkdir(err: walkdir::Error, root: &Path) -> Self {
        let path = err
            .path()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root.to_path_buf());

        if let Some(ancestor) = err.loop_ancestor() {
            return WalkError::SymlinkCycle {
                path,
                ancestor: ancestor.to_path_buf(),
            };
        }

        let source = err
            .into_io_error()
            .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
        WalkError::Io { path, source }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One entry discovered below the walk root.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Full path, always `root` joined with the entry's relative path.
    pub path: PathBuf,
    /// File name as UTF-8 (lossy for non-UTF-8 names).
    pub name: String,
    /// 1 for direct children of the root.
    pub depth: usize,
    pub kind: EntryKind,
}

impl Entry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Walker settings, usually taken from `[index]` in `doctree.toml`.
#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    /// Entry names that are neither listed nor descended into.
    pub exclude: Vec<String>,
    /// Order siblings by file name instead of OS listing order.
    pub sort: bool,
    /// Traverse symlinked directories.
    pub follow_links: bool,
}

pub struct Walker<'a> {
    options: &'a WalkOptions,
}

impl<'a> Walker<'a> {
    pub fn new(options: &'a WalkOptions) -> Self {
        Self { options }
    }

    /// All entries below `root`, in pre-order.
    ///
    /// A symlink whose target no longer exists is logged and skipped; every
    /// other error aborts the walk.
    pub fn walk(&self, root: &Path) -> Result<Vec<Entry>, WalkError> {
        let mut walker = WalkDir::new(root)
            .min_depth(1)
            .follow_links(self.options.follow_links);
        if self.options.sort {
            walker = walker.sort_by_file_name();
        }

        let mut entries = Vec::new();
        for entry in walker.into_iter().filter_entry(|e| !self.is_excluded(e)) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if is_dangling_link(&err) => {
                    tracing::warn!(
                        path = %err.path().unwrap_or(root).display(),
                        "Skipping symlink with missing target"
                    );
                    continue;
                }
                Err(err) => return Err(WalkError::from_walkdir(err, root)),
            };
            let kind = if entry.file_type().is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            tracing::trace!(path = %entry.path().display(), depth = entry.depth(), "walked");
            entries.push(Entry {
                name: entry.file_name().to_string_lossy().into_owned(),
                depth: entry.depth(),
                path: entry.into_path(),
                kind,
            });
        }

        Ok(entries)
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        // The root itself is never filtered, whatever its name.
        if entry.depth() == 0 {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        self.options.exclude.iter().any(|ex| *ex == name)
    }
}

fn is_dangling_link(err: &walkdir::Error) -> bool {
    err.loop_ancestor().is_none()
        && err
            .path()
            .is_some_and(|p| p.is_symlink() && !p.exists())
}
