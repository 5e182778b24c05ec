//! Indexer configuration.
//!
//! Settings live in an optional `doctree.toml` (path chosen with `--config`).
//! The file is sparse: it is merged key-by-key over the stock defaults, so it
//! only needs the values it wants to change. Unknown keys are rejected to
//! catch typos early.
//!
//! ## Configuration Options
//!
//! ```toml
//! [index]
//! mode = "full"                        # "full" or "minimal"
//! exclude = ["index.md", ".DS_Store", "Thumbs.db", "desktop.ini"]
//! markdown_extensions = ["md", "markdown"]
//! sort = false                         # true = order siblings by name
//! follow_links = true
//!
//! [links]
//! prefix = "/docs/"
//! encode = true
//!
//! [nav]
//! reserved = ["nav"]
//!
//! [processing]
//! max_processes = 4                    # omit for auto = CPU cores
//! ```
//!
//! The source directory and output file are not configured here; they are
//! command-line arguments.

use crate::link::LinkStyle;
use crate::walk::WalkOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Complete indexer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    /// Tree building: mode, exclusions, ordering.
    pub index: IndexSection,
    /// Link generation: mount prefix and encoding.
    pub links: LinksConfig,
    /// Navigation menu generation from the written index.
    pub nav: NavConfig,
    /// Parallel front-matter extraction.
    pub processing: ProcessingConfig,
}

/// What each tree node carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeMode {
    /// Titles, links, extensions and front-matter metadata.
    #[default]
    Full,
    /// Raw entry names and directory nesting only.
    Minimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexSection {
    pub mode: TreeMode,
    /// Entry names skipped everywhere in the tree (index pages, OS artifacts).
    pub exclude: Vec<String>,
    /// Extensions (no dot) whose front-matter is parsed.
    pub markdown_extensions: Vec<String>,
    /// Order siblings by file name. Off by default: the tree follows the
    /// filesystem's listing order.
    pub sort: bool,
    /// Traverse symlinked directories. Cycles abort the build; links whose
    /// target is missing are skipped with a warning.
    pub follow_links: bool,
}

impl Default for IndexSection {
    fn default() -> Self {
        Self {
            mode: TreeMode::Full,
            exclude: vec![
                "index.md".into(),
                ".DS_Store".into(),
                "Thumbs.db".into(),
                "desktop.ini".into(),
            ],
            markdown_extensions: vec!["md".into(), "markdown".into()],
            sort: false,
            follow_links: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinksConfig {
    /// Mount prefix prepended to every link.
    pub prefix: String,
    /// Percent-encode path segments.
    pub encode: bool,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            prefix: "/docs/".into(),
            encode: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    /// Top-level titles that never become menu entries.
    pub reserved: Vec<String>,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            reserved: vec!["nav".into()],
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of worker threads for front-matter extraction.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

impl IndexConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.index.markdown_extensions.is_empty() {
            return Err(ConfigError::Validation(
                "index.markdown_extensions must not be empty".into(),
            ));
        }
        if let Some(ext) = self
            .index
            .markdown_extensions
            .iter()
            .find(|e| e.is_empty() || e.starts_with('.'))
        {
            return Err(ConfigError::Validation(format!(
                "index.markdown_extensions entries are written without a dot, got {ext:?}"
            )));
        }
        if let Some(name) = self
            .index
            .exclude
            .iter()
            .find(|n| n.is_empty() || n.contains('/'))
        {
            return Err(ConfigError::Validation(format!(
                "index.exclude entries must be plain file names, got {name:?}"
            )));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            exclude: self.index.exclude.clone(),
            sort: self.index.sort,
            follow_links: self.index.follow_links,
        }
    }

    pub fn link_style(&self) -> LinkStyle {
        LinkStyle::new(&self.links.prefix, self.links.encode)
    }
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// The stock defaults as a `toml::Value::Table`, the base layer for merging.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(IndexConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key-by-key; any other overlay value replaces the base value
/// (so an `exclude` list in the overlay replaces the default list).
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Parse config text, merge it over the defaults, and validate.
pub fn parse_config(content: &str) -> Result<IndexConfig, ConfigError> {
    let overlay: toml::Value = toml::from_str(content)?;
    let merged = merge_toml(stock_defaults_value()?, overlay);
    let config: IndexConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, falling back to defaults when the file is absent.
pub fn load_config(path: &Path) -> Result<IndexConfig, ConfigError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No config file, using defaults");
        return Ok(IndexConfig::default());
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&content)
}

/// A fully-commented stock `doctree.toml`, printed by `doctree gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# doctree configuration
# =====================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Tree building
# ---------------------------------------------------------------------------
[index]
# "full": titles without extension, links, file extensions, front-matter.
# "minimal": raw entry names and directory nesting only.
mode = "full"

# Entry names left out of the tree. Index pages supply their parent's own
# content and OS artifacts are never navigable.
exclude = ["index.md", ".DS_Store", "Thumbs.db", "desktop.ini"]

# Files with these extensions have their front-matter parsed.
markdown_extensions = ["md", "markdown"]

# Order siblings by file name instead of filesystem listing order.
sort = false

# Traverse symlinked directories. A link back to an ancestor aborts the build.
# A link whose target is missing is skipped with a warning.
follow_links = true

# ---------------------------------------------------------------------------
# Links
# ---------------------------------------------------------------------------
[links]
# Mount prefix for every link: docs/vue/basics.md -> /docs/vue/basics
prefix = "/docs/"

# Percent-encode path segments (spaces, non-ASCII names).
encode = true

# ---------------------------------------------------------------------------
# Navigation
# ---------------------------------------------------------------------------
[nav]
# Top-level titles that never become navigation menu entries.
reserved = ["nav"]

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum worker threads for front-matter extraction.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
