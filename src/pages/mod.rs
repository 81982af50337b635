//! Page discovery and entry projection.
//!
//! Scans the page root for templates, derives a [`PageEntry`] per file by pure
//! path algebra, and projects entries to bundler [`EntryDescriptor`]s.
//!
//! # Flow
//!
//! ```text
//! discover_pages(root)          project_entries(src, dest)
//!   ./src/pages/about.html  ──▶   template:    ./src/pages/about.html
//!   ./src/pages/team.html         destination: ./pages/about.html
//! ```
//!
//! Nothing here writes to disk. The effectful half lives in [`aggregator`].

pub mod aggregator;

use crate::{config::PagesConfig, log};
use serde::Serialize;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};
use thiserror::Error;
use walkdir::WalkDir;

pub use aggregator::{SyncReport, sync_aggregator_file, write_aggregator};

// ============================================================================
// Errors
// ============================================================================

/// Page registry errors
#[derive(Debug, Error)]
pub enum PageError {
    #[error("failed to scan page directory `{0}`")]
    Scan(PathBuf, #[source] walkdir::Error),

    #[error("page `{path}` is not under source root `{root}`")]
    PrefixMismatch { path: PathBuf, root: PathBuf },

    #[error("failed to write aggregator `{0}`")]
    Write(PathBuf, #[source] std::io::Error),
}

// ============================================================================
// Types
// ============================================================================

/// One discovered page template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageEntry {
    /// Path of the template as produced by the scan
    pub entry_path: PathBuf,
    /// Containing directory of `entry_path`
    pub directory: PathBuf,
    /// Suffix including the dot, e.g. `.html`
    pub extension: String,
    /// File name without extension, the bundling key
    pub base_name: String,
    /// `directory` joined with `base_name`
    pub output_path: PathBuf,
}

impl PageEntry {
    /// Derive an entry from a path without touching the filesystem.
    ///
    /// `pages/about.html` → directory `pages`, extension `.html`, base name `about`.
    /// Returns `None` for paths without a file name.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let entry_path = path.into();
        let base_name = entry_path.file_stem()?.to_string_lossy().into_owned();
        let directory = entry_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let extension = entry_path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();
        let output_path = directory.join(&base_name);

        Some(Self {
            entry_path,
            directory,
            extension,
            base_name,
            output_path,
        })
    }

    /// Check the entry against a page extension given without the dot.
    pub fn has_extension(&self, extension: &str) -> bool {
        self.extension.strip_prefix('.') == Some(extension)
    }
}

/// Template/destination pair consumed by the page-rendering plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryDescriptor {
    pub template: PathBuf,
    pub destination: PathBuf,
}

// ============================================================================
// Discovery
// ============================================================================

/// Find every page template under `root`, sorted by path.
///
/// Only direct children are considered unless `recursive` is set.
/// A missing `root` yields an empty list; an unreadable entry is an error.
pub fn discover_pages(
    root: &Path,
    extension: &str,
    recursive: bool,
) -> Result<Vec<PageEntry>, PageError> {
    if !root.exists() {
        return Ok(Vec::new());
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut pages = Vec::new();

    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(true)
    {
        let entry = entry.map_err(|err| PageError::Scan(root.to_path_buf(), err))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(page) = PageEntry::from_path(entry.into_path())
            && page.has_extension(extension)
        {
            pages.push(page);
        }
    }

    pages.sort_by(|a, b| a.entry_path.cmp(&b.entry_path));
    warn_duplicate_names(&pages);

    Ok(pages)
}

/// Pages sharing a base name collide in the output; report, never drop.
fn warn_duplicate_names(pages: &[PageEntry]) {
    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
    for page in pages {
        *seen.entry(page.base_name.as_str()).or_default() += 1;
    }
    for (name, count) in seen.into_iter().filter(|(_, count)| *count > 1) {
        log!("warn"; "{count} pages share the base name `{name}`");
    }
}

// ============================================================================
// Projection
// ============================================================================

/// Map each page to its output location by swapping `source_root` for `destination_root`.
///
/// Pure path substitution. A page outside `source_root` is rejected.
pub fn project_entries(
    pages: &[PageEntry],
    source_root: &Path,
    destination_root: &Path,
) -> Result<Vec<EntryDescriptor>, PageError> {
    pages
        .iter()
        .map(|page| {
            let relative = page.entry_path.strip_prefix(source_root).map_err(|_| {
                PageError::PrefixMismatch {
                    path: page.entry_path.clone(),
                    root: source_root.to_path_buf(),
                }
            })?;
            Ok(EntryDescriptor {
                template: page.entry_path.clone(),
                destination: destination_root.join(relative),
            })
        })
        .collect()
}

/// Discover and project the configured pages. Reads the page root, writes nothing.
pub fn compute_page_entries(pages: &PagesConfig) -> Result<Vec<EntryDescriptor>, PageError> {
    let found = discover_pages(&pages.root, &pages.extension, pages.recursive)?;
    project_entries(&found, &pages.root, &pages.destination)
}

// ============================================================================
// Tests
// ============================================================================
