//! Bundle manifest assembly.
//!
//! Turns the project configuration plus the discovered pages into the JSON
//! contribution handed to the external bundler.
//!
//! # Modes
//!
//! | Mode          | Entries                 | Side effects                       |
//! |---------------|-------------------------|------------------------------------|
//! | development   | `main` + aggregator     | aggregator written, watch started  |
//! | production    | `main` only             | none                               |

use crate::{
    cli::Mode,
    config::{ProjectConfig, rel_path},
    log,
    pages::{EntryDescriptor, PageEntry, discover_pages, project_entries, write_aggregator},
    watch::WatchSession,
};
use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

/// Entry name of the main script.
pub const MAIN_ENTRY: &str = "main";

// ============================================================================
// Manifest Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BundleManifest {
    pub mode: Mode,
    pub entry: BTreeMap<String, PathBuf>,
    pub output: OutputSpec,
    pub resolve: ResolveSpec,
    pub html: Vec<HtmlPage>,
    pub copy: Vec<CopyPattern>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputSpec {
    pub filename: String,
    pub path: PathBuf,
    pub public_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolveSpec {
    pub alias: BTreeMap<String, PathBuf>,
}

/// One HTML page the bundler renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HtmlPage {
    pub template: PathBuf,
    pub filename: PathBuf,
    pub inject: String,
    pub chunks: String,
    pub always_write_to_disk: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CopyPattern {
    pub from: PathBuf,
    pub to: PathBuf,
    pub ignore: Vec<String>,
}

// ============================================================================
// Assembly
// ============================================================================

/// Assemble the manifest without touching the filesystem beyond reading pages.
///
/// `aggregator` is the extra entry contributed in development mode.
pub fn build_manifest(
    config: &ProjectConfig,
    pages: &[EntryDescriptor],
    aggregator: Option<(&str, &Path)>,
) -> BundleManifest {
    let bundle = &config.bundle;

    let mut entry = BTreeMap::from([(MAIN_ENTRY.to_owned(), bundle.main.clone())]);
    if let Some((name, path)) = aggregator {
        entry.insert(name.to_owned(), path.to_path_buf());
    }

    let main_page = HtmlPage {
        template: bundle.template.clone(),
        filename: bundle.output.join("index.html"),
        inject: bundle.inject.clone(),
        chunks: bundle.chunks.clone(),
        always_write_to_disk: false,
    };
    let html = std::iter::once(main_page)
        .chain(pages.iter().map(|page| HtmlPage {
            template: page.template.clone(),
            filename: page.destination.clone(),
            inject: bundle.inject.clone(),
            chunks: bundle.chunks.clone(),
            always_write_to_disk: true,
        }))
        .collect();

    let copy = if bundle.copy.enable {
        vec![CopyPattern {
            from: bundle.copy.from.clone(),
            to: bundle.copy.to.clone(),
            ignore: bundle.copy.ignore.clone(),
        }]
    } else {
        Vec::new()
    };

    BundleManifest {
        mode: config.mode,
        entry,
        output: OutputSpec {
            filename: bundle.filename.clone(),
            path: bundle.output.clone(),
            public_path: config.public_path(),
        },
        resolve: ResolveSpec {
            alias: bundle.alias.clone(),
        },
        html,
        copy,
    }
}

/// Write the aggregator for `found` and return the entry it contributes.
///
/// Production mode writes nothing and contributes nothing.
pub fn sync_dev_entry(
    config: &ProjectConfig,
    found: &[PageEntry],
) -> Result<Option<(String, PathBuf)>> {
    if config.mode.is_production() {
        return Ok(None);
    }

    let report = write_aggregator(&config.pages, found).context("Failed to write aggregator")?;
    let shown = rel_path(&report.aggregator, config.get_root());
    log!("sync"; "{} pages → {shown}", report.page_count);

    Ok(Some((config.pages.entry_name.clone(), report.aggregator)))
}

/// Full configuration build: manifest plus, in development, the aggregator
/// write and an optional watch session when `start_watch` is set.
///
/// This has filesystem side effects in development mode.
pub fn assemble(
    config: &ProjectConfig,
    start_watch: bool,
) -> Result<(BundleManifest, Option<WatchSession>)> {
    let pages_config = &config.pages;
    // One scan feeds both the descriptors and the aggregator
    let found = discover_pages(
        &pages_config.root,
        &pages_config.extension,
        pages_config.recursive,
    )
    .context("Failed to collect pages")?;
    let pages = project_entries(&found, &pages_config.root, &pages_config.destination)
        .context("Failed to collect pages")?;
    let dev_entry = sync_dev_entry(config, &found)?;

    let session = if start_watch && config.watch_enabled() {
        Some(WatchSession::start(config.pages.clone())?)
    } else {
        None
    };

    let aggregator = dev_entry
        .as_ref()
        .map(|(name, path)| (name.as_str(), path.as_path()));
    let manifest = build_manifest(config, &pages, aggregator);

    Ok((manifest, session))
}

// ============================================================================
// Tests
// ============================================================================
