//! Development watch keeping the aggregator in sync with the page directory.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────┐   mpsc    ┌──────────────────────────────┐
//! │  notify   │─────────▶│  event loop (own thread)      │
//! │  watcher  │           │  created *.html → full sync  │
//! └───────────┘           └──────────────────────────────┘
//! ```
//!
//! Every relevant notification triggers a full re-discovery and rewrite, so
//! duplicated or missed events never leave the aggregator stale for long.
//! Dropping the watcher disconnects the channel and ends the loop.

use crate::{
    config::{PagesConfig, rel_path},
    log,
    pages::{PageError, SyncReport, sync_aggregator_file},
};
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::mpsc::{self, Receiver},
    thread::{self, JoinHandle},
};

// =============================================================================
// Event Filtering
// =============================================================================

/// A created file with the page extension.
fn is_new_page(path: &Path, extension: &str) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(extension)
}

/// Only creation events can add pages.
const fn is_relevant(event: &Event) -> bool {
    matches!(event.kind, EventKind::Create(_))
}

/// React to one notification. Returns the sync report if the aggregator was rewritten.
pub fn handle_event(event: &Event, pages: &PagesConfig) -> Result<Option<SyncReport>, PageError> {
    if !is_relevant(event) {
        return Ok(None);
    }

    let Some(trigger) = event
        .paths
        .iter()
        .find(|path| is_new_page(path, &pages.extension))
    else {
        return Ok(None);
    };

    log!("watch"; "{} created", rel_path(trigger, &pages.root));
    sync_aggregator_file(pages).map(Some)
}

// =============================================================================
// Session
// =============================================================================

/// A running watch on the page directory.
///
/// Owns the watcher and its event-loop thread. [`WatchSession::stop`] tears
/// both down deterministically; dropping the session does the same.
pub struct WatchSession {
    watcher: Option<RecommendedWatcher>,
    handle: Option<JoinHandle<()>>,
    root: PathBuf,
}

impl WatchSession {
    /// Start watching `pages.root` recursively.
    ///
    /// The page root is created if missing, since a watch needs an existing directory.
    pub fn start(pages: PagesConfig) -> Result<Self> {
        let root = pages.root.clone();
        fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create page directory {}", root.display()))?;

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(tx).context("Failed to create file watcher")?;
        watcher
            .watch(&root, RecursiveMode::Recursive)
            .with_context(|| format!("Failed to watch pages: {}", root.display()))?;

        let handle = thread::Builder::new()
            .name("quire-watch".into())
            .spawn(move || run_event_loop(&rx, &pages))
            .context("Failed to spawn watch thread")?;

        log!("watch"; "{}", root.display());

        Ok(Self {
            watcher: Some(watcher),
            handle: Some(handle),
            root,
        })
    }

    /// Watched directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Stop the watcher and wait for the event loop to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        // Dropping the watcher closes the sender side of the channel.
        self.watcher.take();
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            log!("error"; "watch thread panicked");
        }
    }
}

impl Drop for WatchSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Consume notifications until the watcher is dropped.
fn run_event_loop(rx: &Receiver<notify::Result<Event>>, pages: &PagesConfig) {
    for message in rx {
        match message {
            Ok(event) => match handle_event(&event, pages) {
                Ok(Some(report)) => {
                    log!("sync"; "{} pages → {}", report.page_count, report.aggregator.display());
                }
                Ok(None) => {}
                Err(err) => log!("error"; "{err}"),
            },
            Err(err) => log!("watch"; "error: {err}"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
