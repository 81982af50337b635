//! Aggregator file generation.
//!
//! The aggregator is a generated script with one `import` per page, main page
//! first, so a development bundler tracks every template. It is rewritten in
//! full on every sync, never patched.

use super::{PageEntry, PageError, discover_pages};
use crate::config::PagesConfig;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Outcome of one aggregator sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub aggregator: PathBuf,
    pub page_count: usize,
}

/// Render the aggregator source: the main page import, then one per page in order.
///
/// Paths under `base_dir` are written relative to it (`./src/pages/a.html`),
/// anything else verbatim.
pub fn render_aggregator(main_page: &Path, pages: &[PageEntry], base_dir: Option<&Path>) -> String {
    std::iter::once(main_page)
        .chain(pages.iter().map(|page| page.entry_path.as_path()))
        .map(|path| format!("import '{}';\n", import_specifier(path, base_dir)))
        .collect()
}

/// Module specifier for `path` as seen from `base_dir`.
fn import_specifier(path: &Path, base_dir: Option<&Path>) -> String {
    let specifier = match base_dir.and_then(|base| path.strip_prefix(base).ok()) {
        Some(relative) => format!("./{}", to_slash(relative)),
        None => to_slash(path),
    };
    specifier.replace('\'', "\\'")
}

fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Re-discover pages and overwrite the aggregator file.
///
/// Write failures are returned as [`PageError::Write`]; nothing is retried.
pub fn sync_aggregator_file(pages: &PagesConfig) -> Result<SyncReport, PageError> {
    let found = discover_pages(&pages.root, &pages.extension, pages.recursive)?;
    write_aggregator(pages, &found)
}

/// Overwrite the aggregator with imports for `found`, without scanning again.
pub fn write_aggregator(
    pages: &PagesConfig,
    found: &[PageEntry],
) -> Result<SyncReport, PageError> {
    let aggregator = &pages.aggregator;
    let base_dir = aggregator.parent().filter(|dir| !dir.as_os_str().is_empty());
    let content = render_aggregator(&pages.main_page, found, base_dir);

    if let Some(dir) = base_dir {
        fs::create_dir_all(dir).map_err(|err| PageError::Write(aggregator.clone(), err))?;
    }
    fs::write(aggregator, content).map_err(|err| PageError::Write(aggregator.clone(), err))?;

    Ok(SyncReport {
        aggregator: aggregator.clone(),
        page_count: found.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "<html></html>").unwrap();
    }

    fn site(dir: &TempDir) -> PagesConfig {
        let root = dir.path();
        PagesConfig {
            root: root.join("src/pages"),
            main_page: root.join("src/index.html"),
            destination: root.join("pages"),
            aggregator: root.join("watch_html.js"),
            ..PagesConfig::default()
        }
    }

    #[test]
    fn test_render_main_page_only() {
        let content = render_aggregator(Path::new("./src/index.html"), &[], None);
        assert_eq!(content, "import './src/index.html';\n");
    }

    #[test]
    fn test_render_relative_to_base_dir() {
        let pages = vec![PageEntry::from_path("/site/src/pages/about.html").unwrap()];
        let content = render_aggregator(
            Path::new("/site/src/index.html"),
            &pages,
            Some(Path::new("/site")),
        );

        assert_eq!(
            content,
            "import './src/index.html';\nimport './src/pages/about.html';\n"
        );
    }

    #[test]
    fn test_render_outside_base_dir_is_verbatim() {
        let pages = vec![PageEntry::from_path("/other/about.html").unwrap()];
        let content = render_aggregator(
            Path::new("/site/index.html"),
            &pages,
            Some(Path::new("/site")),
        );
        assert!(content.contains("import '/other/about.html';"));
    }

    #[test]
    fn test_import_specifier_escapes_quotes() {
        let specifier = import_specifier(Path::new("./src/pages/it's.html"), None);
        assert_eq!(specifier, "./src/pages/it\\'s.html");
    }

    #[test]
    fn test_sync_without_pages_dir() {
        let dir = TempDir::new().unwrap();
        let config = site(&dir);

        let report = sync_aggregator_file(&config).unwrap();

        assert_eq!(report.page_count, 0);
        let content = fs::read_to_string(&config.aggregator).unwrap();
        assert_eq!(content, "import './src/index.html';\n");
    }

    #[test]
    fn test_sync_end_to_end_order() {
        let dir = TempDir::new().unwrap();
        let config = site(&dir);
        touch(&config.main_page);
        touch(&config.root.join("team.html"));
        touch(&config.root.join("about.html"));

        let report = sync_aggregator_file(&config).unwrap();

        assert_eq!(report.page_count, 2);
        assert_eq!(report.aggregator, config.aggregator);
        let content = fs::read_to_string(&config.aggregator).unwrap();
        assert_eq!(
            content,
            "import './src/index.html';\n\
             import './src/pages/about.html';\n\
             import './src/pages/team.html';\n"
        );
    }

    #[test]
    fn test_write_uses_given_pages_only() {
        let dir = TempDir::new().unwrap();
        let config = site(&dir);
        // on disk but not in the list handed over
        touch(&config.root.join("late.html"));
        let found = vec![PageEntry::from_path(config.root.join("about.html")).unwrap()];

        let report = write_aggregator(&config, &found).unwrap();

        assert_eq!(report.page_count, 1);
        let content = fs::read_to_string(&config.aggregator).unwrap();
        assert!(content.contains("about.html"));
        assert!(!content.contains("late.html"));
    }

    #[test]
    fn test_sync_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let config = site(&dir);
        touch(&config.root.join("about.html"));
        touch(&config.root.join("team.html"));

        sync_aggregator_file(&config).unwrap();
        let first = fs::read(&config.aggregator).unwrap();
        sync_aggregator_file(&config).unwrap();
        let second = fs::read(&config.aggregator).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_sync_overwrites_stale_content() {
        let dir = TempDir::new().unwrap();
        let config = site(&dir);
        fs::write(&config.aggregator, "import './gone.html';\n".repeat(50)).unwrap();

        sync_aggregator_file(&config).unwrap();

        let content = fs::read_to_string(&config.aggregator).unwrap();
        assert!(!content.contains("gone.html"));
    }

    #[test]
    fn test_sync_creates_aggregator_parent() {
        let dir = TempDir::new().unwrap();
        let config = PagesConfig {
            aggregator: dir.path().join("gen/pages.js"),
            ..site(&dir)
        };

        sync_aggregator_file(&config).unwrap();

        assert!(config.aggregator.exists());
    }

    #[test]
    fn test_sync_write_failure_propagates() {
        let dir = TempDir::new().unwrap();
        // a directory where the aggregator file should go
        let config = site(&dir);
        fs::create_dir_all(&config.aggregator).unwrap();

        let err = sync_aggregator_file(&config).unwrap_err();

        assert!(matches!(err, PageError::Write(..)));
        assert!(err.to_string().contains("watch_html.js"));
    }
}
