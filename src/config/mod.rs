//! Project configuration management for `quire.toml`.
//!
//! # Sections
//!
//! | Section      | Purpose                                           |
//! |--------------|---------------------------------------------------|
//! | `[pages]`    | Page discovery root, extension, aggregator file   |
//! | `[bundle]`   | Main entry, output, aliases, copy pattern         |
//! | `[watch]`    | Development-mode aggregator watch                  |
//!
//! # Example
//!
//! ```toml
//! [pages]
//! root = "./src/pages/"
//! main_page = "./src/index.html"
//!
//! [bundle]
//! main = "./src/app.js"
//! output = "./dist"
//!
//! [watch]
//! enable = true
//! ```

mod bundle;
pub mod defaults;
mod error;
mod pages;
mod watch;

pub use error::ConfigError;
pub use pages::PagesConfig;

use bundle::BundleConfig;
use watch::WatchConfig;

use crate::cli::{Cli, Mode};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Component, Path, PathBuf},
};

/// Environment variable overriding `[bundle].public_path`.
pub const ASSET_PATH_ENV: &str = "ASSET_PATH";

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing quire.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root, every relative path is resolved against it
    #[serde(skip)]
    #[educe(Default = PathBuf::from("./"))]
    pub root: PathBuf,

    /// Development or production, resolved from CLI / `NODE_ENV`
    #[serde(skip)]
    pub mode: Mode,

    /// Page discovery settings
    #[serde(default)]
    pub pages: PagesConfig,

    /// Bundle manifest settings
    #[serde(default)]
    pub bundle: BundleConfig,

    /// Development watch settings
    #[serde(default)]
    pub watch: WatchConfig,
}

impl ProjectConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: ProjectConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.root = path.to_path_buf();
    }

    /// Public path of emitted assets, `ASSET_PATH` wins over the config value.
    pub fn public_path(&self) -> String {
        env::var(ASSET_PATH_ENV)
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| self.bundle.public_path.clone())
    }

    /// Whether the aggregator watch should run for the resolved mode.
    pub const fn watch_enabled(&self) -> bool {
        !self.mode.is_production() && self.watch.enable
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        self.mode = cli.mode();

        Self::update_option(&mut self.pages.root, cli.pages.as_ref());
        Self::update_option(&mut self.pages.aggregator, cli.aggregator.as_ref());

        let root = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());
        self.config_path = normalize_path(&root.join(&cli.config));
        self.resolve_paths(&root);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve every configured path against `root` and normalize to absolute paths
    pub fn resolve_paths(&mut self, root: &Path) {
        let root = normalize_path(root);
        let resolve = |path: &Path| normalize_path(&root.join(path));

        self.bundle.main = resolve(&self.bundle.main);
        self.bundle.output = resolve(&self.bundle.output);
        self.bundle.template = resolve(&self.bundle.template);
        self.bundle.copy.from = resolve(&self.bundle.copy.from);
        self.bundle.copy.to = resolve(&self.bundle.copy.to);
        for target in self.bundle.alias.values_mut() {
            *target = resolve(target);
        }

        self.pages.root = resolve(&self.pages.root);
        self.pages.main_page = resolve(&self.pages.main_page);
        // Rendered pages live under the bundle output, next to index.html
        self.pages.destination = normalize_path(&self.bundle.output.join(&self.pages.destination));
        self.pages.aggregator = resolve(&self.pages.aggregator);
        self.pages.extension = self.pages.extension.trim_start_matches('.').to_owned();

        self.set_root(&root);
    }

    /// Validate configuration for the current command
    pub fn validate(&self) -> Result<()> {
        let pages = &self.pages;

        if pages.extension.is_empty() {
            bail!(ConfigError::Validation(
                "[pages.extension] must not be empty".into()
            ));
        }

        if pages.entry_name.is_empty() || pages.entry_name == "main" {
            bail!(ConfigError::Validation(
                "[pages.entry_name] must be non-empty and must not be `main`".into()
            ));
        }

        // The aggregator would otherwise be discovered as a page of its own
        let aggregator_is_page = pages
            .aggregator
            .extension()
            .is_some_and(|ext| ext.to_str() == Some(pages.extension.as_str()));
        if aggregator_is_page && pages.aggregator.starts_with(&pages.root) {
            bail!(ConfigError::Validation(
                "[pages.aggregator] must not be a page template inside [pages.root]".into()
            ));
        }

        if pages.root.exists() && !pages.root.is_dir() {
            bail!(ConfigError::Validation(
                "[pages.root] is not a directory".into()
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Path Helpers
// ============================================================================

/// Normalize a path to absolute, using canonicalize if the path exists.
///
/// Non-existent paths are made absolute against the current directory and
/// lexically stripped of `.` components.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf())
        };
        strip_cur_dir(&absolute)
    })
}

/// `/proj/watch_html.js` relative to `/proj` → `watch_html.js`, for log lines.
///
/// Paths outside `root` are shown in full.
pub fn rel_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

/// Drop `.` components without touching the filesystem.
fn strip_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_str() {
        let config_str = r#"
            [pages]
            root = "./views/"

            [bundle]
            main = "./views/main.js"
        "#;
        let config = ProjectConfig::from_str(config_str).unwrap();

        assert_eq!(config.pages.root, PathBuf::from("./views/"));
        assert_eq!(config.bundle.main, PathBuf::from("./views/main.js"));
    }

    #[test]
    fn test_from_str_invalid_toml() {
        let invalid_config = r#"
            [pages
            root = "./views/"
        "#;
        let result = ProjectConfig::from_str(invalid_config);

        assert!(result.is_err());
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = ProjectConfig::from_path(&dir.path().join("quire.toml")).unwrap_err();
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_project_config_default() {
        let config = ProjectConfig::default();

        assert_eq!(config.config_path, PathBuf::new());
        assert_eq!(config.get_root(), Path::new("./"));
        assert_eq!(config.mode, Mode::Development);
        assert!(config.watch.enable);
    }

    #[test]
    fn test_set_root() {
        let mut config = ProjectConfig::default();
        config.set_root(Path::new("/custom/path"));
        assert_eq!(config.get_root(), Path::new("/custom/path"));
    }

    #[test]
    fn test_unknown_top_level_field_rejection() {
        let config = r#"
            [devServer]
            hot = true
        "#;
        let result: Result<ProjectConfig, _> = toml::from_str(config);
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_paths_against_root() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src/pages")).unwrap();

        let mut config = ProjectConfig::default();
        config.resolve_paths(dir.path());

        let root = dir.path().canonicalize().unwrap();
        assert_eq!(config.get_root(), root);
        assert_eq!(config.pages.root, root.join("src/pages"));
        // missing paths are resolved lexically
        assert_eq!(config.pages.aggregator, root.join("watch_html.js"));
        assert_eq!(config.pages.destination, root.join("dist/pages"));
        assert_eq!(config.bundle.alias.get("@"), Some(&root.join("src")));
    }

    #[test]
    fn test_page_destination_follows_bundle_output() {
        let dir = TempDir::new().unwrap();
        let mut config = ProjectConfig::from_str(
            "[pages]\ndestination = \"html/\"\n[bundle]\noutput = \"./public\"",
        )
        .unwrap();
        config.resolve_paths(dir.path());

        assert!(config.pages.destination.starts_with(&config.bundle.output));
        assert!(config.pages.destination.ends_with("public/html"));
    }

    #[test]
    fn test_absolute_page_destination_is_kept() {
        let mut config = ProjectConfig::from_str("[pages]\ndestination = \"/srv/pages\"").unwrap();
        config.resolve_paths(Path::new("/tmp"));
        assert_eq!(config.pages.destination, PathBuf::from("/srv/pages"));
    }

    #[test]
    fn test_rel_path() {
        assert_eq!(
            rel_path(Path::new("/proj/watch_html.js"), Path::new("/proj")),
            "watch_html.js"
        );
        assert_eq!(
            rel_path(Path::new("/other/a.html"), Path::new("/proj")),
            "/other/a.html"
        );
    }

    #[test]
    fn test_resolve_paths_trims_extension_dot() {
        let mut config = ProjectConfig::from_str("[pages]\nextension = \".html\"").unwrap();
        config.resolve_paths(Path::new("/tmp"));
        assert_eq!(config.pages.extension, "html");
    }

    #[test]
    fn test_validate_rejects_aggregator_inside_pages() {
        let mut config = ProjectConfig::default();
        config.pages.root = PathBuf::from("/site/src/pages");
        config.pages.aggregator = PathBuf::from("/site/src/pages/all.html");

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("[pages.aggregator]"));
    }

    #[test]
    fn test_validate_rejects_main_entry_name() {
        let mut config = ProjectConfig::default();
        config.pages.entry_name = "main".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_default_ok() {
        let config = ProjectConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_watch_enabled_by_mode() {
        let mut config = ProjectConfig::default();
        assert!(config.watch_enabled());

        config.mode = Mode::Production;
        assert!(!config.watch_enabled());

        config.mode = Mode::Development;
        config.watch.enable = false;
        assert!(!config.watch_enabled());
    }

    #[test]
    fn test_strip_cur_dir() {
        assert_eq!(
            strip_cur_dir(Path::new("/site/./src/./pages/")),
            PathBuf::from("/site/src/pages")
        );
    }
}
