//! Project initialization.
//!
//! Writes a default `quire.toml`, creates the page directory and keeps the
//! generated aggregator out of version control.

use crate::{config::ProjectConfig, log};
use anyhow::{Context, Result, bail};
use std::{fs, io::ErrorKind, path::Path};

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore"];

/// Initialize a project at `config.get_root()`.
pub fn new_project(config: &ProjectConfig) -> Result<()> {
    let root = config.get_root();

    if config.config_path.exists() {
        bail!(
            "Config file `{}` already exists. Remove it manually or init in a different path.",
            config.config_path.display()
        );
    }

    fs::create_dir_all(root).with_context(|| format!("Failed to create {}", root.display()))?;
    init_default_config(&config.config_path)?;

    fs::create_dir_all(&config.pages.root)
        .with_context(|| format!("Failed to create {}", config.pages.root.display()))?;

    let aggregator = config
        .pages
        .aggregator
        .strip_prefix(root)
        .unwrap_or(&config.pages.aggregator);
    init_ignored_files(root, &[aggregator])?;

    log!("init"; "{}", config.config_path.display());
    Ok(())
}

/// Write default configuration file
fn init_default_config(path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(&ProjectConfig::default())?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Append paths to ignore files, skipping entries already present.
///
/// Existing content is kept byte for byte, whatever its encoding.
pub fn init_ignored_files(root: &Path, paths: &[&Path]) -> Result<()> {
    for filename in IGNORE_FILES {
        let path = root.join(filename);
        let existing = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => Vec::new(),
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to read {}", path.display()));
            }
        };

        let missing: Vec<_> = paths
            .iter()
            .filter_map(|p| p.to_str())
            .map(|p| p.replace('\\', "/"))
            .filter(|p| {
                !existing
                    .split(|&byte| byte == b'\n')
                    .any(|line| line.trim_ascii() == p.as_bytes())
            })
            .collect();
        if missing.is_empty() {
            continue;
        }

        let mut content = existing;
        if !content.is_empty() && !content.ends_with(b"\n") {
            content.push(b'\n');
        }
        for entry in missing {
            content.extend_from_slice(entry.as_bytes());
            content.push(b'\n');
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(())
}
