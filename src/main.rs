//! Quire - multi-page entry registry for bundler configuration.

mod cli;
mod config;
mod init;
mod logger;
mod manifest;
mod pages;
mod watch;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Commands};
use config::ProjectConfig;
use init::new_project;
use manifest::assemble;
use pages::{compute_page_entries, sync_aggregator_file};
use std::{path::Path, sync::mpsc};

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    let config: &'static ProjectConfig = Box::leak(Box::new(load_config(cli)?));

    match &cli.command {
        Commands::Init => new_project(config),
        Commands::Entries => print_entries(config),
        Commands::Sync => sync_once(config),
        Commands::Manifest { pretty } => print_manifest(config, *pretty),
        Commands::Watch => watch_until_interrupted(config),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &'static Cli) -> Result<ProjectConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        ProjectConfig::from_path(&config_path)?
    } else {
        ProjectConfig::default()
    };
    config.set_root(root);
    config.update_with_cli(cli);

    if !cli.is_init() {
        if !config.config_path.exists() {
            log!("config"; "{} not found, using defaults", cli.config.display());
        }
        config.validate()?;
    }

    Ok(config)
}

/// Print the page descriptors as JSON
fn print_entries(config: &ProjectConfig) -> Result<()> {
    let entries = compute_page_entries(&config.pages).context("Failed to collect pages")?;
    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}

/// Rewrite the aggregator once, regardless of the watch setting
fn sync_once(config: &ProjectConfig) -> Result<()> {
    if config.mode.is_production() {
        log!("sync"; "production mode, aggregator skipped");
        return Ok(());
    }
    let report = sync_aggregator_file(&config.pages).context("Failed to write aggregator")?;
    log!("sync"; "{} pages → {}", report.page_count, report.aggregator.display());
    Ok(())
}

/// Assemble the manifest and print it; writes the aggregator in development mode
fn print_manifest(config: &ProjectConfig, pretty: bool) -> Result<()> {
    let (manifest, _) = assemble(config, false)?;
    let json = if pretty {
        serde_json::to_string_pretty(&manifest)?
    } else {
        serde_json::to_string(&manifest)?
    };
    println!("{json}");
    Ok(())
}

/// Sync, then keep syncing on new pages until Ctrl+C
fn watch_until_interrupted(config: &ProjectConfig) -> Result<()> {
    if config.mode.is_production() {
        bail!("watch is not available in production mode");
    }
    if !config.watch.enable {
        bail!("[watch.enable] is false");
    }

    let (_, session) = assemble(config, true)?;
    let Some(session) = session else {
        return Ok(());
    };

    let (tx, rx) = mpsc::channel();
    ctrlc::set_handler(move || {
        let _ = tx.send(());
    })
    .context("Failed to set Ctrl+C handler")?;

    // Block until interrupted
    let _ = rx.recv();
    log!("watch"; "shutting down {}...", session.root().display());
    session.stop();

    Ok(())
}
