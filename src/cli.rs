//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::{env, path::PathBuf};

/// Environment variable selecting the build mode.
pub const MODE_ENV: &str = "NODE_ENV";

/// Quire multi-page entry registry CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: quire.toml)
    #[arg(short = 'C', long, default_value = "quire.toml")]
    pub config: PathBuf,

    /// Build mode (defaults to `NODE_ENV`, development unless it is "production")
    #[arg(short, long, value_enum)]
    pub mode: Option<Mode>,

    /// Page template directory (relative to project root)
    #[arg(short, long)]
    pub pages: Option<PathBuf>,

    /// Aggregator file path (relative to project root)
    #[arg(short, long)]
    pub aggregator: Option<PathBuf>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write a default quire.toml into the project root
    Init,

    /// Print the per-page entry descriptors as JSON
    Entries,

    /// Regenerate the aggregator file once
    Sync,

    /// Assemble the bundle manifest and print it as JSON
    Manifest {
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Regenerate the aggregator file and keep it in sync until interrupted
    Watch,
}

/// Development vs production behavior of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Development,
    Production,
}

impl Mode {
    /// Read the mode from `NODE_ENV`. Only the exact value `production` selects production.
    pub fn from_env() -> Self {
        Self::from_env_value(env::var(MODE_ENV).ok().as_deref())
    }

    fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some("production") => Self::Production,
            _ => Self::Development,
        }
    }

    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init)
    }

    /// Resolve the effective mode: `--mode` wins over `NODE_ENV`.
    pub fn mode(&self) -> Mode {
        self.mode.unwrap_or_else(Mode::from_env)
    }
}
