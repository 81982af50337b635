//! `[bundle]` section configuration.
//!
//! Static entry, output and plugin settings handed to the bundler.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::PathBuf};

/// `[bundle]` section in quire.toml - bundler manifest settings.
///
/// # Example
/// ```toml
/// [bundle]
/// main = "./src/app.js"
/// output = "./dist"
/// filename = "js/[name].js"
/// public_path = "/"
///
/// [bundle.alias]
/// "@" = "./src"
///
/// [bundle.copy]
/// from = "./src/public/"
/// to = "./dist/public/"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BundleConfig {
    /// Main script, always registered as the `main` entry.
    #[serde(default = "defaults::bundle::main")]
    #[educe(Default = defaults::bundle::main())]
    pub main: PathBuf,

    /// Bundle output directory.
    #[serde(default = "defaults::bundle::output")]
    #[educe(Default = defaults::bundle::output())]
    pub output: PathBuf,

    /// Output filename pattern for script chunks.
    #[serde(default = "defaults::bundle::filename")]
    #[educe(Default = defaults::bundle::filename())]
    pub filename: String,

    /// Public URL prefix of emitted assets. `ASSET_PATH` overrides it.
    #[serde(default = "defaults::bundle::public_path")]
    #[educe(Default = defaults::bundle::public_path())]
    pub public_path: String,

    /// Module resolution aliases.
    #[serde(default = "defaults::bundle::alias")]
    #[educe(Default = defaults::bundle::alias())]
    pub alias: BTreeMap<String, PathBuf>,

    /// Template of the main HTML page, emitted as `<output>/index.html`.
    #[serde(default = "defaults::bundle::template")]
    #[educe(Default = defaults::bundle::template())]
    pub template: PathBuf,

    /// Where generated pages inject their script tags.
    #[serde(default = "defaults::bundle::inject")]
    #[educe(Default = defaults::bundle::inject())]
    pub inject: String,

    /// Chunks included by every generated page.
    #[serde(default = "defaults::bundle::chunks")]
    #[educe(Default = defaults::bundle::chunks())]
    pub chunks: String,

    /// Static directory copied verbatim into the output.
    #[serde(default)]
    pub copy: CopyConfig,
}

/// `[bundle.copy]` section
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct CopyConfig {
    /// Enable the copy pattern
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    /// Source directory
    #[serde(default = "defaults::bundle::copy::from")]
    #[educe(Default = defaults::bundle::copy::from())]
    pub from: PathBuf,

    /// Destination directory
    #[serde(default = "defaults::bundle::copy::to")]
    #[educe(Default = defaults::bundle::copy::to())]
    pub to: PathBuf,

    /// File names never copied
    #[serde(default = "defaults::bundle::copy::ignore")]
    #[educe(Default = defaults::bundle::copy::ignore())]
    pub ignore: Vec<String>,
}
