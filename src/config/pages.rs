//! `[pages]` section configuration.
//!
//! Where page templates live, what counts as one, and where the aggregator goes.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[pages]` section in quire.toml - page discovery settings.
///
/// # Example
/// ```toml
/// [pages]
/// root = "./src/pages/"
/// extension = "html"
/// main_page = "./src/index.html"
/// destination = "./pages/"
/// aggregator = "./watch_html.js"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct PagesConfig {
    /// Directory scanned for page templates.
    #[serde(default = "defaults::pages::root")]
    #[educe(Default = defaults::pages::root())]
    pub root: PathBuf,

    /// Page template extension, without the leading dot.
    #[serde(default = "defaults::pages::extension")]
    #[educe(Default = defaults::pages::extension())]
    pub extension: String,

    /// Descend into subdirectories of `root`.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub recursive: bool,

    /// Page always imported first by the aggregator.
    #[serde(default = "defaults::pages::main_page")]
    #[educe(Default = defaults::pages::main_page())]
    pub main_page: PathBuf,

    /// Output prefix that replaces `root` in each page's destination,
    /// relative to `[bundle].output`.
    #[serde(default = "defaults::pages::destination")]
    #[educe(Default = defaults::pages::destination())]
    pub destination: PathBuf,

    /// Generated file importing every page.
    #[serde(default = "defaults::pages::aggregator")]
    #[educe(Default = defaults::pages::aggregator())]
    pub aggregator: PathBuf,

    /// Bundler entry name under which the aggregator is registered.
    #[serde(default = "defaults::pages::entry_name")]
    #[educe(Default = defaults::pages::entry_name())]
    pub entry_name: String,
}
