//! `[watch]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[watch]` section in quire.toml - development watch settings.
///
/// # Example
/// ```toml
/// [watch]
/// enable = false   # write the aggregator once, never watch
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct WatchConfig {
    /// Keep the aggregator in sync with new pages in development mode.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,
}

#[cfg(test)]
mod tests {
    use super::super::ProjectConfig;

    #[test]
    fn test_watch_config_default_enabled() {
        let config: ProjectConfig = toml::from_str("").unwrap();
        assert!(config.watch.enable);
    }

    #[test]
    fn test_watch_config_disabled() {
        let config = r#"
            [watch]
            enable = false
        "#;
        let config: ProjectConfig = toml::from_str(config).unwrap();
        assert!(!config.watch.enable);
    }
}
