//! Watcher configuration

use crate::ignore::IgnoreConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for [`crate::PollWatcher`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatcherConfig {
    /// Time between sweeps in milliseconds (default: 1000)
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Follow symlinks while enumerating and statting (default: false)
    #[serde(default)]
    pub follow_links: bool,

    /// Paths to leave out of enumeration
    #[serde(default)]
    pub ignore: IgnoreConfig,
}

impl WatcherConfig {
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval_ms: interval.as_millis().try_into().unwrap_or(u64::MAX),
            ..Self::default()
        }
    }

    /// Sweep interval, never shorter than one millisecond
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(1))
    }
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            follow_links: false,
            ignore: IgnoreConfig::default(),
        }
    }
}

fn default_interval_ms() -> u64 {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_toml() {
        let config: WatcherConfig = toml::from_str("").unwrap();
        assert_eq!(config, WatcherConfig::default());
        assert_eq!(config.interval(), Duration::from_secs(1));
        assert!(config.ignore.is_empty());
    }

    #[test]
    fn test_full_toml() {
        let config: WatcherConfig = toml::from_str(
            r#"
            interval_ms = 250
            follow_links = true

            [ignore]
            patterns = ["*.swp", "target/"]
            use_gitignore = true
            "#,
        )
        .unwrap();

        assert_eq!(config.interval(), Duration::from_millis(250));
        assert!(config.follow_links);
        assert_eq!(config.ignore.patterns, vec!["*.swp", "target/"]);
        assert!(config.ignore.use_gitignore);
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let config = WatcherConfig::with_interval(Duration::ZERO);
        assert_eq!(config.interval(), Duration::from_millis(1));
    }
}
