//! Configuration file loading and command-line overrides

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use watcher::WatcherConfig;

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "pollwatch.toml";

/// On-disk configuration layout
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    watcher: WatcherConfig,
}

/// Settings given on the command line; these win over the file
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub interval_ms: Option<u64>,
    pub follow_links: bool,
    pub ignore: Vec<String>,
    pub gitignore: bool,
}

/// Load configuration
///
/// An explicit path must exist. Without one, `pollwatch.toml` in `cwd` is
/// used if present, otherwise defaults.
pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<WatcherConfig> {
    let path: PathBuf = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = cwd.join(DEFAULT_CONFIG_FILE);
            if !candidate.exists() {
                return Ok(WatcherConfig::default());
            }
            candidate
        }
    };

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let file: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;

    tracing::debug!("Loaded config from {}", path.display());
    Ok(file.watcher)
}

/// Apply command-line overrides on top of loaded configuration
pub fn apply(config: &mut WatcherConfig, overrides: Overrides) -> Result<()> {
    if let Some(interval_ms) = overrides.interval_ms {
        if interval_ms == 0 {
            anyhow::bail!("--interval-ms must be at least 1");
        }
        config.interval_ms = interval_ms;
    }
    if overrides.follow_links {
        config.follow_links = true;
    }
    if overrides.gitignore {
        config.ignore.use_gitignore = true;
    }
    config.ignore.patterns.extend(overrides.ignore);
    Ok(())
}
