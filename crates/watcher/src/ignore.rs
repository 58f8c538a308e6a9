//! Ignore pattern management
//!
//! Two optional sources, both off by default:
//! 1. Config patterns (gitignore syntax, e.g. `*.swp`, `target/`)
//! 2. The `.gitignore` at the root of a watched directory

use crate::error::{Result, WatchError};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Ignore rules for one watched directory
///
/// Matching is relative to the directory the rules were loaded for.
#[derive(Debug, Default)]
pub struct IgnoreRules {
    matcher: Option<Gitignore>,
}

impl IgnoreRules {
    /// Rules that ignore nothing
    pub fn none() -> Self {
        Self::default()
    }

    /// Load rules for a watched directory
    pub fn load(root: &Path, config: &IgnoreConfig) -> Result<Self> {
        if config.is_empty() {
            return Ok(Self::none());
        }

        let mut builder = GitignoreBuilder::new(root);

        if config.use_gitignore {
            let gitignore_path = root.join(".gitignore");
            if gitignore_path.exists() {
                // Partial errors leave the valid lines in place
                if let Some(e) = builder.add(&gitignore_path) {
                    warn!("Problem reading {}: {}", gitignore_path.display(), e);
                }
            }
        }

        for pattern in &config.patterns {
            builder
                .add_line(None, pattern)
                .map_err(|source| WatchError::InvalidIgnorePattern {
                    pattern: pattern.clone(),
                    source,
                })?;
        }

        let matcher = builder.build().map_err(|source| WatchError::InvalidIgnorePattern {
            pattern: config.patterns.join(", "),
            source,
        })?;

        Ok(Self { matcher: Some(matcher) })
    }

    /// Check if a path below the root should be skipped
    pub fn should_ignore(&self, path: &Path, is_dir: bool) -> bool {
        match &self.matcher {
            Some(matcher) => matcher.matched(path, is_dir).is_ignore(),
            None => false,
        }
    }

    /// Whether any pattern is in effect
    pub fn is_active(&self) -> bool {
        self.matcher.as_ref().map(|m| !m.is_empty()).unwrap_or(false)
    }
}

/// Ignore configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoreConfig {
    /// Additional patterns in gitignore syntax
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Honour the `.gitignore` at each watched directory root (default: false)
    #[serde(default)]
    pub use_gitignore: bool,
}

impl IgnoreConfig {
    /// No source enabled
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty() && !self.use_gitignore
    }

    /// Compile the configured patterns once to surface syntax errors early
    pub fn validate(&self) -> Result<()> {
        let mut builder = GitignoreBuilder::new("/");
        for pattern in &self.patterns {
            builder
                .add_line(None, pattern)
                .map_err(|source| WatchError::InvalidIgnorePattern {
                    pattern: pattern.clone(),
                    source,
                })?;
        }
        Ok(())
    }
}
