//! Directory enumeration and stat primitives

use crate::diff::Probe;
use crate::ignore::IgnoreRules;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Enumerates watched trees and stats candidate paths
#[derive(Debug, Clone, Copy, Default)]
pub struct Walker {
    follow_links: bool,
}

impl Walker {
    pub fn new(follow_links: bool) -> Self {
        Self { follow_links }
    }

    /// Every path below `root`, excluding `root` itself
    ///
    /// Ignored directories are pruned. Entries that cannot be read are
    /// skipped; anything previously tracked beneath them is still probed
    /// individually by the sweep.
    pub fn discover<'a>(
        &self,
        root: &'a Path,
        ignore: &'a IgnoreRules,
    ) -> impl Iterator<Item = PathBuf> + 'a {
        WalkDir::new(root)
            .min_depth(1)
            .follow_links(self.follow_links)
            .into_iter()
            .filter_entry(move |entry| !ignore.should_ignore(entry.path(), entry.file_type().is_dir()))
            .filter_map(move |entry| match entry {
                Ok(entry) => Some(entry.into_path()),
                Err(e) => {
                    debug!("Skipping entry under {}: {}", root.display(), e);
                    None
                }
            })
    }

    /// Stat one candidate path
    pub fn probe(&self, path: &Path) -> Probe {
        if self.follow_links {
            Probe::from_stat(fs::metadata(path))
        } else {
            Probe::from_stat(fs::symlink_metadata(path))
        }
    }

    /// Stat following symlinks, as done for watched roots
    pub fn probe_root(&self, path: &Path) -> Probe {
        Probe::from_stat(fs::metadata(path))
    }
}
