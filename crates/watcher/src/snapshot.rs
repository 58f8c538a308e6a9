//! Per-target snapshot of previously observed paths

use crate::sequence;
use std::collections::HashMap;
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Last observed state of one path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    /// Modification time; only compared for equality
    pub mod_time: SystemTime,
    /// Whether the path was a directory
    pub is_dir: bool,
}

impl Record {
    pub fn new(mod_time: SystemTime, is_dir: bool) -> Self {
        Self { mod_time, is_dir }
    }

    /// Build a record from fresh metadata
    ///
    /// Platforms without mtime support fall back to the epoch, which turns
    /// modification detection off for that path but keeps kind tracking.
    pub fn from_metadata(metadata: &Metadata) -> Self {
        Self {
            mod_time: metadata.modified().unwrap_or(UNIX_EPOCH),
            is_dir: metadata.is_dir(),
        }
    }
}

/// Mapping from absolute path to its last observed [`Record`]
///
/// Every key was confirmed to exist by a successful stat at the time of its
/// last update. A directory target never holds an entry for its own root.
#[derive(Debug, Default)]
pub struct Snapshot {
    records: HashMap<PathBuf, Record>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &Path) -> Option<&Record> {
        self.records.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.records.contains_key(path)
    }

    /// Insert or overwrite, returning the previous record
    pub fn insert(&mut self, path: PathBuf, record: Record) -> Option<Record> {
        self.records.insert(path, record)
    }

    pub fn remove(&mut self, path: &Path) -> Option<Record> {
        self.records.remove(path)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Paths currently believed to exist, unordered
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.records.keys().map(PathBuf::as_path)
    }

    /// Consume the snapshot, yielding every record deepest path first
    pub fn into_deepest_first(self) -> Vec<(PathBuf, Record)> {
        let mut drained: Vec<_> = self.records.into_iter().collect();
        drained.sort_by(|(a, _), (b, _)| sequence::deepest_first(a, b));
        drained
    }
}
