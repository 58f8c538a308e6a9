//! Registry of watched roots

use crate::ignore::IgnoreRules;
use crate::snapshot::Snapshot;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One watched root and its snapshot
#[derive(Debug)]
pub struct Target {
    root: PathBuf,
    /// Kind of the root when it was registered
    is_dir: bool,
    snapshot: Snapshot,
    ignore: IgnoreRules,
}

impl Target {
    pub fn new(root: PathBuf, is_dir: bool, ignore: IgnoreRules) -> Self {
        Self {
            root,
            is_dir,
            snapshot: Snapshot::new(),
            ignore,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn snapshot_mut(&mut self) -> &mut Snapshot {
        &mut self.snapshot
    }

    pub fn ignore(&self) -> &IgnoreRules {
        &self.ignore
    }
}

/// Watched roots keyed by absolute path
///
/// Targets are visited in path order during a sweep.
#[derive(Debug, Default)]
pub struct Registry {
    targets: BTreeMap<PathBuf, Target>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a target unless its root is already registered
    ///
    /// Returns `false` for an existing root, whose tracking state is left
    /// untouched so its contents are not reported as created again.
    pub fn register(&mut self, target: Target) -> bool {
        if self.targets.contains_key(target.root()) {
            return false;
        }
        self.targets.insert(target.root.clone(), target);
        true
    }

    /// Remove a target, handing back its snapshot
    ///
    /// `None` when the root was never registered.
    pub fn deregister(&mut self, root: &Path) -> Option<Snapshot> {
        self.targets.remove(root).map(|target| target.snapshot)
    }

    pub fn contains(&self, root: &Path) -> bool {
        self.targets.contains_key(root)
    }

    pub fn get(&self, root: &Path) -> Option<&Target> {
        self.targets.get(root)
    }

    pub fn roots(&self) -> impl Iterator<Item = &Path> {
        self.targets.keys().map(PathBuf::as_path)
    }

    pub fn targets_mut(&mut self) -> impl Iterator<Item = &mut Target> {
        self.targets.values_mut()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
