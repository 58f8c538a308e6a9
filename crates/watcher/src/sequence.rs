//! Depth-ordered candidate sequencing
//!
//! Each sweep evaluates a target's paths deepest first: every descendant of
//! a vanished directory is confirmed gone (and reported) before anything is
//! concluded about the directory itself. The order is rebuilt on every
//! sweep since the candidate set changes from tick to tick.

use crate::registry::Target;
use crate::walk::Walker;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Depth of an absolute path
///
/// Counts path components, which differs from the separator count only by a
/// constant for normalized absolute paths.
pub fn depth(path: &Path) -> usize {
    path.components().count()
}

/// Ordering: deeper paths first, ties broken lexically
pub fn deepest_first(a: &Path, b: &Path) -> Ordering {
    depth(b).cmp(&depth(a)).then_with(|| a.cmp(b))
}

/// Sort paths in place, deepest first
pub fn sort_deepest_first(paths: &mut [PathBuf]) {
    paths.sort_by(|a, b| deepest_first(a, b));
}

/// Build this sweep's candidate sequence for one target
///
/// Union of the paths known from the previous sweep and, for directory
/// targets, everything a fresh enumeration discovers. A file target's only
/// candidate besides stale entries is its root.
pub fn candidates(target: &Target, walker: &Walker) -> Vec<PathBuf> {
    let mut seen: HashSet<PathBuf> = target.snapshot().paths().map(Path::to_path_buf).collect();

    if target.is_dir() {
        for path in walker.discover(target.root(), target.ignore()) {
            seen.insert(path);
        }
    } else {
        seen.insert(target.root().to_path_buf());
    }

    let mut ordered: Vec<PathBuf> = seen.into_iter().collect();
    sort_deepest_first(&mut ordered);
    ordered
}
