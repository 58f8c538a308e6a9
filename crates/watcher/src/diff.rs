//! Per-path diff engine
//!
//! Compares a fresh stat of one path against its stored [`Record`] and
//! decides which events, if any, the change produces.
//!
//! | prior      | probe                  | result                           |
//! |------------|------------------------|----------------------------------|
//! | none       | present                | insert, `Created`                |
//! | none       | missing                | nothing                          |
//! | record     | missing                | delete, `Removed`                |
//! | record     | present, kind changed  | replace, `Removed` then `Created`|
//! | record     | present, mtime changed | update, `Modified`               |
//! | record     | present, unchanged     | nothing                          |
//! | any        | unreadable             | nothing, record left stale       |

use crate::event::WatchEvent;
use crate::snapshot::{Record, Snapshot};
use smallvec::{smallvec, SmallVec};
use std::fs::Metadata;
use std::io;
use std::path::Path;

/// Events produced for a single path; a kind change yields two
pub type PathEvents = SmallVec<[WatchEvent; 2]>;

/// Outcome of statting one candidate path
#[derive(Debug)]
pub enum Probe {
    Present(Record),
    Missing,
    /// Stat failed for a reason other than absence
    Unreadable(io::Error),
}

impl Probe {
    pub fn from_stat(result: io::Result<Metadata>) -> Self {
        match result {
            Ok(metadata) => Self::Present(Record::from_metadata(&metadata)),
            Err(e) if is_absent(&e) => Self::Missing,
            Err(e) => Self::Unreadable(e),
        }
    }
}

/// Whether a stat error means the path does not exist
///
/// `NotADirectory` shows up when an ancestor was replaced by a file.
fn is_absent(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

/// Reconcile one path against the snapshot
///
/// The snapshot is updated before returning; the caller dispatches the
/// returned events in order.
pub fn apply(snapshot: &mut Snapshot, path: &Path, probe: Probe) -> PathEvents {
    let prior = snapshot.get(path).copied();

    match (prior, probe) {
        (None, Probe::Present(fresh)) => {
            snapshot.insert(path.to_path_buf(), fresh);
            smallvec![WatchEvent::created(path, fresh.is_dir)]
        }
        (None, Probe::Missing) => SmallVec::new(),
        (Some(old), Probe::Missing) => {
            snapshot.remove(path);
            smallvec![WatchEvent::removed(path, old.is_dir)]
        }
        (Some(old), Probe::Present(fresh)) if old.is_dir != fresh.is_dir => {
            snapshot.insert(path.to_path_buf(), fresh);
            smallvec![
                WatchEvent::removed(path, old.is_dir),
                WatchEvent::created(path, fresh.is_dir),
            ]
        }
        (Some(old), Probe::Present(fresh)) if old.mod_time != fresh.mod_time => {
            snapshot.insert(path.to_path_buf(), fresh);
            smallvec![WatchEvent::modified(path, fresh.is_dir)]
        }
        (Some(_), Probe::Present(_)) => SmallVec::new(),
        (_, Probe::Unreadable(e)) => {
            tracing::warn!("Skipping unreadable path {}: {}", path.display(), e);
            SmallVec::new()
        }
    }
}
