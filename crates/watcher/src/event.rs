//! Change events and the handlers that receive them

use crossbeam_channel::Sender;
use std::path::{Path, PathBuf};

/// Kind of detected change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Path appeared since the last sweep
    Created,
    /// Path disappeared, changed kind, or its target was unwatched
    Removed,
    /// Path kept its kind but its modification time changed
    Modified,
}

/// A single detected change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEvent {
    /// Absolute path that changed
    pub path: PathBuf,
    /// Type of change
    pub kind: EventKind,
    /// Whether the path is (or, for removals, was) a directory
    pub is_dir: bool,
}

impl WatchEvent {
    pub fn created(path: impl Into<PathBuf>, is_dir: bool) -> Self {
        Self { path: path.into(), kind: EventKind::Created, is_dir }
    }

    pub fn removed(path: impl Into<PathBuf>, is_dir: bool) -> Self {
        Self { path: path.into(), kind: EventKind::Removed, is_dir }
    }

    pub fn modified(path: impl Into<PathBuf>, is_dir: bool) -> Self {
        Self { path: path.into(), kind: EventKind::Modified, is_dir }
    }
}

/// Receiver of watch events
///
/// Handlers are invoked synchronously while the watcher's lock is held,
/// either on the sweep thread or on the thread calling `unwatch`. A handler
/// must not call back into the same watcher's `watch`, `unwatch` or `poll`:
/// that deadlocks. Hand the event to another thread (a channel works) if
/// follow-up registration is needed.
pub trait EventHandler: Send + Sync + 'static {
    fn handle(&self, event: WatchEvent);
}

impl<F> EventHandler for F
where
    F: Fn(WatchEvent) + Send + Sync + 'static,
{
    fn handle(&self, event: WatchEvent) {
        self(event)
    }
}

impl EventHandler for Sender<WatchEvent> {
    fn handle(&self, event: WatchEvent) {
        // Receiver gone means nobody is listening anymore
        let _ = self.send(event);
    }
}

type PathCallback = Box<dyn Fn(&Path, bool) + Send + Sync + 'static>;

/// One callback per event kind
pub struct Callbacks {
    on_created: PathCallback,
    on_removed: PathCallback,
    on_modified: PathCallback,
}

impl Callbacks {
    pub fn new<C, R, M>(on_created: C, on_removed: R, on_modified: M) -> Self
    where
        C: Fn(&Path, bool) + Send + Sync + 'static,
        R: Fn(&Path, bool) + Send + Sync + 'static,
        M: Fn(&Path, bool) + Send + Sync + 'static,
    {
        Self {
            on_created: Box::new(on_created),
            on_removed: Box::new(on_removed),
            on_modified: Box::new(on_modified),
        }
    }
}

impl EventHandler for Callbacks {
    fn handle(&self, event: WatchEvent) {
        let callback = match event.kind {
            EventKind::Created => &self.on_created,
            EventKind::Removed => &self.on_removed,
            EventKind::Modified => &self.on_modified,
        };
        callback(&event.path, event.is_dir);
    }
}
