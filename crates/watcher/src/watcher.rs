//! Polling watcher: registration front end over the sweep worker

use crate::config::WatcherConfig;
use crate::error::{Result, WatchError};
use crate::event::{Callbacks, EventHandler, WatchEvent};
use crate::ignore::{IgnoreConfig, IgnoreRules};
use crate::periodic::Periodic;
use crate::registry::{Registry, Target};
use crate::sweep::{self, SweepStats};
use crate::walk::Walker;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Polling file system watcher
///
/// A background thread re-scans every watched root once per interval and
/// reports `Created`, `Removed` and `Modified` events to the handler.
///
/// One lock guards all tracking state. Sweeps, `watch`, `unwatch` and `poll`
/// each hold it for their whole duration, and the handler runs while it is
/// held. See [`EventHandler`] for what that means for re-entrancy.
pub struct PollWatcher {
    periodic: Periodic<Registry>,
    handler: Arc<dyn EventHandler>,
    walker: Walker,
    ignore: IgnoreConfig,
}

impl PollWatcher {
    /// Create a watcher and start its sweep thread
    pub fn new<H: EventHandler>(config: WatcherConfig, handler: H) -> Result<Self> {
        config.ignore.validate()?;

        let handler: Arc<dyn EventHandler> = Arc::new(handler);
        let walker = Walker::new(config.follow_links);
        let interval = config.interval();

        let sweep_handler = Arc::clone(&handler);
        let periodic = Periodic::spawn("pollwatch-sweep", Registry::new(), interval, move |registry| {
            sweep::sweep(registry, &walker, sweep_handler.as_ref());
        })
        .map_err(WatchError::Spawn)?;

        info!("Started polling watcher (interval: {:?})", interval);

        Ok(Self {
            periodic,
            handler,
            walker,
            ignore: config.ignore,
        })
    }

    /// Create a watcher with one callback per event kind
    ///
    /// Each callback receives the absolute path and whether it is (or was)
    /// a directory.
    pub fn with_callbacks<C, R, M>(interval: Duration, on_created: C, on_removed: R, on_modified: M) -> Result<Self>
    where
        C: Fn(&Path, bool) + Send + Sync + 'static,
        R: Fn(&Path, bool) + Send + Sync + 'static,
        M: Fn(&Path, bool) + Send + Sync + 'static,
    {
        Self::new(
            WatcherConfig::with_interval(interval),
            Callbacks::new(on_created, on_removed, on_modified),
        )
    }

    /// Start watching a file or directory
    ///
    /// Nothing is reported synchronously: the next sweep reports everything
    /// already present as created. Watching an already watched root keeps
    /// its tracking state as is.
    pub fn watch(&self, path: impl AsRef<Path>) -> Result<()> {
        let root = resolve(path.as_ref())?;

        self.periodic.with(|registry| -> Result<()> {
            let metadata = fs::metadata(&root).map_err(|source| WatchError::InitialStat {
                path: root.clone(),
                source,
            })?;

            if registry.contains(&root) {
                debug!("Already watching {}", root.display());
                return Ok(());
            }

            let is_dir = metadata.is_dir();
            let ignore = if is_dir {
                IgnoreRules::load(&root, &self.ignore)?
            } else {
                IgnoreRules::none()
            };

            info!("Watching {} ({})", root.display(), if is_dir { "directory" } else { "file" });
            registry.register(Target::new(root, is_dir, ignore));
            Ok(())
        })
    }

    /// Stop watching a root, reporting every tracked path as removed
    ///
    /// Removals are reported deepest first on the calling thread. Unknown
    /// roots are accepted silently.
    pub fn unwatch(&self, path: impl AsRef<Path>) -> Result<()> {
        let root = resolve(path.as_ref())?;

        self.periodic.with(|registry| {
            let Some(snapshot) = registry.deregister(&root) else {
                debug!("Not watching {}", root.display());
                return;
            };

            let tracked = snapshot.len();
            for (path, record) in snapshot.into_deepest_first() {
                self.handler.handle(WatchEvent::removed(path, record.is_dir));
            }
            info!("Stopped watching {} ({} paths released)", root.display(), tracked);
        });

        Ok(())
    }

    /// Run one sweep now on the calling thread
    ///
    /// Waits for an in-flight background sweep first. Works after `close`.
    pub fn poll(&self) -> SweepStats {
        self.periodic
            .with(|registry| sweep::sweep(registry, &self.walker, self.handler.as_ref()))
    }

    /// Stop the background sweep thread
    ///
    /// Blocks until an in-flight sweep completes; no handler call from the
    /// sweep thread happens after this returns. Idempotent.
    pub fn close(&self) {
        if self.periodic.is_running() {
            info!("Stopping polling watcher");
        }
        self.periodic.close();
    }

    /// Watched roots in sorted order
    pub fn watched_paths(&self) -> Vec<PathBuf> {
        self.periodic
            .with(|registry| registry.roots().map(Path::to_path_buf).collect())
    }

    pub fn is_watching(&self, path: impl AsRef<Path>) -> Result<bool> {
        let root = resolve(path.as_ref())?;
        Ok(self.periodic.with(|registry| registry.contains(&root)))
    }

    /// Number of paths currently tracked under a root
    pub fn tracked_count(&self, path: impl AsRef<Path>) -> Result<usize> {
        let root = resolve(path.as_ref())?;
        Ok(self
            .periodic
            .with(|registry| registry.get(&root).map(|t| t.snapshot().len()).unwrap_or(0)))
    }
}

/// Resolve a path to a normalized absolute path
///
/// Purely lexical: `.` is dropped and `..` removes the preceding component.
/// Symlinks are not resolved and the path need not exist. An empty path
/// means the current directory.
pub fn resolve(path: &Path) -> Result<PathBuf> {
    let path = if path.as_os_str().is_empty() { Path::new(".") } else { path };
    let absolute = std::path::absolute(path).map_err(|source| WatchError::PathResolution {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(normalize(&absolute))
}

fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_dots() {
        assert_eq!(normalize(Path::new("/a/./b/../c/")), PathBuf::from("/a/c"));
        assert_eq!(normalize(Path::new("/../a")), PathBuf::from("/a"));
    }

    #[test]
    fn test_resolve_makes_absolute() {
        let resolved = resolve(Path::new("some/file.txt")).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("some/file.txt"));
        assert_eq!(resolve(Path::new("x/../some/file.txt")).unwrap(), resolved);
    }

    #[test]
    fn test_resolve_empty_path_is_current_dir() {
        let cwd = normalize(&std::env::current_dir().unwrap());
        assert_eq!(resolve(Path::new("")).unwrap(), cwd);
        assert_eq!(resolve(Path::new(".")).unwrap(), cwd);
    }
}
