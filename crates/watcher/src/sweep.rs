//! Sweep driver: one full scan-diff-emit pass over the registry

use crate::diff;
use crate::event::EventHandler;
use crate::registry::{Registry, Target};
use crate::sequence;
use crate::walk::Walker;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Summary of one sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepStats {
    pub targets: usize,
    pub paths: usize,
    pub events: usize,
    pub elapsed: Duration,
}

/// Scan every registered target once
///
/// The caller holds exclusive access to the registry for the whole pass.
/// Each path's snapshot update lands before its events are dispatched, so a
/// pass cut short leaves every target in a state the next pass can resume
/// from.
pub fn sweep(registry: &mut Registry, walker: &Walker, handler: &dyn EventHandler) -> SweepStats {
    let started = Instant::now();
    let mut stats = SweepStats::default();

    for target in registry.targets_mut() {
        scan_target(target, walker, handler, &mut stats);
        stats.targets += 1;
    }

    stats.elapsed = started.elapsed();
    if stats.events > 0 {
        debug!(
            "Sweep found {} changes across {} targets ({} paths, {:?})",
            stats.events, stats.targets, stats.paths, stats.elapsed
        );
    } else {
        trace!("Sweep: no changes ({} paths, {:?})", stats.paths, stats.elapsed);
    }
    stats
}

fn scan_target(target: &mut Target, walker: &Walker, handler: &dyn EventHandler, stats: &mut SweepStats) {
    let candidates = sequence::candidates(target, walker);
    let root_is_file = !target.is_dir();

    for path in candidates {
        let probe = if root_is_file && path == target.root() {
            walker.probe_root(&path)
        } else {
            walker.probe(&path)
        };

        for event in diff::apply(target.snapshot_mut(), &path, probe) {
            trace!("{:?} {} (dir: {})", event.kind, event.path.display(), event.is_dir);
            handler.handle(event);
            stats.events += 1;
        }
        stats.paths += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventKind, WatchEvent};
    use crate::ignore::IgnoreRules;
    use crossbeam_channel::{unbounded, Receiver};
    use std::fs;
    use tempfile::TempDir;

    fn drain(rx: &Receiver<WatchEvent>) -> Vec<WatchEvent> {
        rx.try_iter().collect()
    }

    #[test]
    fn test_sweep_discovers_then_goes_quiet() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_path_buf();
        fs::create_dir(root.join("d")).unwrap();
        fs::write(root.join("d/f.txt"), b"f").unwrap();

        let mut registry = Registry::new();
        registry.register(Target::new(root.clone(), true, IgnoreRules::none()));
        let (tx, rx) = unbounded();

        let stats = sweep(&mut registry, &Walker::default(), &tx);
        assert_eq!(stats.targets, 1);
        assert_eq!(stats.events, 2);
        assert_eq!(
            drain(&rx),
            vec![
                WatchEvent::created(root.join("d/f.txt"), false),
                WatchEvent::created(root.join("d"), true),
            ]
        );

        let stats = sweep(&mut registry, &Walker::default(), &tx);
        assert_eq!(stats.events, 0);
        assert!(drain(&rx).is_empty());
    }

    #[test]
    fn test_deleted_subtree_reports_leaves_first() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_path_buf();
        fs::create_dir_all(root.join("d/e")).unwrap();
        fs::write(root.join("d/e/g.txt"), b"g").unwrap();
        fs::write(root.join("d/f.txt"), b"f").unwrap();

        let mut registry = Registry::new();
        registry.register(Target::new(root.clone(), true, IgnoreRules::none()));
        let (tx, rx) = unbounded();
        sweep(&mut registry, &Walker::default(), &tx);
        drain(&rx);

        fs::remove_dir_all(root.join("d")).unwrap();
        sweep(&mut registry, &Walker::default(), &tx);

        let events = drain(&rx);
        assert!(events.iter().all(|e| e.kind == EventKind::Removed));
        assert_eq!(
            events.iter().map(|e| e.path.clone()).collect::<Vec<_>>(),
            vec![root.join("d/e/g.txt"), root.join("d/e"), root.join("d/f.txt"), root.join("d")]
        );
    }
}
