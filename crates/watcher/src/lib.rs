//! Polling file system watcher
//!
//! Watches files and directories by re-scanning them on a fixed interval
//! and diffing against the previous scan, for places where native change
//! notification is missing or unreliable (network mounts, containers).
//!
//! This crate provides:
//! - Depth-ordered sweeps: removals inside a deleted tree are reported
//!   leaf first, and a kind change is reported as removal then creation
//! - Idempotent `watch`/`unwatch` under a single lock
//! - Optional gitignore-style exclusions
//!
//! ```no_run
//! use std::time::Duration;
//! use watcher::PollWatcher;
//!
//! let watcher = PollWatcher::with_callbacks(
//!     Duration::from_secs(1),
//!     |path, is_dir| println!("created {} (dir: {})", path.display(), is_dir),
//!     |path, is_dir| println!("removed {} (dir: {})", path.display(), is_dir),
//!     |path, is_dir| println!("modified {} (dir: {})", path.display(), is_dir),
//! )?;
//! watcher.watch("src")?;
//! # Ok::<(), watcher::WatchError>(())
//! ```

pub mod config;
pub mod diff;
pub mod error;
pub mod event;
pub mod ignore;
pub mod periodic;
pub mod registry;
pub mod sequence;
pub mod snapshot;
pub mod sweep;
pub mod walk;
mod watcher;

// Re-exports
pub use config::WatcherConfig;
pub use error::{Result, WatchError};
pub use event::{Callbacks, EventHandler, EventKind, WatchEvent};
pub use crate::ignore::{IgnoreConfig, IgnoreRules};
pub use snapshot::{Record, Snapshot};
pub use sweep::SweepStats;
pub use watcher::{resolve, PollWatcher};
