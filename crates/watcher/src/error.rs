//! Error types for the polling watcher

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for watcher operations
pub type Result<T> = std::result::Result<T, WatchError>;

/// Errors surfaced synchronously by [`crate::PollWatcher`]
///
/// Errors hit while sweeping are never returned: they stay confined to the
/// path that produced them and are retried on the next tick.
#[derive(Debug, Error)]
pub enum WatchError {
    /// The path could not be turned into an absolute path
    #[error("failed to resolve {}: {source}", .path.display())]
    PathResolution {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The root was unreachable when `watch` was called
    #[error("cannot watch {}: {source}", .path.display())]
    InitialStat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An ignore pattern failed to compile
    #[error("invalid ignore pattern {pattern:?}: {source}")]
    InvalidIgnorePattern {
        pattern: String,
        #[source]
        source: ignore::Error,
    },

    /// The background sweep thread could not be started
    #[error("failed to spawn sweep worker: {0}")]
    Spawn(#[source] io::Error),
}

impl WatchError {
    /// Whether the underlying I/O failure was "not found"
    pub fn is_not_found(&self) -> bool {
        self.io_error()
            .map(|e| e.kind() == io::ErrorKind::NotFound)
            .unwrap_or(false)
    }

    /// Underlying I/O error, if any
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::PathResolution { source, .. } | Self::InitialStat { source, .. } => Some(source),
            Self::Spawn(source) => Some(source),
            Self::InvalidIgnorePattern { .. } => None,
        }
    }
}
