//! Error types for the watcher

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Invalid watcher configuration, reported at construction time
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("the directory path to watch cannot be empty")]
    EmptyRoot,

    #[error("at least one file suffix to match is required")]
    EmptyCriteria,

    #[error("file suffix at position {0} is blank")]
    BlankCriterion(usize),

    #[error("a change channel is required")]
    MissingChannel,

    #[error("a scanner is required")]
    MissingScanner,
}

/// A scan that could not produce a snapshot
#[derive(Debug, Error)]
pub enum ScanError {
    /// The watched root itself could not be listed
    #[error("failed to read root directory {}: {source}", root.display())]
    RootRead {
        root: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A custom scanner aborted the scan for another reason
    #[error("scan failed: {0}")]
    Scanner(String),
}

impl ScanError {
    /// Build a root-read error for `root`
    pub fn root_read(root: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::RootRead {
            root: root.into(),
            source,
        }
    }

    /// Check if the failure was the root directory being unreadable
    pub fn is_root_read(&self) -> bool {
        matches!(self, Self::RootRead { .. })
    }
}

/// Failure creating a watcher
#[derive(Debug, Error)]
pub enum WatchError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("a watcher must be created inside a tokio runtime")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}
