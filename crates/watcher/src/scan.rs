//! Directory scanners
//!
//! A scanner turns the watcher configuration into a [`Snapshot`]. Two
//! layouts are provided:
//!
//! ```text
//! My Files/
//! |-- SomeFile.txt
//! |-- Awesome.cfg
//! |-- stuff/
//!    |-- CoolStory.cfg
//! ```
//!
//! With criteria `[".cfg"]`, [`FlatScanner`] records `My Files/Awesome.cfg`
//! while [`NestedScanner`] records `My Files/stuff/CoolStory.cfg`.
//!
//! Only a root directory that cannot be listed fails a scan. Entries and
//! subdirectories that cannot be read are left out of the snapshot.

use crate::config::WatchConfig;
use crate::error::ScanError;
use pollwatch_core::{match_suffix, MatchInfo, Snapshot};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;
use walkdir::WalkDir;

/// Produces a snapshot of the files matching a configuration
pub trait Scanner: Send + Sync {
    /// Scan the configured root
    ///
    /// Returns an error only when the scan as a whole could not run.
    fn scan(&self, config: &WatchConfig) -> Result<Snapshot, ScanError>;
}

impl<F> Scanner for F
where
    F: Fn(&WatchConfig) -> Result<Snapshot, ScanError> + Send + Sync,
{
    fn scan(&self, config: &WatchConfig) -> Result<Snapshot, ScanError> {
        self(config)
    }
}

/// Matches files directly inside the root
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatScanner;

impl Scanner for FlatScanner {
    fn scan(&self, config: &WatchConfig) -> Result<Snapshot, ScanError> {
        scan_directory(config.root(), config.criteria())
    }
}

/// Matches files inside the root's immediate subdirectories
#[derive(Debug, Clone, Copy, Default)]
pub struct NestedScanner;

impl Scanner for NestedScanner {
    fn scan(&self, config: &WatchConfig) -> Result<Snapshot, ScanError> {
        scan_subdirectories(config.root(), config.criteria())
    }
}

/// Directory layout to scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Files in the root only
    #[default]
    Flat,
    /// Files one directory below the root only
    Nested,
}

impl ScanMode {
    /// The scanner implementing this layout
    pub fn scanner(self) -> Arc<dyn Scanner> {
        match self {
            ScanMode::Flat => Arc::new(FlatScanner),
            ScanMode::Nested => Arc::new(NestedScanner),
        }
    }

    /// Run a single scan of `root` in this layout
    pub fn scan<S: AsRef<str>>(self, root: &Path, criteria: &[S]) -> Result<Snapshot, ScanError> {
        match self {
            ScanMode::Flat => scan_directory(root, criteria),
            ScanMode::Nested => scan_subdirectories(root, criteria),
        }
    }
}

/// Scan the files directly inside `root`
pub fn scan_directory<S: AsRef<str>>(root: &Path, criteria: &[S]) -> Result<Snapshot, ScanError> {
    scan_at_depth(root, 1, criteria)
}

/// Scan the files inside each immediate subdirectory of `root`
pub fn scan_subdirectories<S: AsRef<str>>(
    root: &Path,
    criteria: &[S],
) -> Result<Snapshot, ScanError> {
    scan_at_depth(root, 2, criteria)
}

/// Collect matching non-directory entries found exactly `depth` levels below `root`
fn scan_at_depth<S: AsRef<str>>(
    root: &Path,
    depth: usize,
    criteria: &[S],
) -> Result<Snapshot, ScanError> {
    let mut walker = WalkDir::new(root)
        .max_depth(depth)
        .follow_links(false)
        .into_iter();

    // The first entry is the root itself
    match walker.next() {
        Some(Ok(entry)) if entry.file_type().is_dir() => {}
        Some(Ok(_)) => {
            return Err(ScanError::root_read(
                root,
                io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
            ));
        }
        Some(Err(err)) => return Err(ScanError::root_read(root, err.into())),
        None => {
            return Err(ScanError::root_read(
                root,
                io::Error::new(io::ErrorKind::NotFound, "nothing to scan"),
            ));
        }
    }

    let mut snapshot = Snapshot::new();

    for item in walker {
        let entry = match item {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 || err.path() == Some(root) => {
                return Err(ScanError::root_read(root, err.into()));
            }
            Err(err) => {
                debug!("Skipping unreadable entry: {}", err);
                continue;
            }
        };

        if entry.depth() != depth || entry.file_type().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        let Some(suffix) = match_suffix(&name, criteria) else {
            continue;
        };

        let modified = match entry.metadata().map_err(io::Error::from).and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(err) => {
                debug!("Skipping {}: {}", entry.path().display(), err);
                continue;
            }
        };

        snapshot.insert(MatchInfo::new(entry.path(), modified, suffix));
    }

    Ok(snapshot)
}
