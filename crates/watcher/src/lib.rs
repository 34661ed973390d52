//! Polling file watcher
//!
//! This crate periodically rescans a directory and reports which files
//! matching a set of name suffixes were updated or deleted:
//! - Flat and one-level-nested directory scanners
//! - Start/stop/destroy lifecycle with at most one polling task
//! - Bounded change channel with backpressure
//! - TOML settings

pub mod config;
pub mod error;
pub mod poll;
pub mod report;
pub mod scan;
pub mod sink;

pub use config::{WatchConfig, WatchConfigBuilder, WatchSettings, DEFAULT_INTERVAL};
pub use error::{ConfigError, ScanError, WatchError};
pub use poll::{PollWatcher, WatchState};
pub use report::ChangeReport;
pub use scan::{scan_directory, scan_subdirectories, FlatScanner, NestedScanner, ScanMode, Scanner};
pub use sink::{change_channel, ChangeReceiver, ChangeSink};

pub use pollwatch_core::{MatchInfo, Snapshot, SnapshotDiff};
