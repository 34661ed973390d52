//! Pollwatch Core - snapshot primitives for the polling watcher
//!
//! This crate provides the pure, I/O-free layer:
//! - Suffix matching
//! - Snapshot representation
//! - Snapshot diffing

pub mod matcher;
pub mod snapshot;
pub mod diff;

// Re-export main types for convenience
pub use matcher::{match_suffix, matches_any};
pub use snapshot::{MatchInfo, Snapshot};
pub use diff::SnapshotDiff;
