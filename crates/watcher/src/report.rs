//! Per-cycle change reports

use crate::error::ScanError;
use pollwatch_core::{matches_any, MatchInfo, SnapshotDiff};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::path::Path;

/// The outcome of one scan cycle, as delivered to the consumer
///
/// A report either carries a scan error (and no changes) or the files that
/// were updated and deleted since the previous successful scan.
#[derive(Debug, Default)]
pub struct ChangeReport {
    updated: Vec<MatchInfo>,
    deleted: Vec<MatchInfo>,
    error: Option<ScanError>,
}

impl ChangeReport {
    /// Report for a successful scan
    pub fn from_diff(diff: SnapshotDiff) -> Self {
        Self {
            updated: diff.updated,
            deleted: diff.deleted,
            error: None,
        }
    }

    /// Report for a scan that failed
    pub fn from_error(error: ScanError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// True when the watched root could not be listed
    pub fn is_root_read_error(&self) -> bool {
        self.error.as_ref().is_some_and(ScanError::is_root_read)
    }

    /// Human readable error, empty when the scan succeeded
    pub fn error_details(&self) -> String {
        self.error.as_ref().map(ToString::to_string).unwrap_or_default()
    }

    pub fn error(&self) -> Option<&ScanError> {
        self.error.as_ref()
    }

    /// True when the report carries neither changes nor an error
    pub fn is_empty(&self) -> bool {
        self.error.is_none() && self.updated.is_empty() && self.deleted.is_empty()
    }

    /// New or modified files
    pub fn updated(&self) -> &[MatchInfo] {
        &self.updated
    }

    /// Files that are gone since the previous scan
    pub fn deleted(&self) -> &[MatchInfo] {
        &self.deleted
    }

    pub fn updated_paths(&self) -> Vec<&Path> {
        select(&self.updated, |_| true)
    }

    pub fn deleted_paths(&self) -> Vec<&Path> {
        select(&self.deleted, |_| true)
    }

    /// Updated files whose name ends with one of `suffixes`
    pub fn updated_paths_with_suffixes<S: AsRef<str>>(&self, suffixes: &[S]) -> Vec<&Path> {
        select(&self.updated, |name| matches_any(name, suffixes))
    }

    /// Deleted files whose name ends with one of `suffixes`
    pub fn deleted_paths_with_suffixes<S: AsRef<str>>(&self, suffixes: &[S]) -> Vec<&Path> {
        select(&self.deleted, |name| matches_any(name, suffixes))
    }

    /// Updated files whose name ends with none of `suffixes`
    pub fn updated_paths_without_suffixes<S: AsRef<str>>(&self, suffixes: &[S]) -> Vec<&Path> {
        select(&self.updated, |name| !matches_any(name, suffixes))
    }

    /// Deleted files whose name ends with none of `suffixes`
    pub fn deleted_paths_without_suffixes<S: AsRef<str>>(&self, suffixes: &[S]) -> Vec<&Path> {
        select(&self.deleted, |name| !matches_any(name, suffixes))
    }
}

fn select<F>(infos: &[MatchInfo], keep: F) -> Vec<&Path>
where
    F: Fn(&str) -> bool,
{
    infos
        .iter()
        .filter(|info| {
            let name = info
                .path
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_default();
            keep(&name)
        })
        .map(|info| info.path.as_path())
        .collect()
}

impl Serialize for ChangeReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ChangeReport", 4)?;
        state.serialize_field("updated", &self.updated)?;
        state.serialize_field("deleted", &self.deleted)?;
        state.serialize_field("error", &self.error.as_ref().map(ToString::to_string))?;
        state.serialize_field("root_read_error", &self.is_root_read_error())?;
        state.end()
    }
}
