//! Differences between two snapshots

use crate::snapshot::{MatchInfo, Snapshot};

/// Files that changed between two consecutive scans
///
/// A file is updated when it is new or its modification time differs from
/// the previous scan. A file is deleted when the previous scan had it and
/// the current one does not. Neither list has a defined order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotDiff {
    /// New or modified files, as seen by the current scan
    pub updated: Vec<MatchInfo>,
    /// Files that disappeared, as seen by the previous scan
    pub deleted: Vec<MatchInfo>,
}

impl SnapshotDiff {
    /// Compute the diff from `previous` to `current`
    pub fn between(previous: &Snapshot, current: &Snapshot) -> Self {
        let updated = current
            .iter()
            .filter(|info| match previous.get(&info.path) {
                Some(last) => last.modified != info.modified,
                None => true,
            })
            .cloned()
            .collect();

        let deleted = previous
            .iter()
            .filter(|info| !current.contains(&info.path))
            .cloned()
            .collect();

        Self { updated, deleted }
    }

    /// Check if there are any changes
    pub fn is_empty(&self) -> bool {
        self.updated.is_empty() && self.deleted.is_empty()
    }
}
