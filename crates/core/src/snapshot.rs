//! Point-in-time scan results

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// A single file that met the match criteria
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchInfo {
    /// Path of the file (root joined with the entry name)
    pub path: PathBuf,
    /// Last modification time reported by the filesystem
    pub modified: SystemTime,
    /// The suffix the file name matched on
    pub matched_on: String,
}

impl MatchInfo {
    /// Create a new match record
    pub fn new(path: impl Into<PathBuf>, modified: SystemTime, matched_on: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            modified,
            matched_on: matched_on.into(),
        }
    }
}

/// Everything one scan matched, keyed by path
///
/// Snapshots are compared by path and modification time only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    entries: AHashMap<PathBuf, MatchInfo>,
}

impl Snapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a match, replacing any previous record for the same path
    pub fn insert(&mut self, info: MatchInfo) -> Option<MatchInfo> {
        self.entries.insert(info.path.clone(), info)
    }

    /// Look up the record for a path
    pub fn get(&self, path: &Path) -> Option<&MatchInfo> {
        self.entries.get(path)
    }

    /// Check if a path was matched
    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    /// Number of matched files
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing was matched
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over records in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &MatchInfo> {
        self.entries.values()
    }

    /// Records sorted by path, for stable display
    pub fn sorted(&self) -> Vec<&MatchInfo> {
        let mut infos: Vec<_> = self.entries.values().collect();
        infos.sort_by(|a, b| a.path.cmp(&b.path));
        infos
    }
}

impl FromIterator<MatchInfo> for Snapshot {
    fn from_iter<I: IntoIterator<Item = MatchInfo>>(iter: I) -> Self {
        let mut snapshot = Snapshot::new();
        for info in iter {
            snapshot.insert(info);
        }
        snapshot
    }
}

impl Extend<MatchInfo> for Snapshot {
    fn extend<I: IntoIterator<Item = MatchInfo>>(&mut self, iter: I) {
        for info in iter {
            self.insert(info);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn at(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    #[test]
    fn test_insert_replaces_same_path() {
        let mut snapshot = Snapshot::new();
        assert!(snapshot.insert(MatchInfo::new("/w/a.txt", at(1), ".txt")).is_none());

        let old = snapshot.insert(MatchInfo::new("/w/a.txt", at(2), ".txt"));
        assert_eq!(old.map(|i| i.modified), Some(at(1)));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get(Path::new("/w/a.txt")).unwrap().modified, at(2));
    }

    #[test]
    fn test_sorted_is_ordered_by_path() {
        let snapshot: Snapshot = [
            MatchInfo::new("/w/c.txt", at(1), ".txt"),
            MatchInfo::new("/w/a.txt", at(1), ".txt"),
            MatchInfo::new("/w/b.cfg", at(1), ".cfg"),
        ]
        .into_iter()
        .collect();

        let paths: Vec<_> = snapshot.sorted().into_iter().map(|i| i.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/w/a.txt"),
                PathBuf::from("/w/b.cfg"),
                PathBuf::from("/w/c.txt"),
            ]
        );
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = Snapshot::new();
        assert!(snapshot.is_empty());
        assert!(!snapshot.contains(Path::new("/w/a.txt")));
        assert_eq!(snapshot.iter().count(), 0);
    }
}
