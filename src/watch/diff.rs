// src/watch/diff.rs

//! Snapshot comparison.
//!
//! [`snapshots_equal`] is the only thing that drives the daemon. [`ChangeSet`]
//! exists for `--debug` output.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use crate::watch::snapshot::Snapshot;

/// Exact equality: same key set, same fingerprint per key.
pub fn snapshots_equal(a: &Snapshot, b: &Snapshot) -> bool {
    a == b
}

/// Paths that differ between a current and a candidate snapshot.
///
/// The three sets are disjoint. Ordered so debug output is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub added: BTreeSet<PathBuf>,
    pub removed: BTreeSet<PathBuf>,
    pub modified: BTreeSet<PathBuf>,
}

impl ChangeSet {
    /// Classify every difference between `current` and `candidate`.
    pub fn between(current: &Snapshot, candidate: &Snapshot) -> Self {
        let mut changes = ChangeSet::default();

        for (path, fingerprint) in candidate.iter() {
            match current.get(path) {
                None => {
                    changes.added.insert(path.to_path_buf());
                }
                Some(previous) if previous != fingerprint => {
                    changes.modified.insert(path.to_path_buf());
                }
                Some(_) => {}
            }
        }

        for path in current.paths() {
            if !candidate.contains(path) {
                changes.removed.insert(path.to_path_buf());
            }
        }

        changes
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }

    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.modified.len()
    }
}

impl fmt::Display for ChangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for path in &self.added {
            writeln!(f, "  added:    {}", path.display())?;
        }
        for path in &self.removed {
            writeln!(f, "  removed:  {}", path.display())?;
        }
        for path in &self.modified {
            writeln!(f, "  modified: {}", path.display())?;
        }
        Ok(())
    }
}
