// src/watch/snapshot.rs

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, trace};

use crate::errors::TdaemonError;
use crate::fs::FileSystem;
use crate::watch::hash::{compute_file_hash, Fingerprint};
use crate::watch::ignore::IgnoreRules;

/// Mapping from root-relative file path to content fingerprint, taken at one
/// instant.
///
/// A snapshot is never updated in place: each tick builds a fresh one and the
/// daemon swaps it in wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    files: HashMap<PathBuf, Fingerprint>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, rel_path: PathBuf, fingerprint: Fingerprint) {
        self.files.insert(rel_path, fingerprint);
    }

    pub fn get(&self, rel_path: &Path) -> Option<&Fingerprint> {
        self.files.get(rel_path)
    }

    pub fn contains(&self, rel_path: impl AsRef<Path>) -> bool {
        self.files.contains_key(rel_path.as_ref())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &Fingerprint)> {
        self.files.iter().map(|(p, f)| (p.as_path(), f))
    }
}

/// Walks a watch root into [`Snapshot`]s.
///
/// The root is checked once, at construction. Later ticks tolerate the tree
/// changing underneath them.
#[derive(Debug, Clone)]
pub struct Snapshotter {
    fs: Arc<dyn FileSystem>,
    root: PathBuf,
    rules: IgnoreRules,
}

impl Snapshotter {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        root: impl Into<PathBuf>,
        rules: IgnoreRules,
    ) -> crate::errors::Result<Self> {
        let root = root.into();
        if !fs.is_dir(&root) {
            return Err(TdaemonError::InvalidPath(root));
        }
        Ok(Self { fs, root, rules })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn rules(&self) -> &IgnoreRules {
        &self.rules
    }

    /// Take a fresh snapshot of the tree.
    ///
    /// Ignored directories are pruned before descent; symlinked directories
    /// are not followed. A file or nested directory that disappears between
    /// listing and reading is left out of the result. Only a failure to list
    /// the root itself is an error.
    pub fn snapshot(&self) -> Result<Snapshot> {
        let mut snapshot = Snapshot::new();
        let mut stack = vec![self.root.clone()];

        while let Some(dir) = stack.pop() {
            let entries = match self.fs.read_dir(&dir) {
                Ok(entries) => entries,
                Err(err) if dir != self.root => {
                    debug!(dir = ?dir, error = %err, "directory vanished during walk; skipping");
                    continue;
                }
                Err(err) => {
                    return Err(err.context(format!("listing watch root {:?}", self.root)));
                }
            };

            for path in entries {
                let Ok(rel) = path.strip_prefix(&self.root) else {
                    continue;
                };

                if self.fs.is_dir(&path) {
                    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
                    if self.rules.is_ignored_dir(name) {
                        trace!(dir = ?rel, "pruning ignored directory");
                    } else if self.fs.is_symlink(&path) {
                        trace!(dir = ?rel, "not following symlinked directory");
                    } else {
                        stack.push(path);
                    }
                    continue;
                }

                if !self.fs.is_file(&path) || !self.rules.includes(rel) {
                    continue;
                }

                match compute_file_hash(self.fs.as_ref(), &path) {
                    Ok(fingerprint) => snapshot.insert(rel.to_path_buf(), fingerprint),
                    Err(err) => {
                        debug!(file = ?rel, error = %err, "file vanished before it could be read; omitting");
                    }
                }
            }
        }

        Ok(snapshot)
    }

    /// Total size of every file in `snapshot`, in whole MiB (rounded down).
    pub fn aggregate_size(&self, snapshot: &Snapshot) -> u64 {
        aggregate_size_mib(self.fs.as_ref(), &self.root, snapshot)
    }
}

/// Sum the on-disk sizes of every file in `snapshot`, in whole MiB.
///
/// Sizes come from a direct filesystem query, not from the snapshot. Files
/// that vanished since the snapshot was taken count as zero.
pub fn aggregate_size_mib(fs: &dyn FileSystem, root: &Path, snapshot: &Snapshot) -> u64 {
    let bytes: u64 = snapshot
        .paths()
        .map(|rel| fs.file_size(&root.join(rel)).unwrap_or(0))
        .sum();
    bytes / 1024 / 1024
}
