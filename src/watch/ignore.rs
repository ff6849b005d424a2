// src/watch/ignore.rs

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};

/// Version-control directories that are never descended into.
pub const DEFAULT_IGNORE_DIRS: &[&str] = &[".bzr", ".git", ".hg", ".darcs", ".svn"];

/// File extensions (without the dot) that never enter a snapshot.
pub const DEFAULT_IGNORE_EXTENSIONS: &[&str] = &["pyc", "pyo"];

/// Predicate set deciding whether a path participates in snapshotting.
///
/// All paths handed to these predicates are relative to the watch root, so a
/// root that happens to live under e.g. `.hg/` is still watched.
#[derive(Clone)]
pub struct IgnoreRules {
    dirs: Vec<String>,
    extensions: Vec<String>,
    exclude_patterns: Vec<String>,
    exclude_set: Option<GlobSet>,
}

impl fmt::Debug for IgnoreRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IgnoreRules")
            .field("dirs", &self.dirs)
            .field("extensions", &self.extensions)
            .field("exclude", &self.exclude_patterns)
            .finish()
    }
}

impl Default for IgnoreRules {
    fn default() -> Self {
        Self {
            dirs: DEFAULT_IGNORE_DIRS.iter().map(|s| s.to_string()).collect(),
            extensions: DEFAULT_IGNORE_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            exclude_patterns: Vec::new(),
            exclude_set: None,
        }
    }
}

impl IgnoreRules {
    /// Built-in rules extended with operator-supplied entries.
    ///
    /// Extensions may be given with or without a leading dot. `exclude` holds
    /// glob patterns matched against the root-relative path with forward
    /// slashes (e.g. `"build/**"`).
    pub fn with_extra(dirs: &[String], extensions: &[String], exclude: &[String]) -> Result<Self> {
        let mut rules = Self::default();

        for dir in dirs {
            if !rules.dirs.contains(dir) {
                rules.dirs.push(dir.clone());
            }
        }
        for ext in extensions {
            let ext = ext.trim_start_matches('.').to_string();
            if !ext.is_empty() && !rules.extensions.contains(&ext) {
                rules.extensions.push(ext);
            }
        }

        if !exclude.is_empty() {
            rules.exclude_set = Some(build_globset(exclude)?);
            rules.exclude_patterns = exclude.to_vec();
        }

        Ok(rules)
    }

    pub fn dirs(&self) -> &[String] {
        &self.dirs
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn exclude_patterns(&self) -> &[String] {
        &self.exclude_patterns
    }

    /// True if a directory with this base name must be pruned from the walk.
    pub fn is_ignored_dir(&self, name: &str) -> bool {
        self.dirs.iter().any(|d| d == name)
    }

    /// True if the file at `rel_path` belongs in a snapshot.
    ///
    /// Rejects ignored extensions, any path segment naming an ignored
    /// directory, and any path matched by an exclude glob.
    pub fn includes(&self, rel_path: &Path) -> bool {
        if let Some(ext) = rel_path.extension().and_then(|e| e.to_str()) {
            if self.extensions.iter().any(|ignored| ignored == ext) {
                return false;
            }
        }

        let in_ignored_dir = rel_path
            .components()
            .filter_map(|c| c.as_os_str().to_str())
            .any(|segment| self.is_ignored_dir(segment));
        if in_ignored_dir {
            return false;
        }

        if let Some(exclude) = &self.exclude_set {
            let rel = rel_path.to_string_lossy().replace('\\', "/");
            if exclude.is_match(rel.as_str()) {
                return false;
            }
        }

        true
    }
}

/// Build a GlobSet from simple string patterns.
fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = Glob::new(pat).with_context(|| format!("invalid glob pattern: {pat}"))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}
