#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tdaemon::fs::{FileSystem, RealFileSystem};
use tdaemon::watch::{IgnoreRules, Snapshotter};

pub use tdaemon_test_utils::init_tracing;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Write `contents` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, contents: &str) -> std::io::Result<()> {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}

/// Snapshotter over the real filesystem with the built-in ignore rules.
pub fn real_snapshotter(root: &Path) -> Snapshotter {
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    Snapshotter::new(fs, root, IgnoreRules::default()).expect("tempdir root is a directory")
}
