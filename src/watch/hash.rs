// src/watch/hash.rs

use std::fmt;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use blake3::Hasher;

use crate::fs::FileSystem;

/// Content fingerprint of a single file: the hex blake3 digest of its bytes.
///
/// Always 64 characters long. Only equality matters to the daemon; the
/// digest is never persisted or compared across versions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compute the fingerprint of a single file.
///
/// The handle is opened, drained and dropped inside this call.
pub fn compute_file_hash(fs: &dyn FileSystem, path: &Path) -> Result<Fingerprint> {
    let mut hasher = Hasher::new();
    let mut file = fs
        .open_read(path)
        .with_context(|| format!("opening file for hashing: {:?}", path))?;
    let mut buf = [0u8; 8192];
    loop {
        let n = file
            .read(&mut buf)
            .with_context(|| format!("reading file for hashing: {:?}", path))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(Fingerprint(hasher.finalize().to_hex().to_string()))
}
