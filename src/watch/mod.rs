// src/watch/mod.rs

//! Snapshotting and change detection.
//!
//! This module is responsible for:
//! - Deciding which paths take part in a snapshot ([`ignore`]).
//! - Fingerprinting file contents ([`hash`]).
//! - Walking the watch root into a [`Snapshot`] ([`snapshot`]).
//! - Comparing two snapshots and explaining the difference ([`diff`]).
//!
//! It knows nothing about test programs or the polling loop.

pub mod diff;
pub mod hash;
pub mod ignore;
pub mod snapshot;

pub use diff::{snapshots_equal, ChangeSet};
pub use hash::{compute_file_hash, Fingerprint};
pub use ignore::{IgnoreRules, DEFAULT_IGNORE_DIRS, DEFAULT_IGNORE_EXTENSIONS};
pub use snapshot::{aggregate_size_mib, Snapshot, Snapshotter};
