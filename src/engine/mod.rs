// src/engine/mod.rs

//! Polling engine for tdaemon.
//!
//! Each tick walks one pass of
//! `Idle -> Polling -> Comparing -> (NoChange -> Idle | Changed -> Running -> Idle)`.
//!
//! The pure decision state lives in [`core`]; the async/IO shell that sleeps,
//! snapshots and runs commands is implemented in [`runtime`].

use std::time::Duration;

pub mod core;
pub mod runtime;

pub use self::core::{DaemonCore, TickDecision};
pub use runtime::{Daemon, TickOutcome};

/// Default delay between two ticks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Options shared by the core and the async shell.
#[derive(Debug, Clone, Copy)]
pub struct DaemonOptions {
    /// Delay before each tick.
    pub interval: Duration,
    /// Print the added/removed/modified paths before each triggered run.
    pub debug: bool,
}

impl Default for DaemonOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            debug: false,
        }
    }
}
