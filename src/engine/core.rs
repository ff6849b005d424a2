// src/engine/core.rs

//! Pure core of the polling loop.
//!
//! [`DaemonCore`] owns the current [`Snapshot`] and the [`TestCommand`]. It
//! decides whether a candidate snapshot warrants a run, and swaps the
//! candidate in afterwards. No IO, no Tokio, no processes.

use crate::exec::TestCommand;
use crate::watch::{snapshots_equal, ChangeSet, Snapshot};

/// What the shell should do with a candidate snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickDecision {
    /// Candidate equals current; discard it.
    NoChange,
    /// Something changed; run the test command.
    ///
    /// `changes` is only computed when debug output is on.
    Run { changes: Option<ChangeSet> },
}

#[derive(Debug)]
pub struct DaemonCore {
    current: Snapshot,
    command: TestCommand,
    debug: bool,
}

impl DaemonCore {
    /// `initial` is the baseline; it never triggers a run by itself.
    pub fn new(initial: Snapshot, command: TestCommand, debug: bool) -> Self {
        Self {
            current: initial,
            command,
            debug,
        }
    }

    pub fn current(&self) -> &Snapshot {
        &self.current
    }

    pub fn command(&self) -> &TestCommand {
        &self.command
    }

    /// Compare `candidate` against the current snapshot.
    pub fn evaluate(&self, candidate: &Snapshot) -> TickDecision {
        if snapshots_equal(&self.current, candidate) {
            return TickDecision::NoChange;
        }

        let changes = self
            .debug
            .then(|| ChangeSet::between(&self.current, candidate));
        TickDecision::Run { changes }
    }

    /// Replace the current snapshot with `candidate`.
    ///
    /// Called after every triggered run whatever its outcome, so a failing
    /// suite is only re-run on a further change.
    pub fn advance(&mut self, candidate: Snapshot) {
        self.current = candidate;
    }
}
