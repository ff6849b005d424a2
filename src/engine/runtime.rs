// src/engine/runtime.rs

use std::fmt;
use std::future::Future;

use anyhow::anyhow;
use tracing::{debug, error, info, warn};

use crate::errors::Result;
use crate::exec::{resolve, CommandRunner, RunReport, TestCommand};
use crate::watch::{Snapshot, Snapshotter};

use super::core::{DaemonCore, TickDecision};
use super::DaemonOptions;

/// Result of a single tick, mostly useful to tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The tree could not be listed; the current snapshot was kept.
    Skipped,
    /// Nothing changed; no command was run.
    Unchanged,
    /// The test command ran (successfully or not).
    Ran(RunReport),
    /// A change was detected but the command could not be resolved or
    /// started. The snapshot still advanced.
    DispatchFailed(String),
}

/// Drives the polling loop: snapshot, compare, and run the test command
/// through a `CommandRunner`.
///
/// This is the IO shell around `DaemonCore`. Ticks never overlap: each one,
/// including the test run, completes before the next sleep starts.
pub struct Daemon<R: CommandRunner> {
    core: DaemonCore,
    snapshotter: Snapshotter,
    runner: R,
    options: DaemonOptions,
}

impl<R: CommandRunner> fmt::Debug for Daemon<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Daemon")
            .field("core", &self.core)
            .field("root", &self.snapshotter.root())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<R: CommandRunner> Daemon<R> {
    /// Build a daemon around an already-taken baseline snapshot.
    pub fn new(
        snapshotter: Snapshotter,
        initial: Snapshot,
        command: TestCommand,
        runner: R,
        options: DaemonOptions,
    ) -> Self {
        Self {
            core: DaemonCore::new(initial, command, options.debug),
            snapshotter,
            runner,
            options,
        }
    }

    /// Take the baseline snapshot now and build the daemon around it.
    pub fn start(
        snapshotter: Snapshotter,
        command: TestCommand,
        runner: R,
        options: DaemonOptions,
    ) -> Result<Self> {
        let initial = snapshotter.snapshot()?;
        info!(files = initial.len(), root = ?snapshotter.root(), "initial snapshot taken");
        Ok(Self::new(snapshotter, initial, command, runner, options))
    }

    pub fn current(&self) -> &Snapshot {
        self.core.current()
    }

    /// One pass without the sleep: snapshot, compare, maybe run, advance.
    pub async fn tick(&mut self) -> Result<TickOutcome> {
        let snapshotter = self.snapshotter.clone();
        let candidate = match tokio::task::spawn_blocking(move || snapshotter.snapshot())
            .await
            .map_err(|e| anyhow!("snapshot task panicked: {e}"))?
        {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(error = %err, "could not snapshot watch root; skipping tick");
                return Ok(TickOutcome::Skipped);
            }
        };

        let changes = match self.core.evaluate(&candidate) {
            TickDecision::NoChange => {
                debug!(files = candidate.len(), "no change detected");
                return Ok(TickOutcome::Unchanged);
            }
            TickDecision::Run { changes } => changes,
        };

        if let Some(changes) = changes {
            debug!(changed = changes.len(), "change set computed");
            print!("{changes}");
        }

        let outcome = self.run_test_command().await;
        self.core.advance(candidate);
        Ok(outcome)
    }

    async fn run_test_command(&mut self) -> TickOutcome {
        let cmd = match resolve(self.core.command(), self.snapshotter.root()) {
            Ok(cmd) => cmd,
            Err(err) => {
                error!(error = %err, "cannot resolve test command");
                return TickOutcome::DispatchFailed(err.to_string());
            }
        };

        match self.runner.run(&cmd).await {
            Ok(report) => {
                println!("{}", report.started_at);
                println!("{}", report.output);
                info!(
                    exit_code = ?report.exit_code,
                    success = report.success(),
                    "test run finished"
                );
                TickOutcome::Ran(report)
            }
            Err(err) => {
                error!(cmd = %cmd, error = %err, "test command could not be run");
                TickOutcome::DispatchFailed(err.to_string())
            }
        }
    }

    /// Poll until the process is interrupted (Ctrl-C).
    pub async fn run(self) -> Result<()> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                // Without a signal handler we simply run until killed.
                eprintln!("failed to listen for Ctrl+C: {e}");
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Poll until `shutdown` resolves.
    ///
    /// A tick in flight when `shutdown` fires is dropped: its test process is
    /// killed and its candidate snapshot discarded.
    pub async fn run_until<F>(mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        info!(interval = ?self.options.interval, "tdaemon polling loop started");
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("shutdown requested; stopping polling loop");
                    break;
                }
                res = self.sleep_then_tick() => {
                    res?;
                }
            }
        }

        Ok(())
    }

    async fn sleep_then_tick(&mut self) -> Result<TickOutcome> {
        tokio::time::sleep(self.options.interval).await;
        self.tick().await
    }
}
