// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod watch;

use std::sync::Arc;

use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{
    check_size, confirm_custom_command, load_from_path, validate_with, AssumeYes, Confirm,
    Settings, StdinConfirm,
};
use crate::engine::Daemon;
use crate::errors::Result;
use crate::exec::{resolve, ShellRunner, TestCommand};
use crate::fs::{FileSystem, RealFileSystem};
use crate::watch::{Snapshot, Snapshotter};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config file + CLI merge
/// - operator confirmations
/// - pre-flight validation and the size guard
/// - the polling daemon
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let file = match &args.config {
        Some(path) => Some(load_from_path(path)?),
        None => None,
    };
    let settings = Settings::from_sources(&args, file)?;
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);

    if settings.dry_run {
        let (snapshotter, initial) = snapshot_root(fs, &settings)?;
        print_dry_run(&settings, &snapshotter, &initial)?;
        return Ok(());
    }

    let (snapshotter, initial) = if settings.assume_yes {
        prepare_blocking(fs, settings.clone(), AssumeYes).await?
    } else {
        prepare_blocking(fs, settings.clone(), StdinConfirm).await?
    };

    println!("Ready to watch file changes...");
    let daemon = Daemon::new(
        snapshotter,
        initial,
        settings.command.clone(),
        ShellRunner::new(),
        settings.daemon_options(),
    );
    daemon.run().await?;

    println!("Bye");
    Ok(())
}

/// Startup sequence up to (not including) the polling loop.
///
/// 1. Custom-command warning, when one is configured.
/// 2. Root and test-program validation.
/// 3. Baseline snapshot.
/// 4. Size guard against `settings.size_max`.
///
/// Returns the snapshotter and the baseline snapshot. A declined prompt
/// surfaces as [`TdaemonError::UserDeclined`](crate::errors::TdaemonError::UserDeclined).
pub fn prepare(
    fs: Arc<dyn FileSystem>,
    settings: &Settings,
    confirm: &mut dyn Confirm,
) -> Result<(Snapshotter, Snapshot)> {
    if let TestCommand::Custom(raw) = &settings.command {
        confirm_custom_command(raw, confirm)?;
    }

    let (snapshotter, initial) = snapshot_root(fs, settings)?;

    let size_mib = snapshotter.aggregate_size(&initial);
    debug!(size_mib, size_max = settings.size_max, "aggregate tree size");
    check_size(size_mib, settings.size_max, confirm)?;

    Ok((snapshotter, initial))
}

/// [`prepare`] on Tokio's blocking pool.
///
/// Prompts read stdin and the baseline walk hashes the whole tree, so neither
/// runs on an async worker thread.
pub async fn prepare_blocking<C>(
    fs: Arc<dyn FileSystem>,
    settings: Settings,
    mut confirm: C,
) -> Result<(Snapshotter, Snapshot)>
where
    C: Confirm + Send + 'static,
{
    tokio::task::spawn_blocking(move || prepare(fs, &settings, &mut confirm))
        .await
        .map_err(|e| anyhow::anyhow!("startup task panicked: {e}"))?
}

fn snapshot_root(fs: Arc<dyn FileSystem>, settings: &Settings) -> Result<(Snapshotter, Snapshot)> {
    validate_with(
        fs.as_ref(),
        &settings.root,
        &settings.test_program,
        settings.command.is_custom(),
    )?;

    let snapshotter = Snapshotter::new(fs, settings.root.clone(), settings.ignore.clone())?;
    let initial = snapshotter.snapshot()?;
    info!(files = initial.len(), root = ?settings.root, "initial snapshot taken");
    Ok((snapshotter, initial))
}

/// Simple dry-run output: what would be watched and what would run.
fn print_dry_run(settings: &Settings, snapshotter: &Snapshotter, initial: &Snapshot) -> Result<()> {
    let cmd = resolve(&settings.command, &settings.root)?;
    let rules = snapshotter.rules();

    println!("tdaemon dry-run");
    println!("  root = {}", settings.root.display());
    println!("  command = {cmd}");
    println!("  interval = {:?}", settings.interval);
    println!("  debug = {}", settings.debug);
    println!("  ignore.dirs = {:?}", rules.dirs());
    println!("  ignore.extensions = {:?}", rules.extensions());
    if !rules.exclude_patterns().is_empty() {
        println!("  ignore.exclude = {:?}", rules.exclude_patterns());
    }
    println!();
    println!("files watched: {}", initial.len());
    println!(
        "total size: {}MiB (max {}MiB)",
        snapshotter.aggregate_size(initial),
        settings.size_max
    );

    debug!("dry-run complete (no execution)");
    Ok(())
}
