// src/config/settings.rs

use std::path::PathBuf;
use std::time::Duration;

use crate::cli::CliArgs;
use crate::config::model::ConfigFile;
use crate::engine::{DaemonOptions, DEFAULT_POLL_INTERVAL};
use crate::errors::{Result, TdaemonError};
use crate::exec::TestCommand;
use crate::watch::IgnoreRules;

pub const DEFAULT_TEST_PROGRAM: &str = "nose";
pub const DEFAULT_SIZE_MAX_MIB: u64 = 25;

/// Everything the daemon needs, merged from the CLI and the config file.
///
/// Not yet validated against the filesystem; see
/// [`validate`](crate::config::validate).
#[derive(Debug, Clone)]
pub struct Settings {
    pub root: PathBuf,
    /// The identifier as given, kept for validation and dry-run output.
    pub test_program: String,
    pub command: TestCommand,
    pub debug: bool,
    pub size_max: u64,
    pub interval: Duration,
    pub assume_yes: bool,
    pub dry_run: bool,
    pub ignore: IgnoreRules,
}

impl Settings {
    /// Merge CLI flags over an optional config file, then apply defaults.
    pub fn from_sources(args: &CliArgs, file: Option<ConfigFile>) -> Result<Self> {
        let file = file.unwrap_or_default();
        let daemon = file.daemon;

        let test_program = args
            .test_program
            .clone()
            .or(daemon.test_program)
            .unwrap_or_else(|| DEFAULT_TEST_PROGRAM.to_string());
        let custom_command = args.custom_command.clone().or(daemon.custom_command);
        let command = TestCommand::from_options(&test_program, custom_command.as_deref());

        let interval = match args.interval_ms.or(daemon.interval_ms) {
            Some(0) => {
                return Err(TdaemonError::ConfigError(
                    "polling interval must be >= 1 ms (got 0)".to_string(),
                ));
            }
            Some(ms) => Duration::from_millis(ms),
            None => DEFAULT_POLL_INTERVAL,
        };

        let ignore = IgnoreRules::with_extra(
            &file.ignore.dirs,
            &file.ignore.extensions,
            &file.ignore.exclude,
        )
        .map_err(|e| TdaemonError::ConfigError(format!("{e:#}")))?;

        Ok(Self {
            root: args.path.clone(),
            test_program,
            command,
            debug: args.debug || daemon.debug.unwrap_or(false),
            size_max: args
                .size_max
                .or(daemon.size_max)
                .unwrap_or(DEFAULT_SIZE_MAX_MIB),
            interval,
            assume_yes: args.assume_yes,
            dry_run: args.dry_run,
            ignore,
        })
    }

    pub fn daemon_options(&self) -> DaemonOptions {
        DaemonOptions {
            interval: self.interval,
            debug: self.debug,
        }
    }
}
