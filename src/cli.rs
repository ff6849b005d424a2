// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `tdaemon`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "tdaemon",
    version,
    about = "Watch a directory and re-run your tests whenever file contents change.",
    long_about = None
)]
pub struct CliArgs {
    /// Directory to watch.
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Test program to run: `nose` (or `nosetests`), `django` or `py` (for
    /// `py.test`).
    ///
    /// Default: `nose`, unless the config file sets one.
    #[arg(short = 't', long, value_name = "PROGRAM")]
    pub test_program: Option<String>,

    /// Print the added/removed/modified files before each run.
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Warn (and ask) when the watched files add up to more than this many
    /// MiB.
    ///
    /// Default: 25, unless the config file sets one.
    #[arg(short = 's', long, value_name = "MIB")]
    pub size_max: Option<u64>,

    /// Shell command to run instead of a known test program.
    ///
    /// BIG FAT WARNING: this runs a shell command on every change. Use it at
    /// your own risk.
    #[arg(short = 'c', long, value_name = "CMD")]
    pub custom_command: Option<String>,

    /// Optional TOML config file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Delay between two polls, in milliseconds.
    ///
    /// Default: 1000, unless the config file sets one.
    #[arg(long, value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Answer yes to every confirmation prompt.
    #[arg(short = 'y', long)]
    pub assume_yes: bool,

    /// Validate, snapshot once and print the plan, but don't watch or run
    /// anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TDAEMON_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
