// src/exec/backend.rs

//! Pluggable command runner.
//!
//! The daemon talks to a `CommandRunner` instead of spawning processes
//! itself, so tests can swap in a fake that records command lines and
//! returns scripted outcomes.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use anyhow::Context;
use chrono::{DateTime, Local};
use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::Result;

/// What one test run produced.
///
/// A failing exit status is not an error for the daemon: the report is
/// printed and watching carries on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub started_at: DateTime<Local>,
    /// `None` if the process was terminated by a signal.
    pub exit_code: Option<i32>,
    /// Stdout and stderr interleaved as the command wrote them, without the
    /// trailing newline.
    pub output: String,
}

impl RunReport {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Trait abstracting how a resolved command line is executed.
///
/// Production code uses [`ShellRunner`]; tests provide their own.
pub trait CommandRunner: Send {
    /// Run `cmd` to completion and report its output.
    fn run(&mut self, cmd: &str) -> Pin<Box<dyn Future<Output = Result<RunReport>> + Send + '_>>;
}

/// Runs commands through the platform shell and waits for them to exit.
///
/// There is no timeout: a hung test command stalls the daemon until it exits
/// or the daemon is interrupted (the child is killed on drop).
#[derive(Debug, Clone, Default)]
pub struct ShellRunner;

impl ShellRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ShellRunner {
    fn run(&mut self, cmd: &str) -> Pin<Box<dyn Future<Output = Result<RunReport>> + Send + '_>> {
        let cmd = cmd.to_string();

        Box::pin(async move {
            let started_at = Local::now();
            info!(cmd = %cmd, "running test command");

            let output = merged_output_command(&cmd)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true)
                .output()
                .await
                .with_context(|| format!("spawning test command `{cmd}`"))?;

            // The command's own stderr already went to stdout. Anything left
            // here came from the shell itself (e.g. a syntax error).
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));
            let trimmed_len = combined.trim_end_matches(['\n', '\r']).len();
            combined.truncate(trimmed_len);

            let exit_code = output.status.code();
            debug!(
                cmd = %cmd,
                exit_code = ?exit_code,
                success = output.status.success(),
                "test command exited"
            );

            Ok(RunReport {
                started_at,
                exit_code,
                output: combined,
            })
        })
    }
}

/// Shell invocation that folds the command's stderr into its stdout pipe, so
/// both streams are captured in emission order.
fn merged_output_command(cmd: &str) -> Command {
    if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(format!("({cmd}) 2>&1"));
        c
    } else {
        // The newline before `}` keeps a trailing comment in `cmd` from
        // swallowing the brace.
        let mut c = Command::new("sh");
        c.arg("-c").arg(format!("{{ {cmd}\n}} 2>&1"));
        c
    }
}
