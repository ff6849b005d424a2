use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use chrono::Local;
use tdaemon::errors::Result;
use tdaemon::exec::{CommandRunner, RunReport};

/// A fake command runner that:
/// - records every command line it is asked to run
/// - answers with scripted exit codes (default: success), without spawning
///   anything.
#[derive(Debug, Clone, Default)]
pub struct FakeRunner {
    executed: Arc<Mutex<Vec<String>>>,
    exit_codes: Arc<Mutex<VecDeque<i32>>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue exit codes for the next runs, in order. Once exhausted, runs
    /// succeed.
    pub fn with_exit_codes(self, codes: impl IntoIterator<Item = i32>) -> Self {
        self.exit_codes.lock().unwrap().extend(codes);
        self
    }

    /// Shared handle on the recorded command lines.
    pub fn executed(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.executed)
    }

    pub fn run_count(&self) -> usize {
        self.executed.lock().unwrap().len()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&mut self, cmd: &str) -> Pin<Box<dyn Future<Output = Result<RunReport>> + Send + '_>> {
        let cmd = cmd.to_string();
        let executed = Arc::clone(&self.executed);
        let exit_codes = Arc::clone(&self.exit_codes);

        Box::pin(async move {
            executed.lock().unwrap().push(cmd.clone());
            let code = exit_codes.lock().unwrap().pop_front().unwrap_or(0);

            Ok(RunReport {
                started_at: Local::now(),
                exit_code: Some(code),
                output: format!("fake run of `{cmd}` exited with {code}"),
            })
        })
    }
}
