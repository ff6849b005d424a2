use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tdaemon::cli::CliArgs;
use tdaemon::config::Confirm;

/// Builder for `CliArgs` to simplify test setup without going through clap.
pub struct CliArgsBuilder {
    args: CliArgs,
}

impl CliArgsBuilder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            args: CliArgs {
                path: path.into(),
                test_program: None,
                debug: false,
                size_max: None,
                custom_command: None,
                config: None,
                interval_ms: None,
                assume_yes: false,
                dry_run: false,
                log_level: None,
            },
        }
    }

    pub fn test_program(mut self, id: &str) -> Self {
        self.args.test_program = Some(id.to_string());
        self
    }

    pub fn custom_command(mut self, cmd: &str) -> Self {
        self.args.custom_command = Some(cmd.to_string());
        self
    }

    pub fn debug(mut self, val: bool) -> Self {
        self.args.debug = val;
        self
    }

    pub fn size_max(mut self, mib: u64) -> Self {
        self.args.size_max = Some(mib);
        self
    }

    pub fn interval_ms(mut self, ms: u64) -> Self {
        self.args.interval_ms = Some(ms);
        self
    }

    pub fn dry_run(mut self, val: bool) -> Self {
        self.args.dry_run = val;
        self
    }

    pub fn config(mut self, path: impl Into<PathBuf>) -> Self {
        self.args.config = Some(path.into());
        self
    }

    pub fn build(self) -> CliArgs {
        self.args
    }
}

/// A `Confirm` that replays scripted answers and records every prompt.
///
/// Runs out of answers → answers no.
#[derive(Debug, Clone, Default)]
pub struct ScriptedConfirm {
    answers: Vec<bool>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedConfirm {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        let mut answers: Vec<bool> = answers.into_iter().collect();
        answers.reverse();
        Self {
            answers,
            prompts: Arc::default(),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answers.pop().unwrap_or(false)
    }
}
