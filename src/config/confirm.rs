// src/config/confirm.rs

//! Operator confirmation, abstracted so startup checks can run in tests.

use std::io::{self, BufRead, Write};

/// Ask the operator a yes/no question.
///
/// Any `FnMut(&str) -> bool` closure is a `Confirm`, which is what tests
/// usually pass.
pub trait Confirm {
    /// Show `prompt` and return true only on an explicit yes.
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Prompts on stdout and reads one line from stdin.
///
/// Anything not starting with `y` (case-insensitive), including EOF or a
/// read error, is a no.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        print!("{prompt}");
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => answer.trim_start().to_lowercase().starts_with('y'),
            Err(_) => false,
        }
    }
}

/// Says yes to everything (`--assume-yes`).
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}
