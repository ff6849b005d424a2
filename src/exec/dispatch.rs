// src/exec/dispatch.rs

//! Resolution of the configured test program into a shell command line.
//!
//! Command lines are handed to `sh -c` as-is. A custom command is the
//! operator's own shell text and is never rewritten. The watch root is the
//! only value we substitute into a template, and it is single-quoted when it
//! contains anything outside a conservative safe set.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::errors::{Result, TdaemonError};

/// Test runners with a built-in command template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestProgram {
    /// `nose` / `nosetests`: run `nosetests` from inside the root.
    Nose,
    /// `django`: run the project's `manage.py test`.
    Django,
    /// `py`: run `py.test` against the root.
    Py,
}

impl TestProgram {
    /// Every identifier accepted on the command line, aliases included.
    pub const IDENTIFIERS: &'static [&'static str] = &["nose", "nosetests", "django", "py"];

    /// Instantiate this program's template for `root`.
    pub fn command_for(self, root: &Path) -> String {
        let root = shell_quote_path(root);
        match self {
            TestProgram::Nose => format!("cd {root} && nosetests"),
            TestProgram::Django => format!("python {root}/manage.py test"),
            TestProgram::Py => format!("py.test {root}"),
        }
    }

    pub fn valid_options() -> String {
        Self::IDENTIFIERS.join(", ")
    }
}

impl FromStr for TestProgram {
    type Err = TdaemonError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "nose" | "nosetests" => Ok(TestProgram::Nose),
            "django" => Ok(TestProgram::Django),
            "py" => Ok(TestProgram::Py),
            other => Err(TdaemonError::UnknownTestProgram {
                name: other.to_string(),
                valid: TestProgram::valid_options(),
            }),
        }
    }
}

/// What the daemon runs when the tree changes. Fixed for the daemon's
/// lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestCommand {
    /// A test-program identifier, looked up at resolve time.
    Known(String),
    /// Raw shell text supplied by the operator, used verbatim.
    Custom(String),
}

impl TestCommand {
    /// A custom command, when given, always wins over the identifier.
    pub fn from_options(test_program: &str, custom_command: Option<&str>) -> Self {
        match custom_command {
            Some(raw) => TestCommand::Custom(raw.to_string()),
            None => TestCommand::Known(test_program.to_string()),
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, TestCommand::Custom(_))
    }
}

impl fmt::Display for TestCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestCommand::Known(id) => write!(f, "test program `{id}`"),
            TestCommand::Custom(raw) => write!(f, "custom command `{raw}`"),
        }
    }
}

/// Turn a [`TestCommand`] into the command line to execute.
///
/// Fails with [`TdaemonError::UnknownTestProgram`] for an identifier outside
/// [`TestProgram::IDENTIFIERS`].
pub fn resolve(command: &TestCommand, root: &Path) -> Result<String> {
    match command {
        TestCommand::Custom(raw) => Ok(raw.clone()),
        TestCommand::Known(id) => {
            let program = TestProgram::from_str(id)?;
            Ok(program.command_for(root))
        }
    }
}

fn shell_quote_path(path: &Path) -> String {
    let s = path.to_string_lossy();
    let safe = !s.is_empty() && s.chars().all(is_shell_safe);
    if safe {
        s.into_owned()
    } else {
        format!("'{}'", s.replace('\'', r"'\''"))
    }
}

fn is_shell_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '/' | '.' | '_' | '-' | '+' | ',' | ':' | '@' | '%')
}
