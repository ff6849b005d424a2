// src/config/model.rs

use serde::Deserialize;

/// Optional config file, read with `--config`.
///
/// ```toml
/// [daemon]
/// test_program = "py"
/// size_max = 50
/// interval_ms = 500
/// debug = true
///
/// [ignore]
/// dirs = ["node_modules", "target"]
/// extensions = ["log"]
/// exclude = ["build/**"]
/// ```
///
/// Every key is optional. Command-line flags win over file values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub daemon: DaemonSection,

    #[serde(default)]
    pub ignore: IgnoreSection,
}

/// `[daemon]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DaemonSection {
    /// Known test-program identifier (`nose`, `nosetests`, `django`, `py`).
    #[serde(default)]
    pub test_program: Option<String>,

    /// Shell command used verbatim instead of `test_program`.
    #[serde(default)]
    pub custom_command: Option<String>,

    /// Advisory size threshold in MiB.
    #[serde(default)]
    pub size_max: Option<u64>,

    /// Polling interval in milliseconds.
    #[serde(default)]
    pub interval_ms: Option<u64>,

    #[serde(default)]
    pub debug: Option<bool>,
}

/// `[ignore]` section. Entries extend the built-in rules, never replace them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IgnoreSection {
    /// Directory base names pruned from the walk.
    #[serde(default)]
    pub dirs: Vec<String>,

    /// File extensions left out of snapshots.
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Glob patterns, relative to the watch root.
    #[serde(default)]
    pub exclude: Vec<String>,
}
