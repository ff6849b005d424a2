// src/errors.rs

//! Crate-wide error aliases and helpers.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TdaemonError {
    #[error("INVALID CONFIGURATION: file path {0:?} is not a directory")]
    InvalidPath(PathBuf),

    #[error("INVALID CONFIGURATION: the test program {name} is unknown. Valid options are {valid}")]
    UnknownTestProgram { name: String, valid: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("{0}")]
    UserDeclined(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TdaemonError {
    /// True for the failures that stop the daemon before it starts watching.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            TdaemonError::InvalidPath(_)
                | TdaemonError::UnknownTestProgram { .. }
                | TdaemonError::ConfigError(_)
                | TdaemonError::TomlError(_)
        )
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, TdaemonError>;
