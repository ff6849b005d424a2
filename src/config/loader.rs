// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::model::ConfigFile;
use crate::errors::Result;

/// Load a config file from a given path.
///
/// This only performs TOML deserialization. Semantic checks happen when the
/// file is merged into [`Settings`](crate::config::Settings).
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let config = parse_str(&contents)?;
    debug!(path = ?path, "loaded config file");
    Ok(config)
}

/// Parse config file contents.
pub fn parse_str(contents: &str) -> Result<ConfigFile> {
    Ok(toml::from_str(contents)?)
}
