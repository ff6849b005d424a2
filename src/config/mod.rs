// src/config/mod.rs

//! Configuration loading and pre-flight checks for tdaemon.
//!
//! Responsibilities:
//! - Define the optional TOML config file model (`model.rs`).
//! - Load it from disk (`loader.rs`).
//! - Merge it with the CLI into validated [`Settings`] (`settings.rs`).
//! - Check the root and test program, and guard against oversized trees
//!   (`validate.rs`).
//! - Ask the operator for confirmation through an injectable callback
//!   (`confirm.rs`).

pub mod confirm;
pub mod loader;
pub mod model;
pub mod settings;
pub mod validate;

pub use confirm::{AssumeYes, Confirm, StdinConfirm};
pub use loader::load_from_path;
pub use model::{ConfigFile, DaemonSection, IgnoreSection};
pub use settings::Settings;
pub use validate::{check_size, confirm_custom_command, validate, validate_with};
