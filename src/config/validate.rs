// src/config/validate.rs

use std::path::Path;
use std::str::FromStr;

use tracing::{info, warn};

use crate::config::confirm::Confirm;
use crate::errors::{Result, TdaemonError};
use crate::exec::TestProgram;
use crate::fs::{FileSystem, RealFileSystem};

/// Pre-flight check of the watch root and the test program.
///
/// The test-program identifier is only checked when no custom command was
/// supplied, since a custom command replaces it entirely.
pub fn validate(root: &Path, test_program: &str, has_custom_command: bool) -> Result<()> {
    validate_with(&RealFileSystem, root, test_program, has_custom_command)
}

/// [`validate`] against an arbitrary filesystem.
pub fn validate_with(
    fs: &dyn FileSystem,
    root: &Path,
    test_program: &str,
    has_custom_command: bool,
) -> Result<()> {
    if !fs.is_dir(root) {
        return Err(TdaemonError::InvalidPath(root.to_path_buf()));
    }

    if !has_custom_command {
        TestProgram::from_str(test_program)?;
    }

    Ok(())
}

/// Warn about running a custom shell command on every change and ask to go on.
pub fn confirm_custom_command(command: &str, confirm: &mut dyn Confirm) -> Result<()> {
    let prompt = format!(
        "BIG FAT WARNING! You are about to run the command\n\n   $ {command}\n\n\
         Every time any file will be added/deleted/edited in your project.\n\
         You must be aware that any shell command automatically ran may \
         erase or corrupt your files.\n\
         USE VERY CAREFULLY!!!\n\
         Now that you've been warned, do you still want to go on? [y/N] "
    );

    if confirm.confirm(&prompt) {
        warn!(cmd = %command, "custom command accepted by operator");
        Ok(())
    } else {
        Err(TdaemonError::UserDeclined("Ok, bye...".to_string()))
    }
}

/// Size guard: ask before watching a tree larger than `size_max` MiB.
///
/// Advisory only. Under the threshold, or once the operator agrees, the
/// daemon carries on.
pub fn check_size(size_mib: u64, size_max: u64, confirm: &mut dyn Confirm) -> Result<()> {
    if size_mib <= size_max {
        return Ok(());
    }

    let prompt = format!(
        "It looks like the total file size ({size_mib}MiB) is larger than the `max size` \
         option ({size_max}MiB).\n\
         This may slow down the file comparison process, and thus the daemon performance.\n\
         Do you wish to continue? [y/N] "
    );

    if confirm.confirm(&prompt) {
        info!(size_mib, size_max, "oversized tree accepted by operator");
        Ok(())
    } else {
        Err(TdaemonError::UserDeclined("Ok, bye...".to_string()))
    }
}
