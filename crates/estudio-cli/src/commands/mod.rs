//! Subcommand implementations.
//!
//! Each command loads its data (a user file or the built-in generator),
//! runs the estudio library, and prints through the output helpers.

pub(crate) mod boundary;
pub(crate) mod colic;
pub(crate) mod explore;
pub(crate) mod forecast;

use crate::error::{CliError, Result};
use std::path::Path;

/// Seed for the built-in fallback datasets, so unseeded runs stay comparable.
pub(crate) const DATA_SEED: u64 = 42;

/// Check that a user-supplied data path points at a readable file.
pub(crate) fn validate_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(CliError::NotAFile(path.to_path_buf()));
    }
    Ok(())
}
