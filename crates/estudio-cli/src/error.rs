//! Error types for the estudio CLI.

use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Result type alias for CLI operations
pub(crate) type Result<T> = std::result::Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug)]
pub(crate) enum CliError {
    /// Data file not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Not a file (e.g., directory)
    #[error("Not a file: {0}")]
    NotAFile(PathBuf),

    /// Bad argument value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Library error
    #[error("Estudio error: {0}")]
    Estudio(String),
}

impl CliError {
    /// Get exit code for this error
    pub(crate) fn exit_code(&self) -> ExitCode {
        match self {
            Self::FileNotFound(_) | Self::NotAFile(_) => ExitCode::from(3),
            Self::InvalidArgument(_) => ExitCode::from(4),
            Self::Io(_) => ExitCode::from(7),
            Self::Estudio(_) => ExitCode::from(1),
        }
    }
}

impl From<estudio::EstudioError> for CliError {
    fn from(e: estudio::EstudioError) -> Self {
        Self::Estudio(e.to_string())
    }
}

// The primitives report shape problems as plain &str messages.
impl From<&str> for CliError {
    fn from(msg: &str) -> Self {
        Self::Estudio(msg.to_string())
    }
}
