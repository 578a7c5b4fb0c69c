//! Error types for estudio operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for estudio operations.
///
/// Covers dimension mismatches, singular leaf fits, invalid hyperparameters,
/// unfitted models, and malformed data files.
///
/// # Examples
///
/// ```
/// use estudio::error::EstudioError;
///
/// let err = EstudioError::DimensionMismatch {
///     expected: "100x21".to_string(),
///     actual: "100x20".to_string(),
/// };
/// assert!(err.to_string().contains("dimension mismatch"));
/// ```
#[derive(Debug)]
pub enum EstudioError {
    /// Matrix/vector dimensions don't match for the operation.
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Linear system is singular (non-invertible).
    SingularMatrix {
        /// Suggested remedy
        hint: String,
    },

    /// Invalid hyperparameter value provided.
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Operation requires a fitted model.
    NotFitted {
        /// What was attempted
        what: String,
    },

    /// A data file record could not be parsed.
    InvalidRecord {
        /// 1-based line number in the file
        line: usize,
        /// What went wrong with the record
        reason: String,
    },

    /// I/O error (file not found, permission denied, etc.).
    Io(std::io::Error),

    /// Serialization/deserialization error.
    Serialization(String),

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for EstudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EstudioError::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "Matrix dimension mismatch: expected {expected}, got {actual}"
                )
            }
            EstudioError::SingularMatrix { hint } => {
                write!(f, "Singular matrix, cannot invert: {hint}")
            }
            EstudioError::InvalidHyperparameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid hyperparameter: {param} = {value}, expected {constraint}"
                )
            }
            EstudioError::NotFitted { what } => {
                write!(f, "Model not fitted: call fit() before {what}")
            }
            EstudioError::InvalidRecord { line, reason } => {
                write!(f, "Invalid record at line {line}: {reason}")
            }
            EstudioError::Io(e) => write!(f, "I/O error: {e}"),
            EstudioError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            EstudioError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for EstudioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EstudioError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for EstudioError {
    fn from(err: std::io::Error) -> Self {
        EstudioError::Io(err)
    }
}

impl From<&str> for EstudioError {
    fn from(msg: &str) -> Self {
        EstudioError::Other(msg.to_string())
    }
}

impl From<String> for EstudioError {
    fn from(msg: String) -> Self {
        EstudioError::Other(msg)
    }
}

impl EstudioError {
    /// Create a dimension mismatch error with descriptive context
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }

    /// Create an invalid record error for a data file line
    #[must_use]
    pub fn invalid_record(line: usize, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            line,
            reason: reason.into(),
        }
    }

    /// Create a not-fitted error naming the attempted operation
    #[must_use]
    pub fn not_fitted(what: &str) -> Self {
        Self::NotFitted {
            what: what.to_string(),
        }
    }

    /// Create an empty input error
    #[must_use]
    pub fn empty_input(context: &str) -> Self {
        Self::Other(format!("empty input: {context}"))
    }
}

#[allow(clippy::cmp_owned)]
impl PartialEq<&str> for EstudioError {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

#[allow(clippy::cmp_owned)]
impl PartialEq<EstudioError> for &str {
    fn eq(&self, other: &EstudioError) -> bool {
        *self == other.to_string()
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, EstudioError>;
