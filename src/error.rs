//! Error types and Result aliases for stepcheck

use std::fmt;
use std::path::PathBuf;

use crate::config::ConfigError;

/// Result type alias for stepcheck operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for stepcheck
///
/// Everything here is fatal: configuration problems and transport failures
/// terminate the run with no partial results. Per-check conditions (a remote
/// command timing out, an expectation not matching) are not errors and are
/// represented in the result model instead.
#[derive(Debug)]
pub enum Error {
    // === Configuration errors ===
    /// Failed to read the validator file
    ConfigLoadFailed {
        path: PathBuf,
        reason: String,
    },

    /// Validator file did not parse as its declared format
    ConfigParseFailed {
        path: PathBuf,
        format: String,
        reason: String,
    },

    /// Validator file parsed but failed structural validation
    ConfigValidation(ConfigError),

    // === Remote execution errors ===
    /// The remote-execution API rejected a command submission
    SubmitFailed {
        target: String,
        reason: String,
    },

    /// Polling an invocation failed outside the tolerated not-yet-visible case
    PollFailed {
        invocation: String,
        reason: String,
    },

    // === I/O errors ===
    /// I/O errors
    Io(std::io::Error),

    // === Generic fallback (use sparingly) ===
    /// Generic errors (for cases not yet categorized)
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ConfigLoadFailed { path, reason } => {
                write!(f, "Failed to load validator file '{}': {}", path.display(), reason)
            }
            Error::ConfigParseFailed { path, format, reason } => {
                write!(
                    f,
                    "Failed to parse '{}' as {}: {}",
                    path.display(),
                    format,
                    reason
                )
            }
            Error::ConfigValidation(err) => {
                write!(f, "Invalid validator configuration: {}", err)
            }
            Error::SubmitFailed { target, reason } => {
                write!(f, "Failed to submit command to '{}': {}", target, reason)
            }
            Error::PollFailed { invocation, reason } => {
                write!(f, "Failed to poll invocation '{}': {}", invocation, reason)
            }
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::ConfigValidation(err)
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}

impl From<String> for Error {
    fn from(err: String) -> Self {
        Error::Other(err)
    }
}

impl From<&str> for Error {
    fn from(err: &str) -> Self {
        Error::Other(err.to_string())
    }
}
