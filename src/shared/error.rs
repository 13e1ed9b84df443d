use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow scripts to tell a complete run apart from one where
/// some target versions could not be scraped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Every target version was processed
    Success = 0,
    /// The run finished but at least one target version is incomplete
    PartialResults = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (network error, file I/O error, invalid config, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::PartialResults => write!(f, "Partial Results (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Errors raised while discovering the clients of a Maven artifact.
///
/// Variants map onto the failure classes the collector distinguishes:
/// resolution failures are tolerated per identity, fetch failures are
/// retried, everything else is reported to the user.
#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("Couldn't resolve version range for {coordinates}\nDetails: {details}")]
    Resolution {
        coordinates: String,
        details: String,
    },

    #[error("Request to {url} failed\nDetails: {details}")]
    Fetch { url: String, details: String },

    #[error("{service} returned status code {status} for {url}")]
    UnexpectedStatus {
        service: &'static str,
        status: u16,
        url: String,
    },

    #[error("Failed to read dependency descriptor of {coordinates}\nDetails: {details}")]
    Descriptor {
        coordinates: String,
        details: String,
    },

    #[error("Invalid coordinates: {input}\nReason: {reason}\n\n💡 Hint: Use the group:artifact or group:artifact:version form")]
    InvalidCoordinates { input: String, reason: String },

    #[error("Gave up on {operation} after {attempts} attempt(s)\nLast error: {last_error}")]
    RetriesExhausted {
        operation: String,
        attempts: u32,
        last_error: String,
    },

    /// Validation error for configuration and builder values
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },
}

impl CollectorError {
    /// Whether this error says the identity simply has no resolvable versions.
    pub fn is_resolution(&self) -> bool {
        matches!(self, CollectorError::Resolution { .. })
    }
}
