//! Unified error types for cert-renewer
//!
//! Every failure is terminal for the run: the process logs the error and
//! exits nonzero. Nothing here is retried internally; re-running the whole
//! tool on the next scheduler tick is the retry mechanism.

use thiserror::Error;

/// Main error type for cert-renewer operations
#[derive(Error, Debug)]
pub enum RenewerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read certificate {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("No CERTIFICATE block found in {path}: {message}")]
    Decode { path: String, message: String },

    #[error("Failed to parse certificate {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Authority operation '{operation}' failed: {stderr}")]
    Authority {
        operation: &'static str,
        stderr: String,
    },

    #[error("Authority operation '{operation}' timed out after {seconds}s")]
    AuthorityTimeout {
        operation: &'static str,
        seconds: u64,
    },

    #[error("Filesystem error: {message}")]
    Filesystem { message: String },
}

impl From<std::io::Error> for RenewerError {
    fn from(err: std::io::Error) -> Self {
        RenewerError::Filesystem {
            message: err.to_string(),
        }
    }
}

/// Result type alias using RenewerError
pub type Result<T> = std::result::Result<T, RenewerError>;
