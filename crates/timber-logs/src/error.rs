//! Error types for the logging core.

use thiserror::Error;

/// Errors that can occur in the logging core.
#[derive(Debug, Error)]
pub enum LogError {
    /// A filter rule pattern failed to compile.
    #[error("invalid filter pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// The offending pattern text.
        pattern: String,
        /// The underlying regular-expression error.
        #[source]
        source: regex::Error,
    },

    /// The configured level set is empty or contains duplicate ranks.
    #[error("invalid level set: {0}")]
    InvalidLevels(String),

    /// A level name that is absent from the configured set.
    #[error("unknown level: {0}")]
    UnknownLevel(String),

    /// An I/O error occurred while writing, rotating, or scanning.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A sink failure raised while the exit-on-error policy is active.
    ///
    /// The hosting process is expected to treat this as unrecoverable.
    #[error("fatal sink failure: {0}")]
    Fatal(#[source] Box<LogError>),
}

/// Result type alias for logging operations.
pub type Result<T> = std::result::Result<T, LogError>;
