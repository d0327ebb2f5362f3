// Domain errors - Error types for the domain layer

use thiserror::Error;

/// Domain-specific error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Trim bounds are reversed or empty
    #[error("invalid trim range: start ({start}) must be before end ({end})")]
    InvalidTrimRange { start: String, end: String },

    /// Trim bound falls outside the source
    #[error("trim bound {bound} exceeds source duration {duration}")]
    TrimOutOfBounds { bound: String, duration: String },

    /// Codec is not in the target container's allowed set
    #[error("codec {codec} is not supported by the {format} container")]
    UnsupportedCodec { codec: String, format: String },

    /// Subtracting durations would go below zero
    #[error("duration subtraction would be negative")]
    NegativeDuration,

    /// Timestamp string could not be parsed
    #[error("invalid timestamp: {0}. Expected HH:MM:SS, MM:SS, or seconds")]
    InvalidTimestamp(String),

    /// Unknown container format name
    #[error("unknown container format: {0}")]
    UnknownFormat(String),

    /// Unknown codec name
    #[error("unknown codec: {0}")]
    UnknownCodec(String),

    /// Operation requires a loaded source
    #[error("no source media loaded")]
    NoSource,
}
