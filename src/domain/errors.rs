//! Domain error types
//!
//! This module defines the error type shared by the traversal engine and every
//! string anonymizer. Errors never expose third-party types.

use thiserror::Error;

/// Main PII error type
///
/// Errors returned by a [`StringAnonymizer`](crate::anonymization::StringAnonymizer)
/// are propagated by the record engine exactly as they were produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PiiError {
    /// Value handed to an inverse transform is malformed
    #[error("Invalid value: {0}")]
    InvalidFormat(String),

    /// Value was anonymized under a different key
    #[error("Invalid key: value was not anonymized with the supplied key")]
    KeyMismatch,

    /// Key cannot be encoded by the anonymizer
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Call context was cancelled
    #[error("Operation cancelled")]
    Cancelled,

    /// Call context deadline passed
    #[error("Deadline exceeded")]
    DeadlineExceeded,

    /// Failure reported by a third-party anonymizer implementation
    #[error("Transform error: {0}")]
    Transform(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl PiiError {
    /// Wraps a failure from an external anonymizer backend (KMS, HSM, vault...)
    pub fn transform(err: impl std::fmt::Display) -> Self {
        PiiError::Transform(err.to_string())
    }

    /// Whether the error came from the call context rather than the data
    pub fn is_cancellation(&self) -> bool {
        matches!(self, PiiError::Cancelled | PiiError::DeadlineExceeded)
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for PiiError {
    fn from(err: toml::de::Error) -> Self {
        PiiError::Configuration(format!("TOML parse error: {err}"))
    }
}
