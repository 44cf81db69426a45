//! Result type alias for PII operations

use super::errors::PiiError;

/// Result type alias for PII operations
///
/// # Examples
///
/// ```
/// use pii::domain::result::Result;
/// use pii::domain::errors::PiiError;
///
/// fn decode(value: &str) -> Result<String> {
///     if value.is_empty() {
///         return Err(PiiError::InvalidFormat("empty value".to_string()));
///     }
///     Ok(value.to_string())
/// }
/// # assert!(decode("").is_err());
/// ```
pub type Result<T> = std::result::Result<T, PiiError>;
