//! Delimited (reversible) anonymization strategy

use super::StringAnonymizer;
use crate::domain::{CallContext, PiiError, Result};
use std::fmt::Display;

/// Default prefix of encoded values
pub const DEFAULT_PREFIX: &str = "anonymized";

/// Default separator between prefix, key and value
pub const DEFAULT_SEPARATOR: &str = ".";

/// Check that values encoded with `prefix` and `separator` can be decoded
///
/// The separator must be non-empty and the prefix non-empty and free of the
/// separator, otherwise decoding would split inside the prefix.
pub fn validate_layout(prefix: &str, separator: &str) -> Result<()> {
    if separator.is_empty() {
        return Err(PiiError::Configuration(
            "separator must not be empty".to_string(),
        ));
    }
    if prefix.is_empty() {
        return Err(PiiError::Configuration("prefix must not be empty".to_string()));
    }
    if prefix.contains(separator) {
        return Err(PiiError::Configuration(format!(
            "prefix '{prefix}' must not contain the separator '{separator}'"
        )));
    }
    Ok(())
}

/// Delimited strategy - encodes values as `<prefix>.<key>.<value>`
///
/// Deanonymizing checks the prefix and that the embedded key equals the
/// supplied one. The value segment may itself contain the separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimitedAnonymizer {
    prefix: String,
    separator: String,
}

impl DelimitedAnonymizer {
    /// Create a delimited anonymizer with the default prefix and separator
    pub fn new() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    /// Create a delimited anonymizer with a custom prefix and separator
    ///
    /// # Errors
    ///
    /// Returns [`PiiError::Configuration`] if the pair would produce values
    /// that cannot be decoded (see [`validate_layout`]).
    pub fn try_new(prefix: impl Into<String>, separator: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        let separator = separator.into();
        validate_layout(&prefix, &separator)?;
        Ok(Self { prefix, separator })
    }

    fn encode_key<K: Display + ?Sized>(&self, key: &K) -> Result<String> {
        let key = key.to_string();
        if key.contains(self.separator.as_str()) {
            return Err(PiiError::InvalidKey(format!(
                "key must not contain the separator '{}'",
                self.separator
            )));
        }
        Ok(key)
    }
}

impl Default for DelimitedAnonymizer {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Display + ?Sized> StringAnonymizer<K> for DelimitedAnonymizer {
    fn anonymize_string(&self, ctx: &CallContext, key: &K, value: &str) -> Result<String> {
        ctx.check()?;
        let key = self.encode_key(key)?;
        Ok(format!(
            "{prefix}{sep}{key}{sep}{value}",
            prefix = self.prefix,
            sep = self.separator
        ))
    }

    fn deanonymize_string(&self, ctx: &CallContext, key: &K, value: &str) -> Result<String> {
        ctx.check()?;

        let parts: Vec<&str> = value.splitn(3, self.separator.as_str()).collect();
        if parts.len() != 3 {
            return Err(PiiError::InvalidFormat(format!(
                "expected 3 segments, found {}",
                parts.len()
            )));
        }
        if parts[0] != self.prefix {
            return Err(PiiError::InvalidFormat(format!(
                "missing '{}' prefix",
                self.prefix
            )));
        }
        if parts[1] != key.to_string() {
            return Err(PiiError::KeyMismatch);
        }

        Ok(parts[2].to_string())
    }
}
