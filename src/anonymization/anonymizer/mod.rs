//! String anonymizer module
//!
//! Provides the capability the record engine calls for every marked field,
//! plus the built-in implementations.

pub mod delimited;
pub mod masking;

use crate::anonymization::config::{AnonymizationConfig, AnonymizationStrategy};
use crate::domain::{CallContext, Result};
use std::fmt::Display;
use std::sync::Arc;

pub use delimited::DelimitedAnonymizer;
pub use masking::MaskingAnonymizer;

/// Anonymizes and deanonymizes single string values under a key
///
/// `K` is the key type, e.g. a tenant or subject identifier. Implementations
/// are expected, but not required, to make the two operations inverses for a
/// fixed key: `deanonymize_string(k, anonymize_string(k, v)) == v`.
pub trait StringAnonymizer<K: ?Sized>: Send + Sync {
    /// Transform a plaintext value
    fn anonymize_string(&self, ctx: &CallContext, key: &K, value: &str) -> Result<String>;

    /// Recover a value produced by [`anonymize_string`](Self::anonymize_string)
    fn deanonymize_string(&self, ctx: &CallContext, key: &K, value: &str) -> Result<String>;
}

/// Shared, type-erased string anonymizer
pub type SharedStringAnonymizer<K> = Arc<dyn StringAnonymizer<K>>;

/// Build the string anonymizer selected by `config.strategy`
///
/// # Errors
///
/// Returns [`PiiError::Configuration`](crate::domain::PiiError::Configuration)
/// if the delimited prefix and separator cannot be decoded.
pub fn build_string_anonymizer<K>(
    config: &AnonymizationConfig,
) -> Result<SharedStringAnonymizer<K>>
where
    K: Display + ?Sized + 'static,
{
    let anonymizer: SharedStringAnonymizer<K> = match config.strategy {
        AnonymizationStrategy::Delimited => Arc::new(DelimitedAnonymizer::try_new(
            config.prefix.clone(),
            config.separator.clone(),
        )?),
        AnonymizationStrategy::Masking => Arc::new(MaskingAnonymizer::new(config.mask.clone())),
    };
    Ok(anonymizer)
}
