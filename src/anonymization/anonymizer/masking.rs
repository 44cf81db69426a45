//! Masking anonymization strategy

use super::StringAnonymizer;
use crate::domain::{CallContext, Result};

/// Default mask
pub const DEFAULT_MASK: &str = "***";

/// Masking strategy - replaces every value with a fixed mask
///
/// The original value is lost. Deanonymizing returns its input unchanged, so
/// a masked field deanonymizes to the mask itself. Useful for keeping
/// sensitive values out of logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskingAnonymizer {
    mask: String,
}

impl MaskingAnonymizer {
    /// Create a masking strategy
    pub fn new(mask: impl Into<String>) -> Self {
        Self { mask: mask.into() }
    }

    /// The mask written to every marked field
    pub fn mask(&self) -> &str {
        &self.mask
    }
}

impl Default for MaskingAnonymizer {
    fn default() -> Self {
        Self::new(DEFAULT_MASK)
    }
}

impl<K: ?Sized> StringAnonymizer<K> for MaskingAnonymizer {
    fn anonymize_string(&self, _ctx: &CallContext, _key: &K, _value: &str) -> Result<String> {
        Ok(self.mask.clone())
    }

    fn deanonymize_string(&self, _ctx: &CallContext, _key: &K, value: &str) -> Result<String> {
        Ok(value.to_string())
    }
}
