//! Anonymization configuration

use crate::anonymization::anonymizer::{delimited, masking};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Anonymization strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnonymizationStrategy {
    /// Reversible `<prefix>.<key>.<value>` encoding
    Delimited,
    /// Replace every value with a fixed mask (not reversible)
    #[default]
    Masking,
}

/// Anonymization configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnonymizationConfig {
    /// String anonymizer to bind
    #[serde(default)]
    pub strategy: AnonymizationStrategy,

    /// Mask written by the masking strategy
    #[serde(default = "default_mask")]
    pub mask: String,

    /// Prefix of delimited values
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Separator of delimited values
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_mask() -> String {
    masking::DEFAULT_MASK.to_string()
}

fn default_prefix() -> String {
    delimited::DEFAULT_PREFIX.to_string()
}

fn default_separator() -> String {
    delimited::DEFAULT_SEPARATOR.to_string()
}

impl Default for AnonymizationConfig {
    fn default() -> Self {
        Self {
            strategy: AnonymizationStrategy::default(),
            mask: default_mask(),
            prefix: default_prefix(),
            separator: default_separator(),
        }
    }
}

impl AnonymizationConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        match self.strategy {
            AnonymizationStrategy::Delimited => {
                delimited::validate_layout(&self.prefix, &self.separator)
                    .context("Invalid delimited layout")?;
            }
            AnonymizationStrategy::Masking => {
                if self.mask.is_empty() {
                    anyhow::bail!("Mask must not be empty for the masking strategy");
                }
            }
        }
        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("PII_ANONYMIZATION_STRATEGY") {
            self.strategy = match val.to_lowercase().as_str() {
                "delimited" => AnonymizationStrategy::Delimited,
                "masking" => AnonymizationStrategy::Masking,
                _ => anyhow::bail!("Invalid PII_ANONYMIZATION_STRATEGY: {}", val),
            };
        }

        if let Ok(val) = std::env::var("PII_ANONYMIZATION_MASK") {
            self.mask = val;
        }

        if let Ok(val) = std::env::var("PII_ANONYMIZATION_PREFIX") {
            self.prefix = val;
        }

        if let Ok(val) = std::env::var("PII_ANONYMIZATION_SEPARATOR") {
            self.separator = val;
        }

        Ok(())
    }
}
