//! Configuration management.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Configuration files support:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for every setting
//! - `PII_*` environment variable overrides
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pii::config::load_config;
//! use pii::anonymization::RecordAnonymizer;
//!
//! # #[derive(Clone)]
//! # struct Customer { name: String }
//! # pii::anonymizable!(Customer { name: marked });
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("pii.toml")?;
//!
//! let anonymizer = RecordAnonymizer::<str, Customer>::from_config(&config.anonymization)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [anonymization]
//! strategy = "delimited"
//! prefix = "anonymized"
//! separator = "."
//!
//! [logging]
//! local_enabled = true
//! local_path = "${PII_LOG_DIR}"
//! local_rotation = "daily"
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`AnonymizationConfig`](crate::anonymization::AnonymizationConfig) - Strategy settings
//! - [`LoggingConfig`] - Logging configuration

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, parse_config};
pub use schema::{ApplicationConfig, LoggingConfig, PiiConfig};
