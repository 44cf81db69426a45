// PII - Reversible anonymization of structured records
// Copyright (c) 2025 PII Contributors
// Licensed under the MIT License

//! # PII - Reversible anonymization of structured records
//!
//! PII transforms the sensitive string fields of caller-defined records. Values
//! can be anonymized and later recovered under the same key (for example a
//! tenant or subject identifier), or masked irreversibly for safe logging.
//!
//! ## Overview
//!
//! This library provides:
//! - **Marking** protected fields on record types with [`anonymizable!`]
//! - **Transforming** whole records with [`RecordAnonymizer`](anonymization::RecordAnonymizer)
//! - **Plugging in** any string transform through [`StringAnonymizer`](anonymization::StringAnonymizer)
//! - **Reporting** which fields a call rewrote, for caller-side audit trails
//!
//! ## Architecture
//!
//! - [`anonymization`] - Field marking, string anonymizers, traversal engine
//! - [`domain`] - Error type, result alias and call context
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust
//! use pii::anonymizable;
//! use pii::anonymization::{DelimitedAnonymizer, RecordAnonymizer};
//! use pii::domain::CallContext;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Customer {
//!     first_name: String,
//!     last_name: String,
//!     company: String,
//! }
//!
//! anonymizable!(Customer {
//!     first_name: marked,
//!     last_name: marked,
//! });
//!
//! # fn main() -> pii::domain::Result<()> {
//! let anonymizer = RecordAnonymizer::<str, Customer>::new(DelimitedAnonymizer::new());
//! let ctx = CallContext::background();
//!
//! let customer = Customer {
//!     first_name: "John".to_string(),
//!     last_name: "Doe".to_string(),
//!     company: "Acme".to_string(),
//! };
//!
//! let stored = anonymizer.anonymize(&ctx, "tenant-42", &customer)?;
//! assert_eq!(stored.last_name, "anonymized.tenant-42.Doe");
//!
//! let restored = anonymizer.deanonymize(&ctx, "tenant-42", &stored)?;
//! assert_eq!(restored, customer);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::Result`]. Errors from a string
//! anonymizer abort the traversal and reach the caller unchanged; a partially
//! transformed record is never returned.
//!
//! ## Logging
//!
//! The engine emits `tracing` events with record types and field paths only:
//!
//! ```rust,no_run
//! use pii::config::LoggingConfig;
//! use pii::logging::init_logging;
//!
//! let _guard = init_logging("debug", &LoggingConfig::default()).unwrap();
//! ```

pub mod anonymization;
pub mod config;
pub mod domain;
pub mod logging;
