//! Anonymization module
//!
//! This module transforms the protected string fields of structured records,
//! either reversibly (anonymize, later deanonymize under the same key) or
//! irreversibly (masking for safe logging).
//!
//! # Architecture
//!
//! - **Marking**: record types declare protected fields with [`anonymizable!`](crate::anonymizable)
//! - **String anonymizers**: the [`StringAnonymizer`] capability and built-in strategies
//! - **Engine**: [`RecordAnonymizer`] copies a record and applies the capability to every marked field
//! - **Field reports**: [`RecordAnonymizer::apply`] returns the paths of rewritten fields
//!
//! # Usage
//!
//! ```rust
//! use pii::anonymizable;
//! use pii::anonymization::{MaskingAnonymizer, RecordAnonymizer};
//! use pii::domain::CallContext;
//!
//! #[derive(Debug, Clone)]
//! struct LoginAttempt {
//!     username: String,
//!     outcome: String,
//! }
//!
//! anonymizable!(LoginAttempt { username: marked });
//!
//! let masker = RecordAnonymizer::<str, LoginAttempt>::new(MaskingAnonymizer::default());
//! let attempt = LoginAttempt {
//!     username: "jdoe".to_string(),
//!     outcome: "denied".to_string(),
//! };
//!
//! let safe = masker.anonymize(&CallContext::background(), "", &attempt).unwrap();
//! assert_eq!(safe.username, "***");
//! assert_eq!(safe.outcome, "denied");
//! ```

pub mod anonymizer;
pub mod config;
pub mod engine;
pub mod record;

// Re-export main types
pub use anonymizer::{
    build_string_anonymizer, DelimitedAnonymizer, MaskingAnonymizer, SharedStringAnonymizer,
    StringAnonymizer,
};
pub use config::{AnonymizationConfig, AnonymizationStrategy};
pub use engine::{Direction, RecordAnonymizer, Transformed};
pub use record::{Anonymizable, FieldVisitor};
