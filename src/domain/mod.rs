//! Domain types shared across the crate.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Error type** ([`PiiError`]) returned by every fallible operation
//! - **Result type alias** ([`Result`])
//! - **Call context** ([`CallContext`]) carrying cancellation and deadlines
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, PiiError>`]:
//!
//! ```rust
//! use pii::domain::{PiiError, Result};
//!
//! fn require_prefix(value: &str) -> Result<&str> {
//!     value
//!         .strip_prefix("anonymized.")
//!         .ok_or_else(|| PiiError::InvalidFormat("missing prefix".to_string()))
//! }
//! # assert!(require_prefix("John").is_err());
//! ```

pub mod context;
pub mod errors;
pub mod result;

// Re-export commonly used types for convenience
pub use context::CallContext;
pub use errors::PiiError;
pub use result::Result;
