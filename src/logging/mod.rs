//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels
//! - Local JSON file logging with rotation
//! - Logging macros used by the anonymization engine
//!
//! Logged events carry field paths, record types and error messages. Field
//! values and keys are never logged.
//!
//! # Example
//!
//! ```no_run
//! use pii::logging::init_logging;
//! use pii::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_from_config, init_logging, LoggingGuard};

/// Log a completed record transformation
///
/// # Example
///
/// ```no_run
/// use pii::log_record_transformed;
/// use pii::anonymization::Direction;
///
/// log_record_transformed!("app::Customer", Direction::Anonymize, 3);
/// ```
#[macro_export]
macro_rules! log_record_transformed {
    ($record_type:expr, $direction:expr, $fields:expr) => {
        tracing::debug!(
            record_type = $record_type,
            direction = %$direction,
            fields = $fields,
            "Record transformed"
        );
    };
}

/// Log a field whose transformation failed
///
/// # Example
///
/// ```no_run
/// use pii::log_transform_failure;
/// use pii::anonymization::Direction;
/// use pii::domain::PiiError;
///
/// let error = PiiError::KeyMismatch;
/// log_transform_failure!("contact.email", Direction::Deanonymize, &error);
/// ```
#[macro_export]
macro_rules! log_transform_failure {
    ($field_path:expr, $direction:expr, $error:expr) => {
        tracing::warn!(
            field = %$field_path,
            direction = %$direction,
            error = %$error,
            "Field transformation failed"
        );
    };
}
