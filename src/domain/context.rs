//! Call context carrying cancellation and deadlines
//!
//! Every anonymize/deanonymize call receives a [`CallContext`]. The record
//! engine hands it to the string anonymizer untouched; anonymizers that do
//! blocking work (network, crypto) are expected to call [`CallContext::check`]
//! before doing it.
//!
//! # Examples
//!
//! ```rust
//! use pii::domain::{CallContext, PiiError};
//! use std::time::Duration;
//!
//! let ctx = CallContext::background().with_timeout(Duration::from_secs(5));
//! assert!(ctx.check().is_ok());
//!
//! ctx.cancel();
//! assert_eq!(ctx.check(), Err(PiiError::Cancelled));
//! ```

use crate::domain::errors::PiiError;
use crate::domain::result::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cancellation-bearing context for a single call
///
/// Clones and derived contexts share one cancellation flag, so cancelling any
/// of them cancels all of them.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CallContext {
    /// Context that is never cancelled and has no deadline
    pub fn background() -> Self {
        Self::default()
    }

    /// Derive a context that expires at `deadline`
    ///
    /// If this context already has an earlier deadline, that one is kept.
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        let deadline = match self.deadline {
            Some(existing) if existing < deadline => existing,
            _ => deadline,
        };

        Self {
            cancelled: Arc::clone(&self.cancelled),
            deadline: Some(deadline),
        }
    }

    /// Derive a context that expires after `timeout`
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Cancel this context and every context sharing its flag
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether [`cancel`](Self::cancel) has been called
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Deadline, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fails with [`PiiError::Cancelled`] or [`PiiError::DeadlineExceeded`]
    /// when the call should stop
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(PiiError::Cancelled);
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(PiiError::DeadlineExceeded);
            }
        }
        Ok(())
    }
}
