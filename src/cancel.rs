//! Cooperative cancellation.
//!
//! A [`CancellationToken`] is created by the caller for one in-flight
//! operation. The caller (or any clone of the token, possibly on another
//! thread) sets it; the running driver or search only ever reads it, at the
//! checkpoints described on [`StepRun`](crate::StepRun) and
//! [`DistanceSearch`](crate::DistanceSearch). Cancellation is a request, not
//! preemption: work already inside a chunk finishes before the flag is seen.
//!
//! # Example
//!
//! ```
//! use seedstep::CancellationToken;
//!
//! let token = CancellationToken::new();
//! let handle = token.clone();
//!
//! assert!(!token.is_cancelled());
//! handle.cancel();
//! assert!(token.is_cancelled());
//! ```

use crate::sync::{Arc, AtomicBool, Ordering};

/// Shared, externally settable cancellation flag.
///
/// Clones share the same flag. Once set it stays set; a cancelled operation
/// is terminal and a new operation should get a new token.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Requests cancellation of every operation observing this token.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called on any clone.
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}
