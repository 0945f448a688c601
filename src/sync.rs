//! Synchronization primitives, switchable to loom for model checking.
//!
//! Import shared-state types from here rather than from `std` directly so the
//! cancellation flag can be exercised under `RUSTFLAGS="--cfg loom"`:
//!
//! ```bash
//! cd loom-tests
//! RUSTFLAGS="--cfg loom" cargo test --release
//! ```

#[cfg(loom)]
pub(crate) mod inner {
    pub use loom::sync::atomic::{AtomicBool, Ordering};
    pub use loom::sync::Arc;

    /// Yield to the loom scheduler so spin loops still explore every interleaving.
    #[inline]
    pub fn yield_now() {
        loom::thread::yield_now();
    }
}

#[cfg(not(loom))]
pub(crate) mod inner {
    pub use std::sync::atomic::{AtomicBool, Ordering};
    pub use std::sync::Arc;

    /// Hands the rest of the time slice back to the OS scheduler between chunks.
    #[inline]
    pub fn yield_now() {
        std::thread::yield_now();
    }
}

pub(crate) use inner::*;
