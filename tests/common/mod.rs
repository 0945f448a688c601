//! Common test infrastructure shared across integration tests.
//!
//! # Usage
//!
//! From any integration test file:
//! ```ignore
//! #[path = "common/mod.rs"]
//! mod common;
//! use common::{init_tracing, reference_rolls, CancelAfter};
//! ```

#![allow(dead_code)] // Each integration crate only uses part of this module.

use seedstep::xorshift::{step, unstep};
use seedstep::{CancellationToken, Direction, Progress, ProgressObserver};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Once;

/// Golden forward sequence starting at 5, one entry per transition.
pub const STEPS_FROM_FIVE: [u32; 6] = [
    1342316549, 1358989828, 1431448100, 1090593327, 486699149, 2945579268,
];

/// Routes library logs to the test output. Safe to call from every test.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

/// Plain loop applying `2 * rolls` transitions, for comparing against the
/// chunked driver.
pub fn reference_rolls(seed: u32, rolls: u64, direction: Direction) -> u32 {
    let mut state = seed;
    for _ in 0..rolls * 2 {
        state = match direction {
            Direction::Forward => step(state),
            Direction::Backward => unstep(state),
        };
    }
    state
}

/// Walks forward `rolls` rolls from `seed` and returns the state reached.
pub fn rolls_ahead(seed: u32, rolls: u64) -> u32 {
    reference_rolls(seed, rolls, Direction::Forward)
}

/// Observer that cancels a token once it has seen `limit` updates.
pub struct CancelAfter {
    token: CancellationToken,
    limit: usize,
    seen: AtomicUsize,
}

impl CancelAfter {
    pub fn new(token: CancellationToken, limit: usize) -> Self {
        Self {
            token,
            limit,
            seen: AtomicUsize::new(0),
        }
    }

    pub fn seen(&self) -> usize {
        self.seen.load(Ordering::SeqCst)
    }
}

impl ProgressObserver for CancelAfter {
    fn on_progress(&self, _progress: Progress) {
        if self.seen.fetch_add(1, Ordering::SeqCst) + 1 >= self.limit {
            self.token.cancel();
        }
    }
}
