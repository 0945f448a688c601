//! The xorshift32 transition used by the game, and its exact inverse.
//!
//! # Forward transition
//!
//! Marsaglia's xorshift with the shift triple `(13, 17, 15)`:
//!
//! ```text
//! x ^= x << 13
//! x ^= x >> 17
//! x ^= x << 15
//! ```
//!
//! Every operation is on `u32`, so bits shifted past position 31 are dropped
//! exactly as a 32-bit register would drop them. The triple has full period:
//! every non-zero state lies on a single cycle of length `2^32 - 1`, and zero
//! maps to itself.
//!
//! # Inverse transition
//!
//! Each `x ^= x << k` is undone by xoring in every multiple of `k` below 32
//! (`x ^= x << k; x ^= x << 2k; ...`), and likewise for right shifts. Undoing
//! the three forward operations in reverse order gives:
//!
//! ```text
//! x ^= x << 15; x ^= x << 30    // undo  x ^= x << 15
//! x ^= x >> 17                  // undo  x ^= x >> 17 (34 >= 32)
//! x ^= x << 13; x ^= x << 26    // undo  x ^= x << 13 (39 >= 32)
//! ```
//!
//! # Usage
//!
//! ```rust
//! use seedstep::xorshift::{step, unstep, Xorshift32};
//! use seedstep::Seed;
//!
//! assert_eq!(unstep(step(12345)), 12345);
//!
//! let mut rng = Xorshift32::new(Seed::normalize(1));
//! let after_roll = rng.roll();
//! assert_eq!(after_roll, step(step(1)));
//! assert_eq!(rng.unroll(), 1);
//! ```

use crate::{Direction, RollCount, Seed};

/// Applies one forward transition.
#[inline]
#[must_use]
pub const fn step(mut x: u32) -> u32 {
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 15;
    x
}

/// Applies one backward transition, the exact inverse of [`step`].
#[inline]
#[must_use]
pub const fn unstep(mut x: u32) -> u32 {
    x ^= x << 15;
    x ^= x << 30;
    x ^= x >> 17;
    x ^= x << 13;
    x ^= x << 26;
    x
}

/// Applies `transitions` transitions in `direction` with a plain loop.
///
/// This is the straightforward definition the cooperative driver must agree
/// with. It never yields and cannot be cancelled.
#[must_use]
pub fn apply_transitions(mut state: u32, transitions: u64, direction: Direction) -> u32 {
    for _ in 0..transitions {
        state = direction.apply(state);
    }
    state
}

/// Stateful view of the game's generator.
///
/// Holds the current state and moves it one transition ([`next_u32`],
/// [`prev_u32`]) or one roll ([`roll`], [`unroll`]) at a time. The state
/// starts from a [`Seed`] and therefore never becomes zero.
///
/// [`next_u32`]: Xorshift32::next_u32
/// [`prev_u32`]: Xorshift32::prev_u32
/// [`roll`]: Xorshift32::roll
/// [`unroll`]: Xorshift32::unroll
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    /// Creates a generator positioned at `seed`.
    #[must_use]
    pub const fn new(seed: Seed) -> Self {
        Self { state: seed.get() }
    }

    /// Returns the current state.
    #[must_use]
    pub fn seed(&self) -> Seed {
        Seed::from_state(self.state)
    }

    /// Advances one transition and returns the new state.
    #[inline]
    #[must_use = "the generator has already advanced; ignoring the value loses it"]
    pub fn next_u32(&mut self) -> u32 {
        self.state = step(self.state);
        self.state
    }

    /// Rewinds one transition and returns the new state.
    #[inline]
    #[must_use = "the generator has already rewound; ignoring the value loses it"]
    pub fn prev_u32(&mut self) -> u32 {
        self.state = unstep(self.state);
        self.state
    }

    /// Consumes one roll (two transitions) and returns the new state.
    #[inline]
    pub fn roll(&mut self) -> u32 {
        self.state = step(step(self.state));
        self.state
    }

    /// Gives back one roll (two inverse transitions) and returns the new state.
    #[inline]
    pub fn unroll(&mut self) -> u32 {
        self.state = unstep(unstep(self.state));
        self.state
    }

    /// Advances by `rolls` rolls.
    pub fn advance(&mut self, rolls: RollCount) {
        self.state = apply_transitions(self.state, rolls.transitions(), Direction::Forward);
    }

    /// Rewinds by `rolls` rolls.
    pub fn rewind(&mut self, rolls: RollCount) {
        self.state = apply_transitions(self.state, rolls.transitions(), Direction::Backward);
    }
}
