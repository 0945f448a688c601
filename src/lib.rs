//! # seedstep
//!
//! Exact seed arithmetic for the 32-bit xorshift generator used by the game's
//! roll system.
//!
//! The crate answers two questions about a generator state:
//!
//! 1. Where does the generator end up after exactly `n` rolls, forward or
//!    backward? ([`StepRun`], [`run_forward`], [`run_backward`])
//! 2. How many rolls separate two states along a given direction?
//!    ([`DistanceSearch`], [`find_distance`])
//!
//! Every roll consumes two transitions of the generator. Going backward uses
//! the exact algebraic inverse of the forward transition, so any state can be
//! rewound as precisely as it can be advanced.
//!
//! Long runs are cooperative: work is split into chunks (driver) or batches
//! (search), and between two chunks the caller receives a [`Progress`] update
//! and a [`CancellationToken`] is observed. The numeric result never depends on
//! the [`ExecutionMode`], only on the seed, the roll count and the direction.
//!
//! # Example
//!
//! ```
//! use seedstep::{run_forward, CancellationToken, ExecutionMode, NoProgress, RunStatus};
//! use seedstep::xorshift::step;
//!
//! let token = CancellationToken::new();
//! let outcome = run_forward("1", 1, ExecutionMode::Fast, &token, &NoProgress)?;
//!
//! assert_eq!(outcome.status, RunStatus::Completed);
//! assert_eq!(outcome.state.get(), step(step(1)));
//! # Ok::<(), seedstep::SeedError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::fmt;
use std::str::FromStr;

pub use calc::{find_distance, run_backward, run_forward};
pub use cancel::CancellationToken;
pub use config::{DriverConfig, ExecutionMode, SearchConfig, FULL_CYCLE};
pub use driver::{RunOutcome, RunPoll, RunStatus, StepRun};
pub use error::{SeedError, SeedResult};
pub use input::{parse_roll_count, parse_seed};
pub use progress::{
    CollectingProgressObserver, NoProgress, Progress, ProgressObserver, TracingProgressObserver,
};
pub use search::{DistanceSearch, SearchOutcome, SearchPoll};
pub use xorshift::Xorshift32;

pub mod calc;
pub mod cancel;
pub mod config;
pub mod driver;
#[doc(hidden)]
pub mod error;
pub mod input;
pub mod prelude;
pub mod progress;
pub mod search;
mod sync;
#[cfg(test)]
mod test_config;
pub mod xorshift;

// #############
// #   SEED    #
// #############

/// A generator state in the range `[1, 2^32 - 1]`.
///
/// Zero is a fixed point of the xorshift transition and is therefore never a
/// valid state. Every transition maps a non-zero state to a non-zero state, so
/// once a `Seed` exists every state reached from it is also a valid `Seed`.
///
/// # Examples
///
/// ```
/// use seedstep::Seed;
///
/// assert_eq!(Seed::normalize(0).get(), 1);
/// assert_eq!(Seed::normalize(42).get(), 42);
/// assert!(Seed::new(0).is_err());
/// ```
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub struct Seed(u32);

impl Seed {
    /// The smallest valid seed. Zero input is coerced to this value.
    pub const MIN: Seed = Seed(1);

    /// The largest valid seed, `2^32 - 1`.
    pub const MAX: Seed = Seed(u32::MAX);

    /// Creates a seed, rejecting zero.
    pub fn new(value: u32) -> SeedResult<Self> {
        if value == 0 {
            return Err(SeedError::SeedOutOfRange { value });
        }
        Ok(Seed(value))
    }

    /// Creates a seed, mapping zero to [`Seed::MIN`].
    #[must_use]
    pub const fn normalize(value: u32) -> Self {
        if value == 0 {
            Self::MIN
        } else {
            Seed(value)
        }
    }

    /// Wraps a state produced by a transition of an existing seed.
    ///
    /// The transitions are bijections that fix zero, so a non-zero input
    /// never produces zero. Debug builds assert it anyway.
    #[inline]
    pub(crate) fn from_state(state: u32) -> Self {
        debug_assert_ne!(state, 0, "xorshift transition produced the zero state");
        Self::normalize(state)
    }

    /// Returns the raw state.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Seed {
    type Error = SeedError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Seed> for u32 {
    fn from(seed: Seed) -> Self {
        seed.0
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::LowerHex for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl FromStr for Seed {
    type Err = SeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_seed(s)
    }
}

// #############
// #   ROLLS   #
// #############

/// Number of rolls to apply. Each roll is two generator transitions.
///
/// The count is capped at `u64::MAX / 2` so the transition total always fits
/// in a `u64`.
#[derive(
    Debug,
    Copy,
    Clone,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(try_from = "u64", into = "u64")]
pub struct RollCount(u64);

impl RollCount {
    /// Transitions consumed by a single roll.
    pub const TRANSITIONS_PER_ROLL: u64 = 2;

    /// Largest accepted roll count.
    pub const MAX: RollCount = RollCount(u64::MAX / Self::TRANSITIONS_PER_ROLL);

    /// Zero rolls; running it leaves the seed unchanged.
    pub const ZERO: RollCount = RollCount(0);

    /// Creates a roll count, rejecting values whose transition total overflows.
    pub fn new(rolls: u64) -> SeedResult<Self> {
        if rolls > Self::MAX.0 {
            return Err(SeedError::RollCountTooLarge {
                value: rolls.to_string(),
                max: Self::MAX.0,
            });
        }
        Ok(RollCount(rolls))
    }

    /// Creates a roll count from a signed integer, rejecting negatives.
    pub fn from_signed(rolls: i64) -> SeedResult<Self> {
        match u64::try_from(rolls) {
            Ok(rolls) => Self::new(rolls),
            Err(_) => Err(SeedError::NegativeRollCount {
                value: rolls.to_string(),
            }),
        }
    }

    /// Returns the number of rolls.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the number of generator transitions, `2n`.
    #[inline]
    #[must_use]
    pub const fn transitions(self) -> u64 {
        self.0 * Self::TRANSITIONS_PER_ROLL
    }
}

impl TryFrom<u64> for RollCount {
    type Error = SeedError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RollCount> for u64 {
    fn from(rolls: RollCount) -> Self {
        rolls.0
    }
}

impl fmt::Display for RollCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RollCount {
    type Err = SeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_roll_count(s)
    }
}

// #############
// # DIRECTION #
// #############

/// Which transition a run or search applies.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Apply [`xorshift::step`].
    #[default]
    Forward,
    /// Apply [`xorshift::unstep`].
    Backward,
}

impl Direction {
    /// Applies one transition in this direction.
    #[inline]
    #[must_use]
    pub const fn apply(self, state: u32) -> u32 {
        match self {
            Self::Forward => xorshift::step(state),
            Self::Backward => xorshift::unstep(state),
        }
    }

    /// Returns the opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }

    /// Returns a lowercase label suitable for logs and config files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = SeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forward" => Ok(Self::Forward),
            "backward" | "back" => Ok(Self::Backward),
            _ => Err(SeedError::UnknownDirection {
                input: s.to_owned(),
            }),
        }
    }
}
