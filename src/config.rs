//! Execution modes and run configuration.
//!
//! | Type | Purpose | Presets |
//! |------|---------|---------|
//! | [`ExecutionMode`] | Chunking policy: responsiveness vs. throughput | `Fast`, `Normal`, `Precise` |
//! | [`DriverConfig`] | Direction and mode for a fixed-length run | `forward()`, `backward()` |
//! | [`SearchConfig`] | Direction, mode and horizon for a distance search | `forward()`, `backward()`, `fast()`, `precise()` |
//!
//! # Chunking
//!
//! | Mode | Driver chunk (of `total = 2n`) | Search batch | Progress | Yields |
//! |------|-------------------------------|--------------|----------|--------|
//! | `Fast` | whole run | whole horizon | final only | never |
//! | `Normal` | `max(1, total / 1000)` | 500 000 | every chunk | every chunk |
//! | `Precise` | `max(1, total / 200)` | 50 000 | every chunk | every chunk |
//!
//! The mode never changes a numeric result.
//!
//! # Example
//!
//! ```
//! use seedstep::{Direction, ExecutionMode, SearchConfig};
//!
//! let config = SearchConfig {
//!     direction: Direction::Backward,
//!     mode: ExecutionMode::Precise,
//!     ..SearchConfig::default()
//! };
//! assert!(config.validate().is_ok());
//! assert_eq!(config.mode.search_batch(), 50_000);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::{Direction, SeedError, SeedResult};

/// Number of transitions in one full pass over the 32-bit state space.
///
/// This is the default search horizon.
pub const FULL_CYCLE: u64 = 1 << 32;

/// Driver chunk divisor in `Normal` mode.
pub const NORMAL_CHUNK_DIVISOR: u64 = 1000;

/// Driver chunk divisor in `Precise` mode.
pub const PRECISE_CHUNK_DIVISOR: u64 = 200;

/// Search batch size in `Normal` mode.
pub const NORMAL_SEARCH_BATCH: u64 = 500_000;

/// Search batch size in `Precise` mode.
pub const PRECISE_SEARCH_BATCH: u64 = 50_000;

/// How a run trades responsiveness for throughput.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// One uninterrupted chunk. No intermediate progress, no yielding.
    Fast,
    /// About a thousand chunks per driver run; 500 000-transition search batches.
    #[default]
    Normal,
    /// About two hundred chunks per driver run; 50 000-transition search batches.
    Precise,
}

impl ExecutionMode {
    /// Transitions per driver chunk for a run of `total` transitions.
    ///
    /// `Fast` returns `u64::MAX`: the whole run is one chunk.
    #[must_use]
    pub const fn driver_chunk(self, total: u64) -> u64 {
        let divisor = match self {
            Self::Fast => return u64::MAX,
            Self::Normal => NORMAL_CHUNK_DIVISOR,
            Self::Precise => PRECISE_CHUNK_DIVISOR,
        };
        let chunk = total / divisor;
        if chunk == 0 {
            1
        } else {
            chunk
        }
    }

    /// Transitions per search batch. `Fast` returns `u64::MAX`.
    #[must_use]
    pub const fn search_batch(self) -> u64 {
        match self {
            Self::Fast => u64::MAX,
            Self::Normal => NORMAL_SEARCH_BATCH,
            Self::Precise => PRECISE_SEARCH_BATCH,
        }
    }

    /// Whether intermediate progress is reported and control is yielded
    /// between chunks.
    #[must_use]
    pub const fn is_cooperative(self) -> bool {
        !matches!(self, Self::Fast)
    }

    /// Returns a lowercase label suitable for logs and config files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Normal => "normal",
            Self::Precise => "precise",
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExecutionMode {
    type Err = SeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "normal" => Ok(Self::Normal),
            "precise" => Ok(Self::Precise),
            _ => Err(SeedError::UnknownMode {
                input: s.to_owned(),
            }),
        }
    }
}

/// Configuration for a fixed-length run ([`StepRun`](crate::StepRun)).
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[must_use = "DriverConfig has no effect unless passed to StepRun::new()"]
pub struct DriverConfig {
    /// Which transition to apply.
    ///
    /// Default: `Forward`
    pub direction: Direction,
    /// Chunking policy.
    ///
    /// Default: `Normal`
    pub mode: ExecutionMode,
}

impl DriverConfig {
    /// Creates a `DriverConfig` with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward run in the given mode.
    pub const fn forward(mode: ExecutionMode) -> Self {
        Self {
            direction: Direction::Forward,
            mode,
        }
    }

    /// Backward run in the given mode.
    pub const fn backward(mode: ExecutionMode) -> Self {
        Self {
            direction: Direction::Backward,
            mode,
        }
    }
}

/// Configuration for a distance search ([`DistanceSearch`](crate::DistanceSearch)).
///
/// New fields may be added in future versions; construct with
/// `..SearchConfig::default()`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[must_use = "SearchConfig has no effect unless passed to DistanceSearch::new()"]
pub struct SearchConfig {
    /// Which transition to walk with.
    ///
    /// Default: `Forward`
    pub direction: Direction,
    /// Batch policy.
    ///
    /// Default: `Normal`
    pub mode: ExecutionMode,
    /// Transitions to try before giving up with `Unreachable`.
    ///
    /// Valid range: 1 to [`FULL_CYCLE`]. Default: [`FULL_CYCLE`]
    pub max_transitions: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            direction: Direction::Forward,
            mode: ExecutionMode::Normal,
            max_transitions: FULL_CYCLE,
        }
    }
}

impl SearchConfig {
    /// Creates a `SearchConfig` with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward search over the full cycle in `Normal` mode.
    pub fn forward() -> Self {
        Self::default()
    }

    /// Backward search over the full cycle in `Normal` mode.
    pub fn backward() -> Self {
        Self {
            direction: Direction::Backward,
            ..Self::default()
        }
    }

    /// Forward search in a single uninterrupted batch.
    ///
    /// Not cancellable once started.
    pub fn fast() -> Self {
        Self {
            mode: ExecutionMode::Fast,
            ..Self::default()
        }
    }

    /// Forward search with small batches for frequent progress and cancellation.
    pub fn precise() -> Self {
        Self {
            mode: ExecutionMode::Precise,
            ..Self::default()
        }
    }

    /// Returns a copy with the given direction.
    pub const fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Returns a copy with the given mode.
    pub const fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns a copy with the given horizon.
    pub const fn with_max_transitions(mut self, max_transitions: u64) -> Self {
        self.max_transitions = max_transitions;
        self
    }

    /// Checks that every field is in range.
    pub fn validate(&self) -> SeedResult<()> {
        if self.max_transitions < 1 || self.max_transitions > FULL_CYCLE {
            return Err(SeedError::InvalidConfig {
                field: "max_transitions",
                min: 1,
                max: FULL_CYCLE,
                actual: self.max_transitions,
            });
        }
        Ok(())
    }
}
