//! Convenient re-exports for common usage.
//!
//! ```rust
//! use seedstep::prelude::*;
//!
//! let token = CancellationToken::new();
//! let outcome = run_forward("0x2a", 3, ExecutionMode::Precise, &token, &NoProgress)?;
//! assert!(outcome.is_completed());
//! # Ok::<(), SeedError>(())
//! ```

// Entry points
pub use crate::calc::{find_distance, run_backward, run_forward};
pub use crate::input::{parse_roll_count, parse_seed};

// Cursors and their results
pub use crate::driver::{RunOutcome, RunPoll, RunStatus, StepRun};
pub use crate::search::{DistanceSearch, SearchOutcome, SearchPoll};

// Fundamental types
pub use crate::{Direction, RollCount, Seed};

// Configuration
pub use crate::config::{DriverConfig, ExecutionMode, SearchConfig};

// Control and observation
pub use crate::cancel::CancellationToken;
pub use crate::progress::{NoProgress, Progress, ProgressObserver, TracingProgressObserver};

// Errors
pub use crate::error::{SeedError, SeedResult};
