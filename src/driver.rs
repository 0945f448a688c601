//! Fixed-length cooperative runs.
//!
//! A [`StepRun`] applies exactly `2n` transitions to a seed, in chunks whose
//! size depends on the [`ExecutionMode`]. It is a pull-based cursor: each call
//! to [`StepRun::resume`] executes one chunk and either hands back a
//! [`Progress`] update or the final [`RunOutcome`]. [`StepRun::run`] (and
//! `run_async` with the `tokio` feature) drive the cursor to the end, reporting
//! progress and yielding between chunks.
//!
//! The cancellation token is polled before every single transition, so a
//! cancelled run stops at the exact transition where the flag was first seen.
//!
//! # State machine
//!
//! ```text
//! Idle --resume--> Running --resume--> ... --> Completed | Cancelled
//! ```
//!
//! Terminal states are final: resuming a finished run returns the same
//! outcome again without doing any work.
//!
//! # Example
//!
//! ```
//! use seedstep::{CancellationToken, DriverConfig, ExecutionMode, NoProgress, RollCount, Seed, StepRun};
//! use seedstep::xorshift::unstep;
//!
//! let run = StepRun::new(
//!     Seed::normalize(99),
//!     RollCount::new(1)?,
//!     DriverConfig::backward(ExecutionMode::Normal),
//! );
//! let outcome = run.run(&CancellationToken::new(), &NoProgress);
//! assert_eq!(outcome.state.get(), unstep(unstep(99)));
//! # Ok::<(), seedstep::SeedError>(())
//! ```

use std::fmt;

use web_time::Instant;

use crate::progress::{Progress, ProgressObserver};
use crate::sync;
use crate::{CancellationToken, DriverConfig, RollCount, Seed};

/// How a run ended.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// All `2n` transitions were applied.
    Completed,
    /// The token was set before the last transition; `state` is wherever the
    /// run had got to.
    Cancelled,
}

/// Result of a [`StepRun`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[must_use]
pub struct RunOutcome {
    /// State after the applied transitions.
    pub state: Seed,
    /// Whether the run finished or was cancelled.
    pub status: RunStatus,
    /// Number of transitions actually applied.
    pub transitions: u64,
}

impl RunOutcome {
    /// Returns true if every requested transition was applied.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == RunStatus::Completed
    }

    /// Returns true if the run stopped on cancellation.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.status == RunStatus::Cancelled
    }

    /// The bare result number, for copying. `None` for a cancelled run.
    #[must_use]
    pub fn copy_text(&self) -> Option<String> {
        self.is_completed().then(|| self.state.to_string())
    }

    /// Serializes the outcome to JSON.
    #[cfg(feature = "json")]
    #[must_use]
    pub fn to_json(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            RunStatus::Completed => write!(f, "{}", self.state),
            RunStatus::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// What one call to [`StepRun::resume`] produced.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum RunPoll {
    /// A chunk finished and more work remains.
    Pending(Progress),
    /// The run reached a terminal state.
    Done(RunOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Running,
    Finished(RunOutcome),
}

/// A resumable run of `2n` transitions in one direction.
#[derive(Debug, Clone)]
#[must_use = "a StepRun does nothing until resumed or run"]
pub struct StepRun {
    origin: Seed,
    current: u32,
    config: DriverConfig,
    total: u64,
    applied: u64,
    chunk: u64,
    phase: Phase,
    started: Option<Instant>,
}

impl StepRun {
    /// Prepares a run of `rolls` rolls from `seed`. No transition is applied yet.
    pub fn new(seed: Seed, rolls: RollCount, config: DriverConfig) -> Self {
        let total = rolls.transitions();
        Self {
            origin: seed,
            current: seed.get(),
            config,
            total,
            applied: 0,
            chunk: config.mode.driver_chunk(total),
            phase: Phase::Idle,
            started: None,
        }
    }

    /// The seed the run started from.
    #[must_use]
    pub const fn origin(&self) -> Seed {
        self.origin
    }

    /// The state reached so far.
    #[must_use]
    pub fn current(&self) -> Seed {
        Seed::from_state(self.current)
    }

    /// Transitions applied so far.
    #[must_use]
    pub const fn transitions_applied(&self) -> u64 {
        self.applied
    }

    /// Transitions the run will apply in total, `2n`.
    #[must_use]
    pub const fn total_transitions(&self) -> u64 {
        self.total
    }

    /// Transitions per chunk. `u64::MAX` in `Fast` mode.
    #[must_use]
    pub const fn chunk_size(&self) -> u64 {
        self.chunk
    }

    /// The configuration the run was created with.
    pub const fn config(&self) -> DriverConfig {
        self.config
    }

    /// Returns true once the run has reached a terminal state.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished(_))
    }

    /// Executes one chunk.
    ///
    /// The token is checked before every transition. Returns
    /// [`RunPoll::Pending`] with the progress so far if the chunk ended
    /// before the run did.
    pub fn resume(&mut self, token: &CancellationToken) -> RunPoll {
        match self.phase {
            Phase::Finished(outcome) => return RunPoll::Done(outcome),
            Phase::Idle => self.start(),
            Phase::Running => {}
        }

        let direction = self.config.direction;
        let end = self.applied.saturating_add(self.chunk).min(self.total);
        while self.applied < end {
            if token.is_cancelled() {
                return RunPoll::Done(self.finish(RunStatus::Cancelled));
            }
            self.current = direction.apply(self.current);
            self.applied += 1;
        }

        if self.applied == self.total {
            return RunPoll::Done(self.finish(RunStatus::Completed));
        }

        tracing::trace!(
            applied = self.applied,
            total = self.total,
            "step run chunk boundary"
        );
        RunPoll::Pending(Progress::from_counts(self.applied, self.total))
    }

    /// Runs to a terminal state on the current thread.
    ///
    /// In cooperative modes every chunk boundary reports progress to
    /// `observer` and then yields the thread. A completed run reports a final
    /// `100%` update; a cancelled one does not.
    pub fn run<O>(mut self, token: &CancellationToken, observer: &O) -> RunOutcome
    where
        O: ProgressObserver + ?Sized,
    {
        loop {
            match self.resume(token) {
                RunPoll::Pending(progress) => {
                    observer.on_progress(progress);
                    sync::yield_now();
                }
                RunPoll::Done(outcome) => {
                    if outcome.is_completed() {
                        observer.on_progress(Progress::finished());
                    }
                    return outcome;
                }
            }
        }
    }

    /// Runs to a terminal state inside a tokio task, yielding to the runtime
    /// between chunks.
    #[cfg(feature = "tokio")]
    pub async fn run_async<O>(mut self, token: &CancellationToken, observer: &O) -> RunOutcome
    where
        O: ProgressObserver + ?Sized,
    {
        loop {
            match self.resume(token) {
                RunPoll::Pending(progress) => {
                    observer.on_progress(progress);
                    tokio::task::yield_now().await;
                }
                RunPoll::Done(outcome) => {
                    if outcome.is_completed() {
                        observer.on_progress(Progress::finished());
                    }
                    return outcome;
                }
            }
        }
    }

    fn start(&mut self) {
        self.phase = Phase::Running;
        self.started = Some(Instant::now());
        tracing::debug!(
            seed = self.origin.get(),
            direction = %self.config.direction,
            mode = %self.config.mode,
            total = self.total,
            chunk = self.chunk,
            "step run started"
        );
    }

    fn finish(&mut self, status: RunStatus) -> RunOutcome {
        let outcome = RunOutcome {
            state: Seed::from_state(self.current),
            status,
            transitions: self.applied,
        };
        self.phase = Phase::Finished(outcome);
        let elapsed_ms = self
            .started
            .map_or(0, |started| started.elapsed().as_millis() as u64);
        tracing::debug!(
            status = ?status,
            state = outcome.state.get(),
            applied = self.applied,
            total = self.total,
            elapsed_ms,
            "step run finished"
        );
        outcome
    }
}
