//! Distance search between two generator states.
//!
//! A [`DistanceSearch`] walks from a start state with one transition function,
//! comparing against the target after every single transition, until it hits
//! the target, exhausts its horizon, or observes cancellation.
//!
//! Work is grouped into batches ([`ExecutionMode::search_batch`]). The
//! cancellation token is checked only at batch boundaries, which makes this a
//! coarser checkpoint than the driver's per-transition check: in `Fast` mode
//! the whole horizon is one batch, so a search that has started cannot be
//! cancelled.
//!
//! Distances are reported in rolls, `floor(transitions / 2)`. The raw
//! transition count is kept alongside, so a target that sits half a roll away
//! (an odd transition count) can still be told apart.
//!
//! # Example
//!
//! ```
//! use seedstep::{CancellationToken, DistanceSearch, NoProgress, SearchConfig, SearchOutcome, Seed};
//! use seedstep::xorshift::step;
//!
//! let start = Seed::normalize(5);
//! let target = Seed::normalize(step(step(step(step(5)))));
//!
//! let outcome = DistanceSearch::new(start, target, SearchConfig::fast())?
//!     .run(&CancellationToken::new(), &NoProgress);
//! assert_eq!(outcome.distance(), Some(2));
//! # Ok::<(), seedstep::SeedError>(())
//! ```

use std::fmt;

use web_time::Instant;

use crate::progress::{Progress, ProgressObserver};
use crate::sync;
use crate::{CancellationToken, RollCount, SearchConfig, Seed, SeedResult};

/// Terminal result of a distance search.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
#[must_use]
pub enum SearchOutcome {
    /// The target was reached.
    Completed {
        /// Rolls between start and target, `floor(transitions / 2)`.
        distance: u64,
        /// Transitions applied when the target was first seen.
        transitions: u64,
    },
    /// The horizon was exhausted without reaching the target.
    Unreachable,
    /// The token was set at a batch boundary.
    Cancelled,
}

impl SearchOutcome {
    /// Builds a `Completed` outcome from the number of transitions taken.
    pub const fn found_after(transitions: u64) -> Self {
        Self::Completed {
            distance: transitions / RollCount::TRANSITIONS_PER_ROLL,
            transitions,
        }
    }

    /// The distance in rolls, if the target was reached.
    #[must_use]
    pub const fn distance(&self) -> Option<u64> {
        match self {
            Self::Completed { distance, .. } => Some(*distance),
            _ => None,
        }
    }

    /// The raw transition count, if the target was reached.
    #[must_use]
    pub const fn transitions(&self) -> Option<u64> {
        match self {
            Self::Completed { transitions, .. } => Some(*transitions),
            _ => None,
        }
    }

    /// Returns true if the target sits an odd number of transitions away,
    /// i.e. between two roll boundaries.
    #[must_use]
    pub const fn is_half_roll(&self) -> bool {
        matches!(self, Self::Completed { transitions, .. } if *transitions % 2 == 1)
    }

    /// Returns true if the target was reached.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Returns true if the search was cancelled.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns true if the horizon was exhausted.
    #[must_use]
    pub const fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable)
    }

    /// The bare distance, for copying. `None` unless completed.
    #[must_use]
    pub fn copy_text(&self) -> Option<String> {
        self.distance().map(|d| d.to_string())
    }

    /// Serializes the outcome to JSON.
    #[cfg(feature = "json")]
    #[must_use]
    pub fn to_json(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed { distance, .. } => write!(f, "distance: {}", distance),
            Self::Unreachable => f.write_str("unreachable"),
            Self::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// What one call to [`DistanceSearch::resume`] produced.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SearchPoll {
    /// A batch finished without a match and the horizon is not exhausted.
    Pending(Progress),
    /// The search reached a terminal state.
    Done(SearchOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Running,
    Finished(SearchOutcome),
}

/// A resumable walk from `start` toward `target`.
#[derive(Debug, Clone)]
#[must_use = "a DistanceSearch does nothing until resumed or run"]
pub struct DistanceSearch {
    start: Seed,
    target: Seed,
    current: u32,
    config: SearchConfig,
    batch: u64,
    steps: u64,
    phase: Phase,
    started: Option<Instant>,
}

impl DistanceSearch {
    /// Prepares a search. Fails if `config` does not validate.
    pub fn new(start: Seed, target: Seed, config: SearchConfig) -> SeedResult<Self> {
        config.validate()?;
        Ok(Self {
            start,
            target,
            current: start.get(),
            config,
            batch: config.mode.search_batch(),
            steps: 0,
            phase: Phase::Idle,
            started: None,
        })
    }

    /// The state the walk started from.
    #[must_use]
    pub const fn start(&self) -> Seed {
        self.start
    }

    /// The state being looked for.
    #[must_use]
    pub const fn target(&self) -> Seed {
        self.target
    }

    /// Transitions applied so far.
    #[must_use]
    pub const fn transitions_applied(&self) -> u64 {
        self.steps
    }

    /// The configuration the search was created with.
    pub const fn config(&self) -> SearchConfig {
        self.config
    }

    /// Returns true once the search has reached a terminal state.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished(_))
    }

    /// Executes one batch.
    ///
    /// The token is checked once, before the batch starts. A start equal to
    /// the target completes immediately at distance zero.
    pub fn resume(&mut self, token: &CancellationToken) -> SearchPoll {
        match self.phase {
            Phase::Finished(outcome) => return SearchPoll::Done(outcome),
            Phase::Idle => {
                self.begin();
                if self.start == self.target {
                    return SearchPoll::Done(self.finish(SearchOutcome::found_after(0)));
                }
            }
            Phase::Running => {}
        }

        if token.is_cancelled() {
            return SearchPoll::Done(self.finish(SearchOutcome::Cancelled));
        }

        let horizon = self.config.max_transitions;
        let direction = self.config.direction;
        let target = self.target.get();
        let end = self.steps.saturating_add(self.batch).min(horizon);
        while self.steps < end {
            self.current = direction.apply(self.current);
            self.steps += 1;
            if self.current == target {
                return SearchPoll::Done(self.finish(SearchOutcome::found_after(self.steps)));
            }
        }

        if self.steps >= horizon {
            return SearchPoll::Done(self.finish(SearchOutcome::Unreachable));
        }

        tracing::trace!(
            steps = self.steps,
            horizon,
            "distance search batch boundary"
        );
        SearchPoll::Pending(Progress::from_counts(self.steps, horizon))
    }

    /// Runs to a terminal state on the current thread.
    ///
    /// In cooperative modes each batch boundary reports progress to
    /// `observer` and yields the thread. A completed or exhausted search
    /// reports a final `100%` update; a cancelled one does not.
    pub fn run<O>(mut self, token: &CancellationToken, observer: &O) -> SearchOutcome
    where
        O: ProgressObserver + ?Sized,
    {
        loop {
            match self.resume(token) {
                SearchPoll::Pending(progress) => {
                    if self.config.mode.is_cooperative() {
                        observer.on_progress(progress);
                        sync::yield_now();
                    }
                }
                SearchPoll::Done(outcome) => {
                    if !outcome.is_cancelled() {
                        observer.on_progress(Progress::finished());
                    }
                    return outcome;
                }
            }
        }
    }

    /// Runs to a terminal state inside a tokio task, yielding to the runtime
    /// between batches.
    #[cfg(feature = "tokio")]
    pub async fn run_async<O>(mut self, token: &CancellationToken, observer: &O) -> SearchOutcome
    where
        O: ProgressObserver + ?Sized,
    {
        loop {
            match self.resume(token) {
                SearchPoll::Pending(progress) => {
                    if self.config.mode.is_cooperative() {
                        observer.on_progress(progress);
                        tokio::task::yield_now().await;
                    }
                }
                SearchPoll::Done(outcome) => {
                    if !outcome.is_cancelled() {
                        observer.on_progress(Progress::finished());
                    }
                    return outcome;
                }
            }
        }
    }

    fn begin(&mut self) {
        self.phase = Phase::Running;
        self.started = Some(Instant::now());
        tracing::debug!(
            start = self.start.get(),
            target = self.target.get(),
            direction = %self.config.direction,
            mode = %self.config.mode,
            horizon = self.config.max_transitions,
            "distance search started"
        );
    }

    fn finish(&mut self, outcome: SearchOutcome) -> SearchOutcome {
        self.phase = Phase::Finished(outcome);
        let elapsed_ms = self
            .started
            .map_or(0, |started| started.elapsed().as_millis() as u64);
        tracing::debug!(
            outcome = %outcome,
            steps = self.steps,
            elapsed_ms,
            "distance search finished"
        );
        outcome
    }
}
