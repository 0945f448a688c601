//! Progress reporting for cooperative runs.
//!
//! Drivers and searches report a [`Progress`] value at every chunk or batch
//! boundary and once more when they finish. Where the updates go is up to the
//! caller:
//!
//! - [`NoProgress`] discards them.
//! - [`TracingProgressObserver`] emits them as structured `tracing` events.
//! - [`CollectingProgressObserver`] stores them, mostly for tests.
//! - Any `Fn(Progress)` closure is an observer too.
//!
//! # Example
//!
//! ```
//! use seedstep::{CollectingProgressObserver, Progress, ProgressObserver};
//!
//! let observer = CollectingProgressObserver::new();
//! observer.on_progress(Progress::from_counts(25, 100));
//! observer.on_progress(Progress::finished());
//!
//! let updates = observer.updates();
//! assert_eq!(updates[0].percent_text(), "25.00");
//! assert!(updates[1].completed);
//! ```

use parking_lot::Mutex;
use std::fmt;

/// A single progress update: `(percent, completed)`.
///
/// `percent` is in `[0, 100]`. Observers are expected to show it with two
/// decimals, see [`percent_text`](Progress::percent_text).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Progress {
    /// Share of the work done, in percent.
    pub percent: f64,
    /// `true` only on the final update of a run that completed or exhausted
    /// its horizon. Cancelled runs never send it.
    pub completed: bool,
}

impl Progress {
    /// Builds an intermediate update for `done` out of `total` work units.
    ///
    /// A `total` of zero counts as fully done.
    #[must_use]
    pub fn from_counts(done: u64, total: u64) -> Self {
        let percent = if total == 0 {
            100.0
        } else {
            (done as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
        };
        Self {
            percent,
            completed: false,
        }
    }

    /// The final update of a finished run.
    #[must_use]
    pub const fn finished() -> Self {
        Self {
            percent: 100.0,
            completed: true,
        }
    }

    /// Percentage with two decimals, e.g. `"42.17"`.
    #[must_use]
    pub fn percent_text(&self) -> String {
        format!("{:.2}", self.percent)
    }

    /// Serializes the update to JSON.
    #[cfg(feature = "json")]
    #[must_use]
    pub fn to_json(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.percent)?;
        if self.completed {
            f.write_str(" (done)")?;
        }
        Ok(())
    }
}

/// Receives progress updates from a running operation.
///
/// Called from the thread (or task) running the operation, between chunks.
/// Keep implementations quick; the next chunk does not start until this
/// returns.
pub trait ProgressObserver {
    /// Called with each progress update.
    fn on_progress(&self, progress: Progress);
}

impl<F> ProgressObserver for F
where
    F: Fn(Progress),
{
    fn on_progress(&self, progress: Progress) {
        self(progress);
    }
}

/// Observer that ignores every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&self, _progress: Progress) {}
}

/// Observer that logs updates via the `tracing` crate.
///
/// Intermediate updates are `trace!` events, the final one is `debug!`.
/// Fields: `operation`, `percent` (two-decimal string) and `completed`.
#[derive(Debug, Clone, Copy)]
pub struct TracingProgressObserver {
    operation: &'static str,
}

impl TracingProgressObserver {
    /// Creates an observer that tags its events with `operation`.
    #[must_use]
    pub const fn new(operation: &'static str) -> Self {
        Self { operation }
    }
}

impl Default for TracingProgressObserver {
    fn default() -> Self {
        Self::new("seedstep")
    }
}

impl ProgressObserver for TracingProgressObserver {
    fn on_progress(&self, progress: Progress) {
        let percent = progress.percent_text();
        if progress.completed {
            tracing::debug!(
                operation = self.operation,
                percent = %percent,
                completed = true,
                "progress"
            );
        } else {
            tracing::trace!(
                operation = self.operation,
                percent = %percent,
                completed = false,
                "progress"
            );
        }
    }
}

/// Observer that records every update, in order.
#[derive(Debug, Default)]
pub struct CollectingProgressObserver {
    updates: Mutex<Vec<Progress>>,
}

impl CollectingProgressObserver {
    /// Creates an observer with no recorded updates.
    #[must_use]
    pub fn new() -> Self {
        Self {
            updates: Mutex::new(Vec::new()),
        }
    }

    /// Returns a copy of all recorded updates.
    #[must_use]
    pub fn updates(&self) -> Vec<Progress> {
        self.updates.lock().clone()
    }

    /// Returns the number of recorded updates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.updates.lock().len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.updates.lock().is_empty()
    }

    /// Returns the most recent update, if any.
    #[must_use]
    pub fn last(&self) -> Option<Progress> {
        self.updates.lock().last().copied()
    }

    /// Returns true if a final (`completed`) update was recorded.
    #[must_use]
    pub fn saw_completion(&self) -> bool {
        self.updates.lock().iter().any(|p| p.completed)
    }

    /// Clears all recorded updates.
    pub fn clear(&self) {
        self.updates.lock().clear();
    }
}

impl ProgressObserver for CollectingProgressObserver {
    fn on_progress(&self, progress: Progress) {
        self.updates.lock().push(progress);
    }
}
