//! One-call entry points for the calculator front end.
//!
//! These functions validate their inputs first and only then build and drive
//! a [`StepRun`] or [`DistanceSearch`]. A validation error means no
//! transition was applied and no progress was reported.
//!
//! | Function | Input | Result |
//! |----------|-------|--------|
//! | [`run_forward`] | seed text, roll count | [`RunOutcome`] |
//! | [`run_backward`] | seed text, roll count | [`RunOutcome`] |
//! | [`find_distance`] | two raw states | [`SearchOutcome`] |
//!
//! Each call takes its own [`CancellationToken`], so a forward run, a backward
//! run and a search can be in flight at once and be cancelled independently.

use crate::progress::ProgressObserver;
use crate::{
    parse_seed, CancellationToken, Direction, DistanceSearch, DriverConfig, ExecutionMode,
    RollCount, RunOutcome, SearchConfig, SearchOutcome, Seed, SeedResult, StepRun,
};

fn run_rolls<O>(
    seed: &str,
    rolls: i64,
    config: DriverConfig,
    token: &CancellationToken,
    observer: &O,
) -> SeedResult<RunOutcome>
where
    O: ProgressObserver + ?Sized,
{
    let seed = parse_seed(seed)?;
    let rolls = RollCount::from_signed(rolls)?;
    Ok(StepRun::new(seed, rolls, config).run(token, observer))
}

/// Advances the seed in `seed` text by `rolls` rolls.
///
/// The text may be decimal or `0x` hexadecimal; see [`parse_seed`]. A negative
/// `rolls` is rejected before anything runs.
///
/// # Example
///
/// ```
/// use seedstep::{run_forward, CancellationToken, ExecutionMode, NoProgress};
///
/// let token = CancellationToken::new();
/// let outcome = run_forward("0", 0, ExecutionMode::Normal, &token, &NoProgress)?;
/// assert_eq!(outcome.to_string(), "1");
/// # Ok::<(), seedstep::SeedError>(())
/// ```
pub fn run_forward<O>(
    seed: &str,
    rolls: i64,
    mode: ExecutionMode,
    token: &CancellationToken,
    observer: &O,
) -> SeedResult<RunOutcome>
where
    O: ProgressObserver + ?Sized,
{
    run_rolls(seed, rolls, DriverConfig::forward(mode), token, observer)
}

/// Rewinds the seed in `seed` text by `rolls` rolls.
///
/// Same input rules as [`run_forward`].
pub fn run_backward<O>(
    seed: &str,
    rolls: i64,
    mode: ExecutionMode,
    token: &CancellationToken,
    observer: &O,
) -> SeedResult<RunOutcome>
where
    O: ProgressObserver + ?Sized,
{
    run_rolls(seed, rolls, DriverConfig::backward(mode), token, observer)
}

/// Counts the rolls from state `a` to state `b` walking in `direction`.
///
/// Both states must be non-zero. The search covers one full cycle of the
/// state space.
///
/// # Example
///
/// ```
/// use seedstep::{find_distance, CancellationToken, Direction, ExecutionMode, NoProgress};
///
/// let token = CancellationToken::new();
/// let outcome = find_distance(5, 5, Direction::Forward, ExecutionMode::Fast, &token, &NoProgress)?;
/// assert_eq!(outcome.to_string(), "distance: 0");
/// # Ok::<(), seedstep::SeedError>(())
/// ```
pub fn find_distance<O>(
    a: u32,
    b: u32,
    direction: Direction,
    mode: ExecutionMode,
    token: &CancellationToken,
    observer: &O,
) -> SeedResult<SearchOutcome>
where
    O: ProgressObserver + ?Sized,
{
    let start = Seed::new(a)?;
    let target = Seed::new(b)?;
    let config = SearchConfig::default()
        .with_direction(direction)
        .with_mode(mode);
    Ok(DistanceSearch::new(start, target, config)?.run(token, observer))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::progress::CollectingProgressObserver;
    use crate::xorshift::{step, unstep};
    use crate::{NoProgress, SeedError};

    #[test]
    fn forward_and_backward_one_roll() {
        let token = CancellationToken::new();
        let forward = run_forward("1", 1, ExecutionMode::Fast, &token, &NoProgress).unwrap();
        assert_eq!(forward.state.get(), step(step(1)));

        let backward = run_backward("1", 1, ExecutionMode::Fast, &token, &NoProgress).unwrap();
        assert_eq!(backward.state.get(), unstep(unstep(1)));
    }

    #[test]
    fn negative_rolls_rejected_without_progress() {
        let observer = CollectingProgressObserver::new();
        let err = run_forward(
            "1",
            -1,
            ExecutionMode::Normal,
            &CancellationToken::new(),
            &observer,
        )
        .unwrap_err();
        assert!(matches!(err, SeedError::NegativeRollCount { .. }));
        assert!(observer.is_empty());
    }

    #[test]
    fn bad_seed_text_rejected() {
        let err = run_backward(
            "seed",
            3,
            ExecutionMode::Fast,
            &CancellationToken::new(),
            &NoProgress,
        )
        .unwrap_err();
        assert!(matches!(err, SeedError::NonNumeric { .. }));
    }

    #[test]
    fn zero_state_rejected_by_find_distance() {
        let err = find_distance(
            0,
            5,
            Direction::Forward,
            ExecutionMode::Fast,
            &CancellationToken::new(),
            &NoProgress,
        )
        .unwrap_err();
        assert_eq!(err, SeedError::SeedOutOfRange { value: 0 });
    }

    #[test]
    fn find_distance_one_roll() {
        let outcome = find_distance(
            5,
            step(step(5)),
            Direction::Forward,
            ExecutionMode::Precise,
            &CancellationToken::new(),
            &NoProgress,
        )
        .unwrap();
        assert_eq!(outcome.distance(), Some(1));
    }
}
