//! Metamorphic testing for stepping and distance search.
//!
//! Instead of checking fixed expected values, these tests check relationships
//! between related runs.
//!
//! # Test Categories
//!
//! 1. **Splitting**: `n` rolls equal `a` rolls followed by `n - a` rolls
//! 2. **Reversal**: swapping direction swaps start and target
//! 3. **Translation**: shifting both ends of a search along the cycle keeps the distance
//! 4. **Granularity**: chunk size changes progress only, never results

// Allow test-specific patterns that are appropriate for test code
#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing
)]

use proptest::prelude::*;
use seedstep::{
    find_distance, run_backward, run_forward, CancellationToken, CollectingProgressObserver,
    Direction, ExecutionMode, NoProgress, SearchOutcome,
};

fn forward(seed: u32, rolls: i64) -> u32 {
    run_forward(
        &seed.to_string(),
        rolls,
        ExecutionMode::Fast,
        &CancellationToken::new(),
        &NoProgress,
    )
    .unwrap()
    .state
    .get()
}

fn backward(seed: u32, rolls: i64) -> u32 {
    run_backward(
        &seed.to_string(),
        rolls,
        ExecutionMode::Fast,
        &CancellationToken::new(),
        &NoProgress,
    )
    .unwrap()
    .state
    .get()
}

fn distance(a: u32, b: u32, direction: Direction) -> SearchOutcome {
    find_distance(
        a,
        b,
        direction,
        ExecutionMode::Normal,
        &CancellationToken::new(),
        &NoProgress,
    )
    .unwrap()
}

#[test]
fn test_metamorphic_split_runs_compose() {
    let seed = 0x0bad_f00d;
    let whole = forward(seed, 10_000);
    for split in [0, 1, 2_500, 9_999, 10_000] {
        let halves = forward(forward(seed, split), 10_000 - split);
        assert_eq!(halves, whole, "split at {split}");
    }
}

#[test]
fn test_metamorphic_reversal_swaps_endpoints() {
    let a = 31337;
    let b = forward(a, 2_024);
    assert_eq!(distance(a, b, Direction::Forward).distance(), Some(2_024));
    assert_eq!(distance(b, a, Direction::Backward).distance(), Some(2_024));
}

#[test]
fn test_metamorphic_translation_keeps_distance() {
    let a = 99;
    let b = forward(a, 300);
    let base = distance(a, b, Direction::Forward);
    for shift in [1, 17, 5_000] {
        let shifted = distance(forward(a, shift), forward(b, shift), Direction::Forward);
        assert_eq!(shifted, base, "shift {shift}");
    }
}

#[test]
fn test_metamorphic_granularity_changes_only_progress() {
    let mut results = Vec::new();
    let mut update_counts = Vec::new();
    for mode in [
        ExecutionMode::Fast,
        ExecutionMode::Normal,
        ExecutionMode::Precise,
    ] {
        let observer = CollectingProgressObserver::new();
        let outcome = run_forward("123", 20_000, mode, &CancellationToken::new(), &observer)
            .unwrap();
        results.push(outcome);
        update_counts.push(observer.len());
    }
    assert!(results.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(update_counts, vec![1, 1000, 200]);
}

mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Backward undoes forward for any split of the roll count.
        #[test]
        fn prop_backward_undoes_forward(seed in 1u32..=u32::MAX, n in 0i64..2000, k in 0i64..2000) {
            let there = forward(seed, n + k);
            prop_assert_eq!(backward(there, k), forward(seed, n));
        }
    }
}
