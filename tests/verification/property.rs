//! Property-based tests for the public stepping and search API.
//!
//! # Invariants Tested
//!
//! - Inverse law: `unstep(step(x)) == x` and `step(unstep(x)) == x`
//! - Zero is a fixed point of both transitions; nothing else maps to zero
//! - A run's result depends only on `(seed, n, direction)`, never on the mode
//! - Forward `n` then backward `n` returns to the seed
//! - The search returns the minimal distance and never overshoots
//! - Parsed seeds always land in `[1, 2^32 - 1]`

// Allow test-specific patterns that are appropriate for test code
#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing
)]

use proptest::prelude::*;
use seedstep::xorshift::{step, unstep, Xorshift32};
use seedstep::{
    parse_seed, CancellationToken, Direction, DistanceSearch, DriverConfig, ExecutionMode,
    NoProgress, RollCount, SearchConfig, Seed, StepRun,
};

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Strategy for non-zero states, with the edges weighted in.
fn state_strategy() -> impl Strategy<Value = u32> {
    prop_oneof![
        1 => Just(1u32),
        1 => Just(u32::MAX),
        1 => Just(0x8000_0000u32),
        10 => 1u32..=u32::MAX,
    ]
}

fn mode_strategy() -> impl Strategy<Value = ExecutionMode> {
    prop_oneof![
        Just(ExecutionMode::Fast),
        Just(ExecutionMode::Normal),
        Just(ExecutionMode::Precise),
    ]
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Forward), Just(Direction::Backward)]
}

fn run(seed: u32, rolls: u64, config: DriverConfig) -> u32 {
    StepRun::new(Seed::normalize(seed), RollCount::new(rolls).unwrap(), config)
        .run(&CancellationToken::new(), &NoProgress)
        .state
        .get()
}

// ============================================================================
// Transition properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2048))]

    /// Inverse law in both orders, over the whole u32 range including zero.
    #[test]
    fn prop_inverse_law(x in any::<u32>()) {
        prop_assert_eq!(unstep(step(x)), x);
        prop_assert_eq!(step(unstep(x)), x);
    }

    /// Non-zero states never map to zero.
    #[test]
    fn prop_nonzero_stays_nonzero(x in state_strategy()) {
        prop_assert_ne!(step(x), 0);
        prop_assert_ne!(unstep(x), 0);
    }

    /// Parsed seeds are always valid.
    #[test]
    fn prop_parsed_seed_in_range(x in any::<i64>()) {
        let seed = parse_seed(&x.to_string()).unwrap();
        prop_assert!(seed >= Seed::MIN);
    }
}

// ============================================================================
// Run properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The mode changes timing only.
    #[test]
    fn prop_mode_independence(
        seed in state_strategy(),
        rolls in 0u64..3000,
        direction in direction_strategy(),
        a in mode_strategy(),
        b in mode_strategy(),
    ) {
        let left = run(seed, rolls, DriverConfig { direction, mode: a });
        let right = run(seed, rolls, DriverConfig { direction, mode: b });
        prop_assert_eq!(left, right);
    }

    /// The driver agrees with the step-by-step generator.
    #[test]
    fn prop_driver_matches_generator(seed in state_strategy(), rolls in 0u64..2000) {
        let mut rng = Xorshift32::new(Seed::normalize(seed));
        for _ in 0..rolls {
            rng.roll();
        }
        let driven = run(seed, rolls, DriverConfig::forward(ExecutionMode::Precise));
        prop_assert_eq!(driven, rng.seed().get());
    }

    /// Going forward then back is the identity.
    #[test]
    fn prop_forward_backward_identity(
        seed in state_strategy(),
        rolls in 0u64..5000,
        mode in mode_strategy(),
    ) {
        let there = run(seed, rolls, DriverConfig::forward(mode));
        let back = run(there, rolls, DriverConfig::backward(mode));
        prop_assert_eq!(back, seed);
    }

    /// The search finds exactly the distance the run travelled.
    #[test]
    fn prop_search_finds_run_distance(
        seed in state_strategy(),
        rolls in 0u64..4000,
        direction in direction_strategy(),
    ) {
        let target = run(seed, rolls, DriverConfig { direction, mode: ExecutionMode::Fast });
        let outcome = DistanceSearch::new(
            Seed::normalize(seed),
            Seed::normalize(target),
            SearchConfig::precise().with_direction(direction).with_max_transitions(10_000),
        )
        .unwrap()
        .run(&CancellationToken::new(), &NoProgress);
        prop_assert_eq!(outcome.distance(), Some(rolls));
        prop_assert_eq!(outcome.transitions(), Some(rolls * 2));
    }
}
