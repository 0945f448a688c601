//! Shared configuration and strategies for property-based tests.
//!
//! When running under Miri the case count drops so the suite stays usable.

use crate::Seed;
use proptest::prelude::*;

/// Returns the number of proptest cases: 5 under Miri, 256 otherwise.
#[must_use]
pub const fn miri_case_count() -> u32 {
    if cfg!(miri) {
        5
    } else {
        256
    }
}

/// Strategy producing any valid seed, with the boundary values weighted in.
pub fn valid_seed() -> impl Strategy<Value = Seed> {
    prop_oneof![
        1 => Just(Seed::MIN),
        1 => Just(Seed::MAX),
        1 => Just(Seed::normalize(1 << 31)),
        12 => (1u32..=u32::MAX).prop_map(Seed::normalize),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::strategy::ValueTree;
    use proptest::test_runner::TestRunner;

    #[test]
    fn miri_case_count_matches_cfg() {
        let count = miri_case_count();
        if cfg!(miri) {
            assert_eq!(count, 5);
        } else {
            assert_eq!(count, 256);
        }
    }

    #[test]
    fn valid_seed_never_yields_zero() {
        let mut runner = TestRunner::default();
        let strategy = valid_seed();
        for _ in 0..1000 {
            let tree = strategy
                .new_tree(&mut runner)
                .unwrap_or_else(|e| panic!("strategy failed: {e}"));
            assert_ne!(tree.current().get(), 0);
        }
    }
}
