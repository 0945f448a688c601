//! Fuzz target for text input parsing.
//!
//! # Safety Properties Tested
//! - No panics on arbitrary text
//! - Accepted seeds are always in `[1, 2^32 - 1]`
//! - Accepted roll counts never overflow the transition counter
//! - `FromStr` impls agree with the free parsing functions

#![no_main]

use libfuzzer_sys::fuzz_target;

use seedstep::{parse_roll_count, parse_seed, Direction, ExecutionMode, RollCount, Seed};

fuzz_target!(|text: &str| {
    if let Ok(seed) = parse_seed(text) {
        assert!(seed >= Seed::MIN);
        assert_eq!(text.parse::<Seed>().ok(), Some(seed));
    }

    if let Ok(rolls) = parse_roll_count(text) {
        assert!(rolls <= RollCount::MAX);
        assert!(rolls.get().checked_mul(2).is_some());
        assert_eq!(text.parse::<RollCount>().ok(), Some(rolls));
    }

    let _ = text.parse::<Direction>();
    let _ = text.parse::<ExecutionMode>();
});
