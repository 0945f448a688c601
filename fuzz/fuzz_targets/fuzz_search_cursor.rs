//! Fuzz target for the resumable run and search cursors.
//!
//! Drives a `StepRun` and a `DistanceSearch` one chunk at a time and cancels
//! at an arbitrary poll.
//!
//! # Safety Properties Tested
//! - No panics on any seed, horizon, mode or cancel point
//! - A run's state always matches the transitions it reports
//! - A search never reports a distance past its horizon
//! - Terminal states are sticky

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use seedstep::xorshift::apply_transitions;
use seedstep::{
    CancellationToken, Direction, DistanceSearch, DriverConfig, ExecutionMode, RollCount, RunPoll,
    SearchConfig, SearchOutcome, SearchPoll, Seed, StepRun,
};

#[derive(Debug, Arbitrary)]
struct FuzzCursor {
    start: u32,
    target: u32,
    /// Rolls for the step run, kept small so each input runs quickly
    rolls: u16,
    /// Search horizon, clamped to at least 1 below
    horizon: u16,
    backward: bool,
    mode: u8,
    /// Poll index at which to cancel, if any
    cancel_at: Option<u8>,
}

fn mode(byte: u8) -> ExecutionMode {
    match byte % 3 {
        0 => ExecutionMode::Fast,
        1 => ExecutionMode::Normal,
        _ => ExecutionMode::Precise,
    }
}

fuzz_target!(|input: FuzzCursor| {
    let direction = if input.backward {
        Direction::Backward
    } else {
        Direction::Forward
    };
    let mode = mode(input.mode);

    // Step run
    let token = CancellationToken::new();
    let mut run = StepRun::new(
        Seed::normalize(input.start),
        RollCount::new(u64::from(input.rolls)).unwrap(),
        DriverConfig { direction, mode },
    );
    let mut polls = 0u8;
    let outcome = loop {
        if input.cancel_at == Some(polls) {
            token.cancel();
        }
        match run.resume(&token) {
            RunPoll::Pending(_) => polls = polls.wrapping_add(1),
            RunPoll::Done(outcome) => break outcome,
        }
    };
    let origin = Seed::normalize(input.start).get();
    assert_eq!(
        outcome.state.get(),
        apply_transitions(origin, outcome.transitions, direction)
    );
    assert_eq!(run.resume(&token), RunPoll::Done(outcome));

    // Distance search
    let token = CancellationToken::new();
    let horizon = u64::from(input.horizon).max(1);
    let config = SearchConfig::new()
        .with_direction(direction)
        .with_mode(mode)
        .with_max_transitions(horizon);
    let mut search = DistanceSearch::new(
        Seed::normalize(input.start),
        Seed::normalize(input.target),
        config,
    )
    .unwrap();
    let mut polls = 0u8;
    let outcome = loop {
        if input.cancel_at == Some(polls) {
            token.cancel();
        }
        match search.resume(&token) {
            SearchPoll::Pending(_) => polls = polls.wrapping_add(1),
            SearchPoll::Done(outcome) => break outcome,
        }
    };
    if let SearchOutcome::Completed { transitions, .. } = outcome {
        assert!(transitions <= horizon);
        let reached = apply_transitions(Seed::normalize(input.start).get(), transitions, direction);
        assert_eq!(reached, Seed::normalize(input.target).get());
    }
    assert_eq!(search.resume(&token), SearchPoll::Done(outcome));
});
