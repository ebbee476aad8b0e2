//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use appliance_usage::usage::{Event, PERIOD_MINUTES, State, UsageProfile};

/// Builds a profile from `(state, timestamp)` pairs.
pub fn profile(initial: State, events: &[(State, u32)]) -> UsageProfile {
    UsageProfile::new(
        initial,
        events.iter().map(|&(s, t)| Event::new(s, t)).collect(),
    )
}

/// Seeded generator so property runs are reproducible.
pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Random single-day profile with ascending timestamps in `[0, 1440)`.
///
/// `states` is the pool each event's state is drawn from; repeats are allowed
/// so the normalizer has duplicates to remove.
pub fn random_day_profile(rng: &mut StdRng, states: &[State]) -> UsageProfile {
    let count = rng.random_range(0..12);
    let mut timestamps: Vec<u32> = (0..count)
        .map(|_| rng.random_range(0..PERIOD_MINUTES))
        .collect();
    timestamps.sort_unstable();
    let pick = |rng: &mut StdRng| states[rng.random_range(0..states.len())];
    let initial = pick(rng);
    let events = timestamps
        .into_iter()
        .map(|t| Event::new(pick(rng), t))
        .collect();
    UsageProfile::new(initial, events)
}

/// Same timestamps with `on` and `off` exchanged everywhere.
pub fn swap_on_off(profile: &UsageProfile) -> UsageProfile {
    let flip = |s: State| match s {
        State::On => State::Off,
        State::Off => State::On,
        State::AutoOff => State::AutoOff,
    };
    UsageProfile::new(
        flip(profile.initial),
        profile
            .events
            .iter()
            .map(|e| Event::new(flip(e.state), e.timestamp))
            .collect(),
    )
}

/// Repeats a single-day profile on every day of a 31-day month.
///
/// Timestamps are shifted by whole days; events at minute zero are moved to
/// minute one so each copy stays inside its own day.
pub fn replicate_over_month(day: &UsageProfile) -> UsageProfile {
    let mut events = Vec::new();
    for d in 0..31 {
        for e in &day.events {
            events.push(Event::new(e.state, d * PERIOD_MINUTES + e.timestamp.max(1)));
        }
    }
    UsageProfile::new(day.initial, events)
}
