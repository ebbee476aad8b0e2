//! Event stream normalization: boundary padding, duplicate removal, and the
//! redundant-off filter applied before savings accounting.

use tracing::debug;

use super::types::{Event, Metric, PERIOD_MINUTES, State, UsageProfile};

/// Closing boundary appended when the stream does not already end switched off.
pub const CLOSING_EVENT: Event = Event {
    state: State::Off,
    timestamp: PERIOD_MINUTES,
};

/// Pads the profile with a leading `initial` event at minute zero and, unless the
/// last event is already `off`, a closing `off` event at the period end.
pub fn pad(profile: &UsageProfile) -> Vec<Event> {
    let closes = profile.events.last().map(|e| e.state) != Some(State::Off);
    let mut padded = Vec::with_capacity(profile.events.len() + 2);
    padded.push(Event::new(profile.initial, 0));
    padded.extend_from_slice(&profile.events);
    if closes {
        padded.push(CLOSING_EVENT);
    }
    padded
}

/// Keeps an event only if `keep(last_kept, candidate)` holds. The first event is
/// always kept.
fn retain_transitions(events: &[Event], keep: impl Fn(&Event, &Event) -> bool) -> Vec<Event> {
    let mut kept: Vec<Event> = Vec::with_capacity(events.len());
    for event in events {
        let redundant = kept.last().is_some_and(|last| !keep(last, event));
        if !redundant {
            kept.push(*event);
        }
    }
    kept
}

/// Drops every event whose state repeats the previously kept state.
///
/// Only `state` is compared; timestamps never affect the decision.
pub fn dedup(events: &[Event]) -> Vec<Event> {
    retain_transitions(events, |last, event| last.state != event.state)
}

/// Drops repeated states and any manual `off` that directly follows a kept
/// `auto-off`, leaving the device shutoff as the active state.
pub fn dedup_redundant_off(events: &[Event]) -> Vec<Event> {
    retain_transitions(events, |last, event| {
        last.state != event.state && !(last.state == State::AutoOff && event.state == State::Off)
    })
}

/// Removes transitions that carry no information for `metric` without padding.
pub fn filter_for(events: &[Event], metric: Metric) -> Vec<Event> {
    match metric {
        Metric::Usage => dedup(events),
        Metric::Savings => dedup_redundant_off(events),
    }
}

/// Produces the canonical boundary-closed sequence for `metric`.
///
/// # Examples
///
/// ```
/// use appliance_usage::usage::{Event, Metric, State, UsageProfile, sanitize};
///
/// let profile = UsageProfile::new(State::Off, vec![Event::new(State::Off, 10)]);
/// assert_eq!(sanitize(&profile, Metric::Usage), vec![Event::new(State::Off, 0)]);
/// ```
pub fn sanitize(profile: &UsageProfile, metric: Metric) -> Vec<Event> {
    let padded = pad(profile);
    let sanitized = filter_for(&padded, metric);
    debug!(
        %metric,
        raw = profile.events.len(),
        padded = padded.len(),
        kept = sanitized.len(),
        "sanitized event stream"
    );
    sanitized
}
