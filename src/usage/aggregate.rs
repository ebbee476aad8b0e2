//! Single-period aggregation of "on" time and auto-off savings.

use tracing::trace;

use super::error::UsageError;
use super::normalize::sanitize;
use super::types::{Event, Metric, Minutes, PERIOD_MINUTES, State, UsageProfile};

/// Rejects a timestamp that runs backwards from the previous one.
fn check_order(previous: Option<&Event>, event: &Event) -> Result<(), UsageError> {
    match previous {
        Some(prev) if event.timestamp < prev.timestamp => Err(UsageError::OutOfOrder {
            previous: prev.timestamp,
            timestamp: event.timestamp,
        }),
        _ => Ok(()),
    }
}

/// Minutes the appliance was switched on during the period.
///
/// Each `off` adds its timestamp and each `on` subtracts it; over a
/// boundary-closed alternating stream the sum telescopes to the total length
/// of the "on" intervals.
///
/// # Errors
///
/// Returns [`UsageError::InvalidState`] if the stream carries `auto-off`, and
/// [`UsageError::OutOfOrder`] if timestamps are not ascending.
///
/// # Examples
///
/// ```
/// use appliance_usage::usage::{Event, State, UsageProfile, energy_usage};
///
/// let profile = UsageProfile::new(
///     State::On,
///     vec![
///         Event::new(State::Off, 50),
///         Event::new(State::On, 304),
///         Event::new(State::Off, 600),
///     ],
/// );
/// assert_eq!(energy_usage(&profile), Ok(346));
/// ```
pub fn energy_usage(profile: &UsageProfile) -> Result<u64, UsageError> {
    let sanitized = sanitize(profile, Metric::Usage);
    let mut off_total: u64 = 0;
    let mut on_total: u64 = 0;

    let mut previous = None;
    for event in &sanitized {
        check_order(previous, event)?;
        match event.state {
            State::Off => off_total += u64::from(event.timestamp),
            State::On => on_total += u64::from(event.timestamp),
            State::AutoOff => return Err(UsageError::InvalidState(event.state.to_string())),
        }
        trace!(state = %event.state, timestamp = event.timestamp, "usage step");
        previous = Some(event);
    }

    Ok(off_total - on_total)
}

/// Minutes during which the appliance was held off by the auto-off device.
///
/// Each `auto-off` interval runs until the next kept transition, or to the end
/// of the period when it is the last one. Manual offs directly after an
/// `auto-off` have already been dropped, so they never cut an interval short.
///
/// # Errors
///
/// Returns [`UsageError::OutOfOrder`] if timestamps are not ascending or an
/// unterminated `auto-off` starts beyond the period end.
pub fn energy_savings(profile: &UsageProfile) -> Result<u64, UsageError> {
    let sanitized = sanitize(profile, Metric::Savings);
    let mut savings: u64 = 0;

    for (index, event) in sanitized.iter().enumerate() {
        let next = sanitized.get(index + 1);
        if let Some(next) = next {
            check_order(Some(event), next)?;
        }
        if event.state != State::AutoOff {
            continue;
        }
        let until: Minutes = next.map_or(PERIOD_MINUTES, |n| n.timestamp);
        let saved = until
            .checked_sub(event.timestamp)
            .ok_or(UsageError::OutOfOrder {
                previous: event.timestamp,
                timestamp: until,
            })?;
        trace!(from = event.timestamp, until, saved, "auto-off interval");
        savings += u64::from(saved);
    }

    Ok(savings)
}

/// Dispatches to [`energy_usage`] or [`energy_savings`].
///
/// # Errors
///
/// Propagates the selected aggregator's error.
pub fn aggregate(profile: &UsageProfile, metric: Metric) -> Result<u64, UsageError> {
    match metric {
        Metric::Usage => energy_usage(profile),
        Metric::Savings => energy_savings(profile),
    }
}
