//! Slicing of month-scale profiles into single-day profiles.
//!
//! Timestamps in a month profile count minutes from the epoch (midnight of
//! day 1). A timestamp belongs to day `ceil(timestamp / 1440)`, so a timestamp
//! that lands exactly on a day boundary is attributed to the day that just
//! ended, and timestamp `0` belongs to no valid day.

use tracing::debug;

use super::aggregate::aggregate;
use super::error::UsageError;
use super::normalize::filter_for;
use super::types::{Day, Event, Metric, PERIOD_MINUTES, State, UsageProfile};

/// An event tagged with the day number that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DayEvent {
    day: u32,
    event: Event,
}

/// Day number owning a month-scale timestamp.
pub fn owning_day(timestamp: u32) -> u32 {
    timestamp.div_ceil(PERIOD_MINUTES)
}

fn annotate(events: &[Event]) -> Vec<DayEvent> {
    events
        .iter()
        .map(|&event| DayEvent {
            day: owning_day(event.timestamp),
            event,
        })
        .collect()
}

/// State in force when `day` starts: the last event of the nearest earlier day
/// that has any events, or the month's initial state if none does.
fn initial_state_for_day(annotated: &[DayEvent], day: Day, month_initial: State) -> State {
    for earlier in (1..day.get()).rev() {
        for tagged in annotated.iter().rev() {
            if tagged.day == earlier {
                return tagged.event.state;
            }
        }
    }
    month_initial
}

/// Builds the single-day profile equivalent to `day` of a month profile.
///
/// The month's events are first filtered for `metric` (without boundary
/// padding), then the day's events are rewritten relative to the day's start.
pub fn slice_day(profile: &UsageProfile, day: Day, metric: Metric) -> UsageProfile {
    let annotated = annotate(&filter_for(&profile.events, metric));
    let initial = initial_state_for_day(&annotated, day, profile.initial);
    let offset = day.start_minute();

    let events: Vec<Event> = annotated
        .iter()
        .filter(|tagged| tagged.day == day.get())
        .map(|tagged| Event::new(tagged.event.state, tagged.event.timestamp - offset))
        .collect();

    debug!(%day, %initial, events = events.len(), "sliced day profile");
    UsageProfile::new(initial, events)
}

fn aggregate_for_day<D>(profile: &UsageProfile, day: D, metric: Metric) -> Result<u64, UsageError>
where
    D: TryInto<Day>,
    UsageError: From<D::Error>,
{
    let day: Day = day.try_into()?;
    aggregate(&slice_day(profile, day, metric), metric)
}

/// Minutes the appliance was on during `day` of a month-scale profile.
///
/// `day` is validated before any computation: non-integers fail with
/// "must be an integer", values outside `[1, 31]` with "day out of range".
///
/// # Errors
///
/// Returns [`UsageError::InvalidDay`] for a bad day, otherwise whatever
/// [`energy_usage`](super::energy_usage) reports for the sliced profile.
///
/// # Examples
///
/// ```
/// use appliance_usage::usage::{Event, State, UsageProfile, usage_for_day};
///
/// let month = UsageProfile::new(State::Off, vec![Event::new(State::On, 1500)]);
/// assert_eq!(usage_for_day(&month, 2_u32), Ok(1380));
/// assert!(usage_for_day(&month, 1.5).is_err());
/// ```
pub fn usage_for_day<D>(profile: &UsageProfile, day: D) -> Result<u64, UsageError>
where
    D: TryInto<Day>,
    UsageError: From<D::Error>,
{
    aggregate_for_day(profile, day, Metric::Usage)
}

/// Minutes saved by auto-off during `day` of a month-scale profile.
///
/// # Errors
///
/// Returns [`UsageError::InvalidDay`] for a bad day, otherwise whatever
/// [`energy_savings`](super::energy_savings) reports for the sliced profile.
pub fn savings_for_day<D>(profile: &UsageProfile, day: D) -> Result<u64, UsageError>
where
    D: TryInto<Day>,
    UsageError: From<D::Error>,
{
    aggregate_for_day(profile, day, Metric::Savings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usage::error::DayError;

    fn day(n: u32) -> Day {
        Day::try_from(n).unwrap()
    }

    fn month(initial: State, events: &[(State, u32)]) -> UsageProfile {
        UsageProfile::new(
            initial,
            events.iter().map(|&(s, t)| Event::new(s, t)).collect(),
        )
    }

    #[test]
    fn owning_day_uses_ceiling() {
        assert_eq!(owning_day(0), 0);
        assert_eq!(owning_day(1), 1);
        assert_eq!(owning_day(1440), 1);
        assert_eq!(owning_day(1441), 2);
        assert_eq!(owning_day(2880), 2);
    }

    #[test]
    fn rejects_invalid_days_before_computing() {
        let p = month(State::On, &[(State::AutoOff, 5)]);
        assert_eq!(
            usage_for_day(&p, 0_u32),
            Err(UsageError::InvalidDay(DayError::OutOfRange))
        );
        assert_eq!(
            usage_for_day(&p, 32_i64),
            Err(UsageError::InvalidDay(DayError::OutOfRange))
        );
        let err = usage_for_day(&p, 1.5).unwrap_err();
        assert_eq!(err.to_string(), "must be an integer");
        let err = usage_for_day(&p, 0.0).unwrap_err();
        assert_eq!(err.to_string(), "day out of range");
    }

    #[test]
    fn accepts_validated_day() {
        let p = month(State::On, &[]);
        assert_eq!(usage_for_day(&p, day(4)), Ok(1440));
    }

    #[test]
    fn first_day_uses_month_initial() {
        let p = month(State::On, &[(State::Off, 100), (State::On, 2000)]);
        assert_eq!(usage_for_day(&p, 1_u32), Ok(100));
    }

    #[test]
    fn initial_state_carries_from_previous_day() {
        let p = month(
            State::Off,
            &[(State::On, 1000), (State::Off, 1200), (State::On, 1400)],
        );
        let sliced = slice_day(&p, day(2), Metric::Usage);
        assert_eq!(sliced.initial, State::On);
        assert!(sliced.events.is_empty());
        assert_eq!(usage_for_day(&p, 2_u32), Ok(1440));
    }

    #[test]
    fn initial_state_skips_quiet_days() {
        let p = month(State::Off, &[(State::On, 100), (State::Off, 5000)]);
        // day 4 spans (4320, 5760]; days 2 and 3 are quiet, day 1 ended on.
        let sliced = slice_day(&p, day(4), Metric::Usage);
        assert_eq!(sliced.initial, State::On);
        assert_eq!(sliced.events, vec![Event::new(State::Off, 680)]);
        assert_eq!(usage_for_day(&p, 4_u32), Ok(680));
        assert_eq!(usage_for_day(&p, 3_u32), Ok(1440));
    }

    #[test]
    fn falls_back_to_month_initial_without_earlier_events() {
        let p = month(State::On, &[(State::Off, 3000)]);
        assert_eq!(slice_day(&p, day(3), Metric::Usage).initial, State::On);
        assert_eq!(usage_for_day(&p, 3_u32), Ok(120));
    }

    #[test]
    fn boundary_timestamp_belongs_to_previous_day() {
        let p = month(State::Off, &[(State::On, 1440)]);
        let day_one = slice_day(&p, day(1), Metric::Usage);
        assert_eq!(day_one.events, vec![Event::new(State::On, 1440)]);
        assert_eq!(usage_for_day(&p, 1_u32), Ok(0));
        assert_eq!(usage_for_day(&p, 2_u32), Ok(1440));
    }

    #[test]
    fn month_duplicates_are_removed_before_slicing() {
        let p = month(
            State::Off,
            &[(State::On, 100), (State::On, 1500), (State::Off, 1600)],
        );
        let sliced = slice_day(&p, day(2), Metric::Usage);
        assert_eq!(sliced.initial, State::On);
        assert_eq!(sliced.events, vec![Event::new(State::Off, 160)]);
    }

    #[test]
    fn savings_slice_drops_redundant_off_across_days() {
        let p = month(
            State::On,
            &[(State::AutoOff, 1000), (State::Off, 1100), (State::On, 1500)],
        );
        assert_eq!(slice_day(&p, day(2), Metric::Savings).initial, State::AutoOff);
        assert_eq!(savings_for_day(&p, 1_u32), Ok(440));
        assert_eq!(savings_for_day(&p, 2_u32), Ok(60));
    }
}
