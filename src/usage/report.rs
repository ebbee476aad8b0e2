//! Per-day breakdown of a month-scale profile.

use std::fmt;

use serde::Serialize;

use super::aggregate::aggregate;
use super::day::slice_day;
use super::error::UsageError;
use super::types::{Day, Metric, UsageProfile};

/// Minutes measured for one day of the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayTotal {
    /// Day number (1-based).
    pub day: Day,
    /// Minutes of usage or savings on that day.
    pub minutes: u64,
}

/// Daily totals for every day of a month profile.
///
/// Computed by slicing the month once per day and running the single-day
/// aggregator on each slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthReport {
    /// Quantity measured.
    pub metric: Metric,
    /// One entry per day, days 1 through 31 in order.
    pub days: Vec<DayTotal>,
    /// Sum of all daily minutes.
    pub total_minutes: u64,
}

impl MonthReport {
    /// Aggregates `metric` for each day of the month.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a day's aggregation.
    pub fn from_profile(profile: &UsageProfile, metric: Metric) -> Result<Self, UsageError> {
        let days = Day::all()
            .map(|day| {
                aggregate(&slice_day(profile, day, metric), metric)
                    .map(|minutes| DayTotal { day, minutes })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let total_minutes = days.iter().map(|d| d.minutes).sum();

        Ok(Self {
            metric,
            days,
            total_minutes,
        })
    }

    /// Day with the most minutes; the earliest wins a tie.
    pub fn peak_day(&self) -> Option<DayTotal> {
        self.days
            .iter()
            .copied()
            .reduce(|best, d| if d.minutes > best.minutes { d } else { best })
    }

    /// Minutes recorded for `day`.
    pub fn minutes_for(&self, day: Day) -> u64 {
        self.days
            .iter()
            .find(|d| d.day == day)
            .map_or(0, |d| d.minutes)
    }
}

impl fmt::Display for MonthReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Monthly {} Report ---", self.metric)?;
        for d in &self.days {
            writeln!(f, "Day {:>2}: {:>4} min", d.day, d.minutes)?;
        }
        if let Some(peak) = self.peak_day() {
            writeln!(f, "Peak day:      {} ({} min)", peak.day, peak.minutes)?;
        }
        write!(f, "Total:         {} min", self.total_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usage::types::{Event, PERIOD_MINUTES, State};

    fn day(n: u32) -> Day {
        Day::try_from(n).unwrap()
    }

    #[test]
    fn always_on_month() {
        let p = UsageProfile::new(State::On, Vec::new());
        let report = MonthReport::from_profile(&p, Metric::Usage).unwrap();
        assert_eq!(report.days.len(), 31);
        assert_eq!(report.total_minutes, 31 * u64::from(PERIOD_MINUTES));
    }

    #[test]
    fn peak_and_lookup() {
        let p = UsageProfile::new(
            State::Off,
            vec![
                Event::new(State::On, 100),
                Event::new(State::Off, 200),
                Event::new(State::On, 3000),
                Event::new(State::Off, 3500),
            ],
        );
        let report = MonthReport::from_profile(&p, Metric::Usage).unwrap();
        assert_eq!(report.minutes_for(day(1)), 100);
        assert_eq!(report.minutes_for(day(3)), 500);
        assert_eq!(report.minutes_for(day(4)), 0);
        assert_eq!(report.total_minutes, 600);
        assert_eq!(report.peak_day().map(|d| d.day), Some(day(3)));
    }

    #[test]
    fn usage_report_fails_on_auto_off() {
        let p = UsageProfile::new(State::On, vec![Event::new(State::AutoOff, 10)]);
        assert!(MonthReport::from_profile(&p, Metric::Usage).is_err());
        let savings = MonthReport::from_profile(&p, Metric::Savings).unwrap();
        assert_eq!(savings.minutes_for(day(1)), 1430);
    }

    #[test]
    fn display_lists_every_day() {
        let p = UsageProfile::new(State::Off, Vec::new());
        let report = MonthReport::from_profile(&p, Metric::Usage).unwrap();
        let text = report.to_string();
        assert!(text.starts_with("--- Monthly usage Report ---"));
        assert!(text.contains("Day 31:"));
        assert!(text.ends_with("Total:         0 min"));
    }
}
