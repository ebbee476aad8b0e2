use std::fmt;

use tracing::info;

use crate::config::Scope;
use crate::usage::{
    Day, Metric, MonthReport, UsageError, UsageProfile, aggregate, savings_for_day, usage_for_day,
};

/// Result of running one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutput {
    /// Minutes over a single period.
    Period { metric: Metric, minutes: u64 },
    /// Minutes over one day of a month profile.
    Day {
        metric: Metric,
        day: Day,
        minutes: u64,
    },
    /// Minutes for every day of a month profile.
    Month(MonthReport),
}

/// One flattened line of a report, as written to CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRow {
    /// Day number, absent for single-period reports.
    pub day: Option<Day>,
    pub metric: Metric,
    pub minutes: u64,
}

impl ReportOutput {
    pub fn metric(&self) -> Metric {
        match self {
            Self::Period { metric, .. } | Self::Day { metric, .. } => *metric,
            Self::Month(report) => report.metric,
        }
    }

    /// Flattens the output into rows, one per measured window.
    pub fn rows(&self) -> Vec<ReportRow> {
        match self {
            Self::Period { metric, minutes } => vec![ReportRow {
                day: None,
                metric: *metric,
                minutes: *minutes,
            }],
            Self::Day {
                metric,
                day,
                minutes,
            } => vec![ReportRow {
                day: Some(*day),
                metric: *metric,
                minutes: *minutes,
            }],
            Self::Month(report) => report
                .days
                .iter()
                .map(|d| ReportRow {
                    day: Some(d.day),
                    metric: report.metric,
                    minutes: d.minutes,
                })
                .collect(),
        }
    }
}

impl fmt::Display for ReportOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Period { metric, minutes } => write!(f, "{metric}: {minutes} min"),
            Self::Day {
                metric,
                day,
                minutes,
            } => write!(f, "{metric} on day {day}: {minutes} min"),
            Self::Month(report) => write!(f, "{report}"),
        }
    }
}

/// Computes `metric` for `profile` over `scope`.
///
/// # Errors
///
/// Returns the aggregation's `UsageError` unchanged.
pub fn run_report(
    profile: &UsageProfile,
    metric: Metric,
    scope: Scope,
) -> Result<ReportOutput, UsageError> {
    let output = match scope {
        Scope::Single => ReportOutput::Period {
            metric,
            minutes: aggregate(profile, metric)?,
        },
        Scope::Day(day) => {
            let minutes = match metric {
                Metric::Usage => usage_for_day(profile, day)?,
                Metric::Savings => savings_for_day(profile, day)?,
            };
            ReportOutput::Day {
                metric,
                day,
                minutes,
            }
        }
        Scope::Month => ReportOutput::Month(MonthReport::from_profile(profile, metric)?),
    };
    info!(%metric, ?scope, events = profile.events.len(), "report complete");
    Ok(output)
}
