//! Energy-usage metrics computed from sparse on/off/auto-off event streams.
//!
//! Control flow for single-day profiles is normalize → aggregate; month-scale
//! profiles are first sliced into a single-day profile by [`day`].

pub mod aggregate;
pub mod day;
mod error;
/// Boundary padding and redundant-transition filtering.
pub mod normalize;
pub mod report;
mod types;

pub use aggregate::{aggregate, energy_savings, energy_usage};
pub use day::{savings_for_day, slice_day, usage_for_day};
pub use error::{DayError, UsageError};
pub use normalize::sanitize;
pub use report::{DayTotal, MonthReport};
pub use types::{
    Day, Event, MAX_DAY, MIN_DAY, Metric, Minutes, PERIOD_MINUTES, State, UsageProfile,
};
