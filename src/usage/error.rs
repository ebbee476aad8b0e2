use std::convert::Infallible;

use thiserror::Error;

use super::types::Minutes;

/// Why a requested day number was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DayError {
    /// The value has a fractional part or is not a number.
    #[error("must be an integer")]
    NotInteger,
    /// The value lies outside `[1, 31]`.
    #[error("day out of range")]
    OutOfRange,
}

/// Errors raised while aggregating or slicing a usage profile.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    /// A state the aggregation cannot account for.
    #[error("INVALID_DATA: \"{0}\" state not supported")]
    InvalidState(String),
    /// The requested day is not an integer in `[1, 31]`.
    #[error(transparent)]
    InvalidDay(#[from] DayError),
    /// A timestamp runs backwards relative to the preceding event.
    #[error("event at minute {timestamp} precedes the event at minute {previous}")]
    OutOfOrder {
        /// Timestamp of the preceding event.
        previous: Minutes,
        /// Offending timestamp.
        timestamp: Minutes,
    },
}

impl From<Infallible> for UsageError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}
