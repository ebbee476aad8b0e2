//! Core usage types: appliance states, events, profiles, and day numbers.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{DayError, UsageError};

/// Minute offset from the start of a period (single-day) or the epoch (month).
pub type Minutes = u32;

/// Length of one measurement period in minutes (one day).
pub const PERIOD_MINUTES: Minutes = 1440;

/// First valid day number of a month-scale profile.
pub const MIN_DAY: u32 = 1;

/// Last valid day number of a month-scale profile.
pub const MAX_DAY: u32 = 31;

/// Appliance state carried by an event.
///
/// Serialized as `"on"`, `"off"` and `"auto-off"`. Any other string is
/// rejected at deserialization with [`UsageError::InvalidState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum State {
    /// Switched on.
    On,
    /// Switched off manually.
    Off,
    /// Switched off by the energy-saving device.
    AutoOff,
}

impl State {
    /// Wire name of the state.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
            Self::AutoOff => "auto-off",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for State {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            "auto-off" => Ok(Self::AutoOff),
            other => Err(UsageError::InvalidState(other.to_string())),
        }
    }
}

impl TryFrom<String> for State {
    type Error = UsageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A single state change at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Event {
    /// New appliance state.
    pub state: State,
    /// Minutes since the start of the period (or epoch).
    pub timestamp: Minutes,
}

impl Event {
    /// Creates an event switching to `state` at `timestamp`.
    pub fn new(state: State, timestamp: Minutes) -> Self {
        Self { state, timestamp }
    }
}

/// One measurement window: the state at minute zero plus the ordered events.
///
/// Events are expected in ascending timestamp order and are never re-sorted.
///
/// # Examples
///
/// ```
/// use appliance_usage::usage::{Event, State, UsageProfile};
///
/// let profile = UsageProfile::new(State::On, vec![Event::new(State::Off, 50)]);
/// assert_eq!(profile.events.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UsageProfile {
    /// Appliance state at timestamp zero.
    pub initial: State,
    /// State changes, ascending by timestamp.
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Default for UsageProfile {
    fn default() -> Self {
        Self::new(State::Off, Vec::new())
    }
}

impl UsageProfile {
    /// Creates a profile from an initial state and its events.
    pub fn new(initial: State, events: Vec<Event>) -> Self {
        Self { initial, events }
    }

    /// Parses a profile from its JSON record form.
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if the JSON is malformed or a state is unknown.
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Reads and parses a JSON profile file.
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` if the file cannot be read or does not parse.
    pub fn from_json_file(path: &Path) -> std::io::Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_json_str(&content)?)
    }

    /// Returns `true` when any event or the initial state is `auto-off`.
    pub fn has_auto_off(&self) -> bool {
        self.initial == State::AutoOff || self.events.iter().any(|e| e.state == State::AutoOff)
    }

    /// Index of the first event whose timestamp is lower than its predecessor's.
    pub fn first_out_of_order(&self) -> Option<usize> {
        self.events
            .windows(2)
            .position(|pair| pair[1].timestamp < pair[0].timestamp)
            .map(|i| i + 1)
    }
}

/// Which quantity an aggregation measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Minutes the appliance was on.
    Usage,
    /// Minutes saved by automatic shutoff.
    Savings,
}

impl Metric {
    /// Lowercase name used in config files and CSV output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Usage => "usage",
            Self::Savings => "savings",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "usage" => Ok(Self::Usage),
            "savings" => Ok(Self::Savings),
            other => Err(format!(
                "must be \"usage\" or \"savings\", got \"{other}\""
            )),
        }
    }
}

/// Validated 1-based day number within a month-scale profile.
///
/// The integer check always runs before the range check, so `1.5` reports
/// [`DayError::NotInteger`] and `0` reports [`DayError::OutOfRange`].
///
/// # Examples
///
/// ```
/// use appliance_usage::usage::Day;
///
/// assert_eq!(Day::try_from(3_u32).map(Day::get), Ok(3));
/// assert!(Day::try_from(1.5_f64).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Day(u32);

impl Day {
    /// The day number, in `[MIN_DAY, MAX_DAY]`.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Iterates every valid day of the month in order.
    pub fn all() -> impl Iterator<Item = Day> {
        (MIN_DAY..=MAX_DAY).map(Day)
    }

    /// Minute offset of this day's start relative to the epoch.
    pub fn start_minute(self) -> Minutes {
        PERIOD_MINUTES * (self.0 - 1)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<u32> for Day {
    type Error = DayError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if (MIN_DAY..=MAX_DAY).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DayError::OutOfRange)
        }
    }
}

impl TryFrom<i64> for Day {
    type Error = DayError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .map_err(|_| DayError::OutOfRange)
            .and_then(Day::try_from)
    }
}

impl TryFrom<i32> for Day {
    type Error = DayError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Day::try_from(i64::from(value))
    }
}

impl TryFrom<f64> for Day {
    type Error = DayError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(DayError::NotInteger);
        }
        if value < f64::from(MIN_DAY) || value > f64::from(MAX_DAY) {
            return Err(DayError::OutOfRange);
        }
        // Integral and within [1, 31], so the cast is exact.
        Ok(Self(value as u32))
    }
}

impl FromStr for Day {
    type Err = DayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s.trim().parse().map_err(|_| DayError::NotInteger)?;
        Day::try_from(value)
    }
}
