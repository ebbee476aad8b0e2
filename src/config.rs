//! TOML-based report configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::usage::{Day, Event, Metric, PERIOD_MINUTES, State, UsageProfile};

/// Top-level report configuration parsed from TOML.
///
/// The `[report]` section selects what to compute; `[profile]` carries the
/// event stream. Load from TOML with [`ReportConfig::from_toml_file`] or use
/// one of the built-in presets.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// What to compute and over which window.
    #[serde(default)]
    pub report: ReportSection,
    /// Appliance state-change profile.
    #[serde(default)]
    pub profile: UsageProfile,
}

/// Report selection parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportSection {
    /// Quantity: `"usage"` or `"savings"`.
    pub metric: String,
    /// Window: `"single"`, `"day"` or `"month"`.
    pub scope: String,
    /// Day number for the `"day"` scope. Kept as a float so that a
    /// fractional value can be rejected with a precise message.
    pub day: f64,
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            metric: "usage".to_string(),
            scope: "single".to_string(),
            day: 1.0,
        }
    }
}

/// Window a report is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The whole profile is one period.
    Single,
    /// One day sliced out of a month profile.
    Day(Day),
    /// Every day of a month profile.
    Month,
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"report.day"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

fn events(list: &[(State, u32)]) -> Vec<Event> {
    list.iter().map(|&(s, t)| Event::new(s, t)).collect()
}

impl ReportConfig {
    /// Appliance switched on at minute zero and never switched off.
    pub fn always_on() -> Self {
        Self {
            report: ReportSection::default(),
            profile: UsageProfile::new(State::Off, events(&[(State::On, 0)])),
        }
    }

    /// A typical day with two "on" stretches.
    pub fn weekday() -> Self {
        Self {
            report: ReportSection::default(),
            profile: UsageProfile::new(
                State::On,
                events(&[(State::Off, 50), (State::On, 304), (State::Off, 600)]),
            ),
        }
    }

    /// Auto-off savings with a redundant manual off.
    pub fn auto_off() -> Self {
        Self {
            report: ReportSection {
                metric: "savings".to_string(),
                ..ReportSection::default()
            },
            profile: UsageProfile::new(
                State::On,
                events(&[(State::AutoOff, 100), (State::Off, 200)]),
            ),
        }
    }

    /// A month profile spanning several days, reported per day.
    pub fn month() -> Self {
        Self {
            report: ReportSection {
                scope: "month".to_string(),
                ..ReportSection::default()
            },
            profile: UsageProfile::new(
                State::Off,
                events(&[
                    (State::On, 420),
                    (State::Off, 540),
                    (State::On, 1080),
                    (State::Off, 1500),
                    (State::On, 2300),
                    (State::On, 2400),
                    (State::Off, 2700),
                    (State::On, 7000),
                    (State::Off, 12000),
                ]),
            ),
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["always_on", "weekday", "auto_off", "month"];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "always_on" => Ok(Self::always_on()),
            "weekday" => Ok(Self::weekday()),
            "auto_off" => Ok(Self::auto_off()),
            "month" => Ok(Self::month()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid, contains unknown fields,
    /// or names an unknown appliance state.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Parsed `report.metric`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the field if the metric is unknown.
    pub fn metric(&self) -> Result<Metric, ConfigError> {
        self.report.metric.parse().map_err(|message| ConfigError {
            field: "report.metric".into(),
            message,
        })
    }

    /// Parsed `report.scope`, with the day validated for the `"day"` scope.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the scope is unknown or the day is invalid.
    pub fn scope(&self) -> Result<Scope, ConfigError> {
        match self.report.scope.as_str() {
            "single" => Ok(Scope::Single),
            "month" => Ok(Scope::Month),
            "day" => Day::try_from(self.report.day)
                .map(Scope::Day)
                .map_err(|e| ConfigError {
                    field: "report.day".into(),
                    message: e.to_string(),
                }),
            other => Err(ConfigError {
                field: "report.scope".into(),
                message: format!("must be \"single\", \"day\" or \"month\", got \"{other}\""),
            }),
        }
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let metric = self.metric().map_err(|e| errors.push(e)).ok();
        let scope = self.scope().map_err(|e| errors.push(e)).ok();

        let p = &self.profile;
        if let Some(index) = p.first_out_of_order() {
            errors.push(ConfigError {
                field: format!("profile.events[{index}]"),
                message: "timestamp must not be lower than the previous event".into(),
            });
        }
        if metric == Some(Metric::Usage) && p.has_auto_off() {
            errors.push(ConfigError {
                field: "profile".into(),
                message: "\"auto-off\" states require report.metric = \"savings\"".into(),
            });
        }
        if scope == Some(Scope::Single) {
            if let Some(index) = p.events.iter().position(|e| e.timestamp > PERIOD_MINUTES) {
                errors.push(ConfigError {
                    field: format!("profile.events[{index}].timestamp"),
                    message: format!("must be <= {PERIOD_MINUTES} for a single-period report"),
                });
            }
        }

        errors
    }
}
