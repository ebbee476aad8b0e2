//! Appliance energy-usage and auto-off savings metrics over event streams.

#[cfg(feature = "api")]
pub mod api;
pub mod cli;
pub mod config;
pub mod io;
/// Report execution for a loaded configuration.
pub mod runner;
pub mod usage;
