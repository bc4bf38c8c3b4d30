//! Sunrise and sunset times for a location and calendar date, reported in any
//! fixed-offset time zone.
//!
//! The heart of the crate is [`calc`], which implements the almanac
//! sunrise/sunset approximation and either returns the event's instant or a
//! [`NoSuchEvent`] marker for polar days and nights. [`domain`] holds the
//! validated coordinate types and the light/dark [`domain::DayPhase`]
//! classification that appearance automations key off. The remaining modules
//! wrap the calculator in the `report` and `poll` commands of the binary.

pub mod calc;
pub mod cli;
pub mod domain;
pub mod errors;
pub mod report;
pub mod subcommands;

pub use calc::{sunrise, sunset};
pub use errors::{NoSuchEvent, SolariumError};
