use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use super::errors::{ConfigErrorKind, NoSuchEvent, SolariumError};

type Result<T, E = SolariumError> = std::result::Result<T, E>;

/// Angle north (positive) or south (negative) of the equator, in decimal
/// degrees. Valid between -90.0 and 90.0 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Latitude(pub f64);

/// Angle east (positive) or west (negative) of the prime meridian, in decimal
/// degrees. Valid between -180.0 and 180.0 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Longitude(pub f64);

impl Latitude {
    pub fn new(value: f64) -> Result<Self> {
        if (-90.0..=90.0).contains(&value) {
            Ok(Latitude(value))
        } else {
            Err(SolariumError::Config(ConfigErrorKind::InvalidCoordinates(
                "latitude must be a number between -90.0 and 90.0",
            )))
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        value
            .parse::<f64>()
            .map_err(|_| {
                SolariumError::Config(ConfigErrorKind::InvalidCoordinates(
                    "latitude must be a number between -90.0 and 90.0",
                ))
            })
            .and_then(Self::new)
    }
}

impl Longitude {
    pub fn new(value: f64) -> Result<Self> {
        if (-180.0..=180.0).contains(&value) {
            Ok(Longitude(value))
        } else {
            Err(SolariumError::Config(ConfigErrorKind::InvalidCoordinates(
                "longitude must be a number between -180.0 and 180.0",
            )))
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        value
            .parse::<f64>()
            .map_err(|_| {
                SolariumError::Config(ConfigErrorKind::InvalidCoordinates(
                    "longitude must be a number between -180.0 and 180.0",
                ))
            })
            .and_then(Self::new)
    }
}

impl fmt::Display for Latitude {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let hemisphere = if self.0 < 0.0 { "S" } else { "N" };
        write!(f, "{:.4}{}", self.0.abs(), hemisphere)
    }
}

impl fmt::Display for Longitude {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let hemisphere = if self.0 < 0.0 { "W" } else { "E" };
        write!(f, "{:.4}{}", self.0.abs(), hemisphere)
    }
}

/// A point on the Earth's surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: Latitude,
    pub longitude: Longitude,
}

impl Coordinates {
    pub fn new(latitude: Latitude, longitude: Longitude) -> Self {
        Coordinates {
            latitude,
            longitude,
        }
    }
}

/// The action selected on the command line.
pub enum Action {
    Report { json: bool },
    Poll { watch: bool, json: bool },
}

/// Whether the sky is lit at a given instant.
///
/// `Light` between sunrise and sunset, `Dark` otherwise. When an event does
/// not occur, the whole day takes the phase that the polar condition implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPhase {
    Light,
    Dark,
}

impl DayPhase {
    pub fn from_events(
        sunrise: Result<DateTime<FixedOffset>, NoSuchEvent>,
        sunset: Result<DateTime<FixedOffset>, NoSuchEvent>,
        now: DateTime<FixedOffset>,
    ) -> Self {
        match (sunrise, sunset) {
            (Ok(sunrise), Ok(sunset)) => {
                if now < sunrise || now >= sunset {
                    DayPhase::Dark
                } else {
                    DayPhase::Light
                }
            }
            (Err(NoSuchEvent::NeverRises), _) | (_, Err(NoSuchEvent::NeverRises)) => DayPhase::Dark,
            (Err(NoSuchEvent::NeverSets), _) | (_, Err(NoSuchEvent::NeverSets)) => DayPhase::Light,
        }
    }
}

impl fmt::Display for DayPhase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DayPhase::Light => write!(f, "light"),
            DayPhase::Dark => write!(f, "dark"),
        }
    }
}
