use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat};
use serde::{Serialize, Serializer};

use super::calc::SunCalculations;
use super::domain::{Coordinates, DayPhase};
use super::errors::NoSuchEvent;

type EventTime = Result<DateTime<FixedOffset>, NoSuchEvent>;

/// A day's solar events for one location, renderable as a text block or JSON.
#[derive(Debug, Serialize)]
pub struct Report {
    location: Coordinates,
    date: NaiveDate,
    #[serde(serialize_with = "serialize_event")]
    sunrise: EventTime,
    #[serde(serialize_with = "serialize_event")]
    sunset: EventTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    day_length: Option<String>,
}

impl Report {
    pub fn new(solar_calculations: SunCalculations) -> Self {
        let sunrise = solar_calculations.sunrise();
        let sunset = solar_calculations.sunset();
        let day_length = match (&sunrise, &sunset) {
            (Ok(sunrise), Ok(sunset)) => {
                let minutes = (*sunset - *sunrise).num_minutes();
                Some(format!("{:02}:{:02}", minutes / 60, minutes % 60))
            }
            _ => None,
        };

        Report {
            location: solar_calculations.coordinates,
            date: solar_calculations.date.date_naive(),
            sunrise,
            sunset,
            day_length,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "LOCATION")?;
        writeln!(f, "--------")?;
        writeln!(f, "Latitude:  {}", self.location.latitude)?;
        writeln!(f, "Longitude: {}", self.location.longitude)?;
        writeln!(f)?;
        writeln!(f, "DATE")?;
        writeln!(f, "----")?;
        writeln!(f, "{}", self.date)?;
        writeln!(f)?;
        writeln!(f, "Sunrise is at: {}", display_event(&self.sunrise))?;
        writeln!(f, "Sunset is at:  {}", display_event(&self.sunset))?;
        if let Some(day_length) = &self.day_length {
            writeln!(f, "Day length is: {day_length}")?;
        }
        Ok(())
    }
}

/// Snapshot of the sun's state at the instant the calculations were made for.
#[derive(Debug, Serialize)]
pub struct PollReport {
    now: DateTime<FixedOffset>,
    phase: DayPhase,
    #[serde(serialize_with = "serialize_event")]
    sunrise: EventTime,
    #[serde(serialize_with = "serialize_event")]
    sunset: EventTime,
}

impl PollReport {
    pub fn new(solar_calculations: &SunCalculations) -> Self {
        PollReport {
            now: solar_calculations.date,
            phase: solar_calculations.day_phase(),
            sunrise: solar_calculations.sunrise(),
            sunset: solar_calculations.sunset(),
        }
    }
}

impl fmt::Display for PollReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "Time:    {}",
            self.now.to_rfc3339_opts(SecondsFormat::Secs, false)
        )?;
        writeln!(f, "Phase:   {}", self.phase)?;
        writeln!(f, "Sunrise: {}", display_event(&self.sunrise))?;
        writeln!(f, "Sunset:  {}", display_event(&self.sunset))
    }
}

fn display_event(event: &EventTime) -> String {
    match event {
        Ok(instant) => instant.to_rfc3339_opts(SecondsFormat::Secs, false),
        Err(event) => event.as_str().to_string(),
    }
}

fn serialize_event<S>(event: &EventTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&display_event(event))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::domain::{Latitude, Longitude};

    fn calculations(
        latitude: f64,
        longitude: f64,
        year: i32,
        month: u32,
        day: u32,
        offset_hours: i32,
    ) -> SunCalculations {
        let zone = FixedOffset::east_opt(offset_hours * 3600).unwrap();
        SunCalculations::new(
            zone.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap(),
            Coordinates::new(
                Latitude::new(latitude).unwrap(),
                Longitude::new(longitude).unwrap(),
            ),
        )
    }

    #[test]
    fn report_renders_both_events() {
        let report = Report::new(calculations(51.5074, -0.1278, 2023, 1, 1, 0));
        let text = report.to_string();

        assert!(text.contains("Latitude:  51.5074N"), "got:\n{text}");
        assert!(text.contains("Sunrise is at: 2023-01-01T08:0"), "got:\n{text}");
        assert!(text.contains("Sunset is at:  2023-01-01T16:0"), "got:\n{text}");
        assert!(text.contains("Day length is: 07:5"), "got:\n{text}");
    }

    #[test]
    fn report_serializes_to_json() {
        let report = Report::new(calculations(51.5074, -0.1278, 2023, 1, 1, 0));
        let json = serde_json::to_string(&report).unwrap();

        assert!(json.contains("\"latitude\":51.5074"), "got: {json}");
        assert!(json.contains("\"date\":\"2023-01-01\""), "got: {json}");
        assert!(json.contains("\"sunrise\":\"2023-01-01T08:0"), "got: {json}");
    }

    #[test]
    fn polar_day_report_marks_the_missing_sunset() {
        let report = Report::new(calculations(78.0, 15.0, 2023, 6, 21, 2));
        let json = serde_json::to_string(&report).unwrap();

        assert!(json.contains("\"sunset\":\"never sets\""), "got: {json}");
        assert!(!json.contains("day_length"), "got: {json}");
    }

    #[test]
    fn poll_report_includes_the_phase() {
        let poll = PollReport::new(&calculations(51.5074, -0.1278, 2023, 1, 1, 0));
        let json = serde_json::to_string(&poll).unwrap();

        assert!(json.contains("\"phase\":\"light\""), "got: {json}");

        let text = poll.to_string();
        assert!(text.contains("Phase:   light"), "got:\n{text}");
    }
}
