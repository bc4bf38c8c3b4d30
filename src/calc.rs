//! Sunrise and sunset times from the standard almanac approximation.
//!
//! The calculation works on a single calendar date: the day of the year is fed
//! through the sun's mean anomaly, true longitude and declination to obtain
//! the local hour angle, which either yields the event's UTC time or shows
//! that the sun stays on one side of the horizon all day. Accuracy is on the
//! order of a minute, which is plenty for deciding whether it is light or
//! dark outside.

use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDate, TimeZone, Utc};

use super::domain::{Coordinates, DayPhase};
use super::errors::NoSuchEvent;

/// Zenith angle defining sunrise and sunset: the sun's upper limb touching
/// the horizon, including standard atmospheric refraction.
const ZENITH: f64 = 90.8;

const TO_RAD: f64 = std::f64::consts::PI / 180.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Sunrise,
    Sunset,
}

/// Solar event times for one location on one calendar date.
///
/// The stored date selects the day the events are calculated for; its offset
/// is the time zone the results are reported in.
#[derive(Debug, Clone, Copy)]
pub struct SunCalculations {
    pub date: DateTime<FixedOffset>,
    pub coordinates: Coordinates,
}

impl SunCalculations {
    pub fn new(date: DateTime<FixedOffset>, coordinates: Coordinates) -> Self {
        SunCalculations { date, coordinates }
    }

    pub fn sunrise(&self) -> Result<DateTime<FixedOffset>, NoSuchEvent> {
        self.event(Event::Sunrise)
    }

    pub fn sunset(&self) -> Result<DateTime<FixedOffset>, NoSuchEvent> {
        self.event(Event::Sunset)
    }

    /// Phase of the day at the instant carried by `self.date`.
    pub fn day_phase(&self) -> DayPhase {
        DayPhase::from_events(self.sunrise(), self.sunset(), self.date)
    }

    /// New calculations for the same location at a different instant.
    pub fn refresh(&self, date: DateTime<FixedOffset>) -> Self {
        SunCalculations::new(date, self.coordinates)
    }

    fn event(&self, event: Event) -> Result<DateTime<FixedOffset>, NoSuchEvent> {
        event_time(
            self.coordinates.latitude.0,
            self.coordinates.longitude.0,
            self.date.date_naive(),
            event,
        )
        .map(|instant| instant.with_timezone(&self.date.timezone()))
    }
}

/// Sunrise at the given coordinates.
///
/// `date` defaults to the current local date and `time_zone` to the current
/// local offset. Both defaults are resolved on every call, so a long-running
/// caller always sees the system's present date and zone.
pub fn sunrise(
    coordinates: Coordinates,
    date: Option<NaiveDate>,
    time_zone: Option<FixedOffset>,
) -> Result<DateTime<FixedOffset>, NoSuchEvent> {
    event_in_zone(coordinates, date, time_zone, Event::Sunrise)
}

/// Sunset at the given coordinates.
///
/// Defaults behave as for [`sunrise`].
pub fn sunset(
    coordinates: Coordinates,
    date: Option<NaiveDate>,
    time_zone: Option<FixedOffset>,
) -> Result<DateTime<FixedOffset>, NoSuchEvent> {
    event_in_zone(coordinates, date, time_zone, Event::Sunset)
}

fn event_in_zone(
    coordinates: Coordinates,
    date: Option<NaiveDate>,
    time_zone: Option<FixedOffset>,
    event: Event,
) -> Result<DateTime<FixedOffset>, NoSuchEvent> {
    let date = date.unwrap_or_else(|| Local::now().date_naive());
    let time_zone = time_zone.unwrap_or_else(|| *Local::now().offset());
    event_time(coordinates.latitude.0, coordinates.longitude.0, date, event)
        .map(|instant| instant.with_timezone(&time_zone))
}

fn event_time(
    latitude: f64,
    longitude: f64,
    date: NaiveDate,
    event: Event,
) -> Result<DateTime<Utc>, NoSuchEvent> {
    // A longitude offset by whole turns names the same meridian.
    let longitude = reduce_longitude(longitude);

    let n = day_of_year(date);
    let lng_hour = longitude / 15.0;

    // Approximate time of the event, in days.
    let t = match event {
        Event::Sunrise => n + ((6.0 - lng_hour) / 24.0),
        Event::Sunset => n + ((18.0 - lng_hour) / 24.0),
    };

    // Mean anomaly and true longitude, in degrees.
    let m = (0.9856 * t) - 3.289;
    let l = force_range(
        m + (1.916 * (TO_RAD * m).sin()) + (0.020 * (TO_RAD * 2.0 * m).sin()) + 282.634,
        360.0,
    );

    // Right ascension, brought into the same quadrant as L, then into hours.
    let mut ra = force_range((0.91764 * (TO_RAD * l).tan()).atan() / TO_RAD, 360.0);
    let l_quadrant = (l / 90.0).floor() * 90.0;
    let ra_quadrant = (ra / 90.0).floor() * 90.0;
    ra = (ra + (l_quadrant - ra_quadrant)) / 15.0;

    let sin_dec = 0.39782 * (TO_RAD * l).sin();
    let cos_dec = sin_dec.asin().cos();

    // Local hour angle. Outside [-1, 1] the sun never crosses the zenith
    // circle on this date.
    let cos_h = ((TO_RAD * ZENITH).cos() - (sin_dec * (TO_RAD * latitude).sin()))
        / (cos_dec * (TO_RAD * latitude).cos());
    if cos_h > 1.0 {
        return Err(NoSuchEvent::NeverRises);
    }
    if cos_h < -1.0 {
        return Err(NoSuchEvent::NeverSets);
    }

    let h = match event {
        Event::Sunrise => (360.0 - cos_h.acos() / TO_RAD) / 15.0,
        Event::Sunset => (cos_h.acos() / TO_RAD) / 15.0,
    };

    // Local mean time, adjusted back to UT.
    let t_local = h + ra - (0.06571 * t) - 6.622;
    let ut = force_range(t_local - lng_hour, 24.0);

    let mut hour = ut.floor() as u32;
    let mut minute = ((ut - ut.floor()) * 60.0).round() as u32;
    if minute == 60 {
        hour += 1;
        minute = 0;
    }

    // A minute carry past 23:59 lands the event on the next calendar day.
    let date = if hour == 24 {
        hour = 0;
        // Only `None` at NaiveDate::MAX, far outside the approximation's range.
        date.succ_opt().unwrap()
    } else {
        date
    };

    // In range by construction: hour < 24, minute < 60.
    let naive = date.and_hms_opt(hour, minute, 0).unwrap();
    Ok(Utc.from_utc_datetime(&naive))
}

/// Day of the year from the almanac's integer formula.
fn day_of_year(date: NaiveDate) -> f64 {
    let year = f64::from(date.year());
    let month = f64::from(date.month());
    let day = f64::from(date.day());

    let n1 = (275.0 * month / 9.0).floor();
    let n2 = ((month + 9.0) / 12.0).floor();
    let n3 = 1.0 + ((year - 4.0 * (year / 4.0).floor() + 2.0) / 3.0).floor();
    n1 - (n2 * n3) + day - 30.0
}

/// Force `value` into `[0, max)`, assuming it is at most one period out.
fn force_range(value: f64, max: f64) -> f64 {
    if value < 0.0 {
        value + max
    } else if value >= max {
        value - max
    } else {
        value
    }
}

fn reduce_longitude(longitude: f64) -> f64 {
    (longitude + 180.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::domain::{Latitude, Longitude};

    fn coordinates(latitude: f64, longitude: f64) -> Coordinates {
        Coordinates::new(
            Latitude::new(latitude).unwrap(),
            Longitude::new(longitude).unwrap(),
        )
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn day_of_year_matches_the_calendar() {
        assert_eq!(day_of_year(date(2023, 1, 1)), 1.0);
        assert_eq!(day_of_year(date(2023, 12, 31)), 365.0);
        assert_eq!(day_of_year(date(2024, 3, 1)), 61.0);
        assert_eq!(day_of_year(date(2024, 12, 31)), 366.0);
    }

    #[test]
    fn london_new_years_day() {
        let day = date(2023, 1, 1);
        let sunrise = event_time(51.5074, -0.1278, day, Event::Sunrise).unwrap();
        let sunset = event_time(51.5074, -0.1278, day, Event::Sunset).unwrap();

        let expected_sunrise = Utc.with_ymd_and_hms(2023, 1, 1, 8, 6, 0).unwrap();
        let expected_sunset = Utc.with_ymd_and_hms(2023, 1, 1, 16, 1, 0).unwrap();
        assert!(
            (sunrise - expected_sunrise).num_seconds().abs() <= 60,
            "sunrise was {sunrise}"
        );
        assert!(
            (sunset - expected_sunset).num_seconds().abs() <= 60,
            "sunset was {sunset}"
        );
    }

    #[test]
    fn the_equator_always_has_both_events() {
        for (month, day) in [(1, 1), (3, 20), (6, 21), (9, 23), (12, 21)] {
            let day = date(2023, month, day);
            assert!(event_time(0.0, 0.0, day, Event::Sunrise).is_ok());
            assert!(event_time(0.0, 0.0, day, Event::Sunset).is_ok());
        }
    }

    #[test]
    fn svalbard_midnight_sun() {
        let day = date(2023, 6, 21);
        assert_eq!(
            event_time(78.0, 15.0, day, Event::Sunset),
            Err(NoSuchEvent::NeverSets)
        );
    }

    #[test]
    fn svalbard_polar_night() {
        let day = date(2023, 12, 21);
        assert_eq!(
            event_time(78.0, 15.0, day, Event::Sunrise),
            Err(NoSuchEvent::NeverRises)
        );
    }

    #[test]
    fn sunrise_precedes_sunset() {
        let day = date(2024, 6, 21);
        let sunrise = event_time(52.5, 13.4, day, Event::Sunrise).unwrap();
        let sunset = event_time(52.5, 13.4, day, Event::Sunset).unwrap();
        assert!(sunrise < sunset);
    }

    #[test]
    fn a_whole_turn_of_longitude_changes_nothing() {
        let day = date(2024, 6, 21);
        let base = event_time(52.5, 13.4, day, Event::Sunrise).unwrap();
        let wrapped = event_time(52.5, 13.4 + 360.0, day, Event::Sunrise).unwrap();
        assert_eq!(base, wrapped);

        let base = event_time(40.7128, -74.0060, day, Event::Sunset).unwrap();
        let wrapped = event_time(40.7128, -74.0060 - 360.0, day, Event::Sunset).unwrap();
        assert_eq!(base, wrapped);
    }

    #[test]
    fn repeated_calls_agree() {
        let zone = FixedOffset::east_opt(3600).unwrap();
        let calculations = SunCalculations::new(
            zone.with_ymd_and_hms(2023, 1, 1, 12, 0, 0).unwrap(),
            coordinates(51.5074, -0.1278),
        );
        assert_eq!(calculations.sunrise(), calculations.sunrise());
        assert_eq!(calculations.sunset(), calculations.sunset());
    }

    #[test]
    fn results_carry_the_requested_zone() {
        let zone = FixedOffset::east_opt(2 * 3600).unwrap();
        let day = date(2024, 6, 21);

        let local = sunrise(coordinates(52.5, 13.4), Some(day), Some(zone)).unwrap();
        let utc = event_time(52.5, 13.4, day, Event::Sunrise).unwrap();

        assert_eq!(local.offset(), &zone);
        // Same instant, different clock face.
        assert_eq!(local, utc);
    }

    #[test]
    fn calculations_report_in_their_own_zone() {
        let zone = FixedOffset::west_opt(5 * 3600).unwrap();
        let calculations = SunCalculations::new(
            zone.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap(),
            coordinates(40.7128, -74.0060),
        );
        let sunrise = calculations.sunrise().unwrap();
        assert_eq!(sunrise.offset(), &zone);
        assert_eq!(sunrise.date_naive(), date(2024, 6, 21));
    }
}
