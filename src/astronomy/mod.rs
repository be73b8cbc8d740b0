//! Astronomical calculation engine.
//!
//! All functions here are pure and deterministic for their inputs:
//! - [`moon`]: phase values, true phase instants, illumination and position
//! - [`sun`]: sunrise and sunset
//! - [`seasons`]: equinoxes and solstices
//! - [`hebrew`]: the arithmetic Hebrew calendar

pub mod ephemeris;
pub mod hebrew;
pub mod moon;
pub mod seasons;
pub mod sun;

pub use hebrew::{
    gregorian_to_hebrew, hebrew_dates_for_year, hebrew_month_names, hebrew_to_gregorian,
    is_hebrew_leap_year, HebrewDate, HebrewDateMapping, HebrewMonth,
};
pub use moon::{
    bright_limb_zenith_angle, classify_phase, is_full_moon_day, is_moon_phase_day,
    mean_phase_value, moon_illumination, moon_illumination_on, moon_phases_for_year,
    moon_position, phase_label, should_show_moon, MoonCalendar, MoonIllumination, MoonPhase,
    MoonPhaseData, MoonPosition,
};
pub use seasons::{seasonal_events, SeasonKind, SeasonalEvent};
pub use sun::{sunrise_sunset, SunriseSunset};

use serde::Serialize;

/// Sunrise and sunset on the day of a seasonal event.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalDaylight {
    /// The event
    pub event: SeasonalEvent,
    /// Sun times on the event's date
    pub sun: SunriseSunset,
}

/// Year summary: principal moon phases plus seasonal events with daylight.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Almanac {
    /// Gregorian year
    pub year: i32,
    /// Observer latitude in degrees
    pub latitude: f64,
    /// Observer longitude in degrees
    pub longitude: f64,
    /// Principal phases in chronological order
    pub moon_phases: Vec<MoonPhaseData>,
    /// Equinoxes and solstices
    pub seasons: Vec<SeasonalDaylight>,
}

/// Builds the almanac of a year for an observer.
#[must_use]
pub fn almanac(year: i32, latitude: f64, longitude: f64) -> Almanac {
    let seasons = seasonal_events(year)
        .into_iter()
        .map(|event| SeasonalDaylight {
            sun: sunrise_sunset(event.date, latitude, longitude),
            event,
        })
        .collect();

    Almanac {
        year,
        latitude,
        longitude,
        moon_phases: moon_phases_for_year(year),
        seasons,
    }
}
