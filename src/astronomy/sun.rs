//! Sunrise and sunset times.

use super::ephemeris::{
    days_since_j2000, declination, ecliptic_longitude, from_julian, noon_utc, solar_mean_anomaly,
    J2000, RAD,
};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Apparent altitude of the sun's upper limb at rise/set, including refraction.
const SUNRISE_ALTITUDE_DEG: f64 = -0.833;

/// Correction between the transit polynomial and J2000.
const J0: f64 = 0.0009;

/// Sunrise and sunset for a date and location.
///
/// Times are "HH:mm" in the nautical zone of the longitude, i.e. UTC shifted
/// by `round(longitude / 15)` hours. Either side is `None` when the sun does
/// not cross the horizon that day (polar day or night).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SunriseSunset {
    /// Local sunrise
    pub sunrise: Option<String>,
    /// Local sunset
    pub sunset: Option<String>,
    /// Minutes between sunrise and sunset
    pub day_length_minutes: Option<i64>,
}

/// Whole-hour UTC offset for a longitude.
#[must_use]
pub fn nautical_offset_hours(longitude: f64) -> i64 {
    (longitude / 15.0).round() as i64
}

fn julian_cycle(d: f64, lw: f64) -> f64 {
    (d - J0 - lw / (2.0 * PI)).round()
}

fn approx_transit(ht: f64, lw: f64, n: f64) -> f64 {
    J0 + (ht + lw) / (2.0 * PI) + n
}

fn solar_transit_j(ds: f64, m: f64, l: f64) -> f64 {
    J2000 + ds + 0.0053 * m.sin() - 0.0069 * (2.0 * l).sin()
}

fn hour_angle(h: f64, phi: f64, dec: f64) -> Option<f64> {
    let cos_w = (h.sin() - phi.sin() * dec.sin()) / (phi.cos() * dec.cos());
    (-1.0..=1.0).contains(&cos_w).then(|| cos_w.acos())
}

/// Rise and set instants in UTC, or `None` when the sun stays above or below
/// the horizon all day.
#[must_use]
pub fn sun_times_utc(
    date: NaiveDate,
    latitude: f64,
    longitude: f64,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let lw = RAD * -longitude;
    let phi = RAD * latitude;
    let d = days_since_j2000(noon_utc(date));

    let n = julian_cycle(d, lw);
    let ds = approx_transit(0.0, lw, n);
    let m = solar_mean_anomaly(ds);
    let l = ecliptic_longitude(m);
    let dec = declination(l, 0.0);
    let noon = solar_transit_j(ds, m, l);

    let w = hour_angle(RAD * SUNRISE_ALTITUDE_DEG, phi, dec)?;
    let set = solar_transit_j(approx_transit(w, lw, n), m, l);
    let rise = noon - (set - noon);

    Some((from_julian(rise)?, from_julian(set)?))
}

fn format_local(instant: DateTime<Utc>, offset_hours: i64) -> String {
    (instant + Duration::hours(offset_hours))
        .format("%H:%M")
        .to_string()
}

/// Sunrise and sunset for `date` at `latitude`/`longitude` (degrees).
#[must_use]
pub fn sunrise_sunset(date: NaiveDate, latitude: f64, longitude: f64) -> SunriseSunset {
    let offset = nautical_offset_hours(longitude);
    match sun_times_utc(date, latitude, longitude) {
        Some((rise, set)) => SunriseSunset {
            sunrise: Some(format_local(rise, offset)),
            sunset: Some(format_local(set, offset)),
            day_length_minutes: Some((set - rise).num_minutes()),
        },
        None => {
            tracing::debug!("No sunrise/sunset on {date} at latitude {latitude}");
            SunriseSunset {
                sunrise: None,
                sunset: None,
                day_length_minutes: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minutes(hhmm: &str) -> i64 {
        let (h, m) = hhmm.split_once(':').unwrap();
        h.parse::<i64>().unwrap() * 60 + m.parse::<i64>().unwrap()
    }

    #[test]
    fn test_equator_equinox_is_about_twelve_hours() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
        let times = sunrise_sunset(date, 0.0, 0.0);
        let rise = minutes(times.sunrise.as_deref().unwrap());
        let set = minutes(times.sunset.as_deref().unwrap());
        assert!((rise - 6 * 60).abs() < 15, "{rise}");
        assert!((set - 18 * 60).abs() < 15, "{set}");
        let length = times.day_length_minutes.unwrap();
        assert!((length - 12 * 60).abs() < 15);
    }

    #[test]
    fn test_london_midsummer() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 21).unwrap();
        let times = sunrise_sunset(date, 51.5, -0.13);
        // 03:43 / 20:21 UTC
        assert!((minutes(times.sunrise.as_deref().unwrap()) - 223).abs() < 10);
        assert!((minutes(times.sunset.as_deref().unwrap()) - 1221).abs() < 10);
    }

    #[test]
    fn test_polar_day_and_night() {
        let june = NaiveDate::from_ymd_opt(2025, 6, 21).unwrap();
        let december = NaiveDate::from_ymd_opt(2025, 12, 21).unwrap();
        let polar_day = sunrise_sunset(june, 78.2, 15.6);
        assert_eq!(polar_day.sunrise, None);
        assert_eq!(polar_day.sunset, None);
        let polar_night = sunrise_sunset(december, 78.2, 15.6);
        assert_eq!(polar_night.sunrise, None);
        assert_eq!(polar_night.day_length_minutes, None);
    }

    #[test]
    fn test_nautical_offset() {
        assert_eq!(nautical_offset_hours(0.0), 0);
        assert_eq!(nautical_offset_hours(-74.0), -5);
        assert_eq!(nautical_offset_hours(139.7), 9);
    }
}
