//! Time scales and low-precision solar/lunar coordinates.
//!
//! Positions follow the compact series popularized by SunCalc (after the
//! Astronomy Answers articles): accurate to a fraction of a degree, which is
//! well below what a 20px moon glyph can show.

use chrono::{DateTime, NaiveDate, Utc};
use std::f64::consts::PI;

/// Degrees to radians.
pub const RAD: f64 = PI / 180.0;

/// Milliseconds per day.
const DAY_MS: f64 = 86_400_000.0;

/// Julian date of the Unix epoch.
pub const J1970: f64 = 2_440_587.5;

/// Julian date of J2000.0.
pub const J2000: f64 = 2_451_545.0;

/// Obliquity of the ecliptic at J2000.
const OBLIQUITY: f64 = RAD * 23.4397;

/// Converts an instant to a Julian date.
#[must_use]
pub fn to_julian(instant: DateTime<Utc>) -> f64 {
    instant.timestamp_millis() as f64 / DAY_MS + J1970
}

/// Converts a Julian date back to an instant (millisecond precision).
#[must_use]
pub fn from_julian(jd: f64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(((jd - J1970) * DAY_MS).round() as i64)
}

/// Days since J2000.0.
#[must_use]
pub fn days_since_j2000(instant: DateTime<Utc>) -> f64 {
    to_julian(instant) - J2000
}

/// Noon UTC on the given date.
#[must_use]
pub fn noon_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(12, 0, 0)
        .map_or_else(|| date.and_time(chrono::NaiveTime::MIN), |dt| dt)
        .and_utc()
}

/// Equatorial coordinates (radians) plus distance in km where known.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Equatorial {
    pub ra: f64,
    pub dec: f64,
    pub dist: f64,
}

pub(crate) fn right_ascension(l: f64, b: f64) -> f64 {
    (l.sin() * OBLIQUITY.cos() - b.tan() * OBLIQUITY.sin()).atan2(l.cos())
}

pub(crate) fn declination(l: f64, b: f64) -> f64 {
    (b.sin() * OBLIQUITY.cos() + b.cos() * OBLIQUITY.sin() * l.sin()).asin()
}

/// Azimuth measured from south towards west.
pub(crate) fn azimuth(h: f64, phi: f64, dec: f64) -> f64 {
    h.sin().atan2(h.cos() * phi.sin() - dec.tan() * phi.cos())
}

pub(crate) fn altitude(h: f64, phi: f64, dec: f64) -> f64 {
    (phi.sin() * dec.sin() + phi.cos() * dec.cos() * h.cos()).asin()
}

pub(crate) fn sidereal_time(d: f64, lw: f64) -> f64 {
    RAD * (280.16 + 360.985_623_5 * d) - lw
}

/// Atmospheric refraction for an apparent altitude in radians.
pub(crate) fn astro_refraction(h: f64) -> f64 {
    let h = h.max(0.0);
    0.000_296_7 / (h + 0.003_125_36 / (h + 0.089_011_79)).tan()
}

pub(crate) fn solar_mean_anomaly(d: f64) -> f64 {
    RAD * (357.5291 + 0.985_600_28 * d)
}

pub(crate) fn ecliptic_longitude(m: f64) -> f64 {
    let center = RAD * (1.9148 * m.sin() + 0.02 * (2.0 * m).sin() + 0.0003 * (3.0 * m).sin());
    let perihelion = RAD * 102.9372;
    m + center + perihelion + PI
}

pub(crate) fn sun_coords(d: f64) -> Equatorial {
    let l = ecliptic_longitude(solar_mean_anomaly(d));
    Equatorial {
        ra: right_ascension(l, 0.0),
        dec: declination(l, 0.0),
        dist: 149_598_000.0,
    }
}

pub(crate) fn moon_coords(d: f64) -> Equatorial {
    let mean_longitude = RAD * (218.316 + 13.176_396 * d);
    let mean_anomaly = RAD * (134.963 + 13.064_993 * d);
    let mean_distance = RAD * (93.272 + 13.229_350 * d);

    let l = mean_longitude + RAD * 6.289 * mean_anomaly.sin();
    let b = RAD * 5.128 * mean_distance.sin();
    let dist = 385_001.0 - 20_905.0 * mean_anomaly.cos();

    Equatorial {
        ra: right_ascension(l, b),
        dec: declination(l, b),
        dist,
    }
}
