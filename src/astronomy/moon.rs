//! Lunar phases, illumination and position.
//!
//! Two phase models live side by side:
//! - the *mean* phase value, a linear function of time, used for labels and
//!   for classifying arbitrary instants;
//! - the *true* phase instants (Meeus, Astronomical Algorithms ch. 49), used to
//!   pin every named phase to exactly one UTC calendar day.

use super::ephemeris::{
    altitude, astro_refraction, azimuth, days_since_j2000, from_julian, moon_coords, noon_utc,
    sidereal_time, sun_coords, to_julian, RAD,
};
use crate::models::MoonDisplayMode;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::fmt;

/// Mean length of a lunation in days.
pub const SYNODIC_MONTH: f64 = 29.530_588_853;

/// Julian date of the new moon of 2000-01-06 18:14 UTC.
pub const REFERENCE_NEW_MOON_JD: f64 = 2_451_550.1;

/// Half a day, expressed as a fraction of a lunation.
pub const PHASE_TOLERANCE: f64 = 0.5 / SYNODIC_MONTH;

/// One of the four principal lunar phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MoonPhase {
    /// New moon
    New,
    /// First quarter
    FirstQuarter,
    /// Full moon
    Full,
    /// Last quarter
    LastQuarter,
}

impl MoonPhase {
    /// All phases in lunation order.
    pub const ALL: [Self; 4] = [Self::New, Self::FirstQuarter, Self::Full, Self::LastQuarter];

    /// Position of the phase within a lunation, in [0, 1).
    #[must_use]
    pub const fn phase_value(self) -> f64 {
        match self {
            Self::New => 0.0,
            Self::FirstQuarter => 0.25,
            Self::Full => 0.5,
            Self::LastQuarter => 0.75,
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::New => "New Moon",
            Self::FirstQuarter => "First Quarter",
            Self::Full => "Full Moon",
            Self::LastQuarter => "Last Quarter",
        }
    }
}

impl fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A principal phase pinned to its UTC calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoonPhaseData {
    /// UTC date of the phase
    pub date: NaiveDate,
    /// Which phase
    pub phase: MoonPhase,
    /// Mean phase value at the instant, in [0, 1)
    pub phase_value: f64,
    /// Exact instant of the phase
    pub instant: DateTime<Utc>,
}

/// Illuminated fraction and orientation of the lunar disc.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoonIllumination {
    /// Illuminated fraction of the disc, in [0, 1]
    pub fraction: f64,
    /// Phase within the lunation: 0 new, 0.25 first quarter, 0.5 full, 0.75 last quarter
    pub phase: f64,
    /// Position angle of the bright limb's midpoint, in radians
    pub angle: f64,
}

impl MoonIllumination {
    /// Whether the lit side is growing.
    #[must_use]
    pub fn is_waxing(&self) -> bool {
        self.phase < 0.5
    }
}

/// Apparent position of the moon for an observer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoonPosition {
    /// Altitude above the horizon in radians, refraction included
    pub altitude: f64,
    /// Azimuth in radians, measured from south towards west
    pub azimuth: f64,
    /// Parallactic angle in radians
    pub parallactic_angle: f64,
    /// Earth-moon distance in km
    pub distance: f64,
}

/// Angle of the bright limb measured from the observer's zenith, in radians.
#[must_use]
pub fn bright_limb_zenith_angle(illumination: &MoonIllumination, position: &MoonPosition) -> f64 {
    illumination.angle - position.parallactic_angle
}

/// Mean phase value in [0, 1) at the given instant.
#[must_use]
pub fn mean_phase_value(instant: DateTime<Utc>) -> f64 {
    let value = ((to_julian(instant) - REFERENCE_NEW_MOON_JD) / SYNODIC_MONTH).rem_euclid(1.0);
    if value >= 1.0 {
        0.0
    } else {
        value
    }
}

/// Classifies a phase value by proximity to the four principal phases.
///
/// Distances wrap around the lunation, so 0.99 is close to a new moon.
#[must_use]
pub fn classify_phase(value: f64) -> Option<MoonPhase> {
    MoonPhase::ALL.into_iter().find(|phase| {
        let diff = (value - phase.phase_value()).rem_euclid(1.0);
        diff.min(1.0 - diff) <= PHASE_TOLERANCE
    })
}

/// Eight-way phase name for a phase value.
#[must_use]
pub fn phase_label(value: f64) -> &'static str {
    if let Some(phase) = classify_phase(value) {
        return phase.name();
    }
    let value = value.rem_euclid(1.0);
    if value < 0.25 {
        "Waxing Crescent"
    } else if value < 0.5 {
        "Waxing Gibbous"
    } else if value < 0.75 {
        "Waning Gibbous"
    } else {
        "Waning Crescent"
    }
}

/// Illumination at the given instant.
#[must_use]
pub fn moon_illumination(instant: DateTime<Utc>) -> MoonIllumination {
    let d = days_since_j2000(instant);
    let sun = sun_coords(d);
    let moon = moon_coords(d);

    let elongation = (sun.dec.sin() * moon.dec.sin()
        + sun.dec.cos() * moon.dec.cos() * (sun.ra - moon.ra).cos())
    .clamp(-1.0, 1.0)
    .acos();
    let inc = (sun.dist * elongation.sin()).atan2(moon.dist - sun.dist * elongation.cos());
    let angle = (sun.dec.cos() * (sun.ra - moon.ra).sin()).atan2(
        sun.dec.sin() * moon.dec.cos() - sun.dec.cos() * moon.dec.sin() * (sun.ra - moon.ra).cos(),
    );

    let sign = if angle < 0.0 { -1.0 } else { 1.0 };
    MoonIllumination {
        fraction: ((1.0 + inc.cos()) / 2.0).clamp(0.0, 1.0),
        phase: (0.5 + 0.5 * inc * sign / PI).clamp(0.0, 1.0),
        angle,
    }
}

/// Illumination at noon UTC on a calendar day.
#[must_use]
pub fn moon_illumination_on(date: NaiveDate) -> MoonIllumination {
    moon_illumination(noon_utc(date))
}

/// Position for an observer at `latitude`/`longitude` (degrees).
#[must_use]
pub fn moon_position(instant: DateTime<Utc>, latitude: f64, longitude: f64) -> MoonPosition {
    let lw = RAD * -longitude;
    let phi = RAD * latitude;
    let d = days_since_j2000(instant);

    let coords = moon_coords(d);
    let h = sidereal_time(d, lw) - coords.ra;
    let alt = altitude(h, phi, coords.dec);
    let parallactic_angle = h
        .sin()
        .atan2(phi.tan() * coords.dec.cos() - coords.dec.sin() * h.cos());

    MoonPosition {
        altitude: alt + astro_refraction(alt),
        azimuth: azimuth(h, phi, coords.dec),
        parallactic_angle,
        distance: coords.dist,
    }
}

/// A periodic correction term: `coeff · E^e · sin(mp·M' + m·M + f·F + om·Ω)`.
struct Term(f64, i32, f64, f64, f64, f64);

const NEW_MOON_TERMS: &[Term] = &[
    Term(-0.407_20, 0, 1.0, 0.0, 0.0, 0.0),
    Term(0.172_41, 1, 0.0, 1.0, 0.0, 0.0),
    Term(0.016_08, 0, 2.0, 0.0, 0.0, 0.0),
    Term(0.010_39, 0, 0.0, 0.0, 2.0, 0.0),
    Term(0.007_39, 1, 1.0, -1.0, 0.0, 0.0),
    Term(-0.005_14, 1, 1.0, 1.0, 0.0, 0.0),
    Term(0.002_08, 2, 0.0, 2.0, 0.0, 0.0),
    Term(-0.001_11, 0, 1.0, 0.0, -2.0, 0.0),
    Term(-0.000_57, 0, 1.0, 0.0, 2.0, 0.0),
    Term(0.000_56, 1, 2.0, 1.0, 0.0, 0.0),
    Term(-0.000_42, 0, 3.0, 0.0, 0.0, 0.0),
    Term(0.000_42, 1, 0.0, 1.0, 2.0, 0.0),
    Term(0.000_38, 1, 0.0, 1.0, -2.0, 0.0),
    Term(-0.000_24, 1, 2.0, -1.0, 0.0, 0.0),
    Term(-0.000_17, 0, 0.0, 0.0, 0.0, 1.0),
    Term(-0.000_07, 0, 1.0, 2.0, 0.0, 0.0),
    Term(0.000_04, 0, 2.0, 0.0, -2.0, 0.0),
    Term(0.000_04, 0, 0.0, 3.0, 0.0, 0.0),
    Term(0.000_03, 0, 1.0, 1.0, -2.0, 0.0),
    Term(0.000_03, 0, 2.0, 0.0, 2.0, 0.0),
    Term(-0.000_03, 0, 1.0, 1.0, 2.0, 0.0),
    Term(0.000_03, 0, 1.0, -1.0, 2.0, 0.0),
    Term(-0.000_02, 0, 1.0, -1.0, -2.0, 0.0),
    Term(-0.000_02, 0, 3.0, 1.0, 0.0, 0.0),
    Term(0.000_02, 0, 4.0, 0.0, 0.0, 0.0),
];

const FULL_MOON_TERMS: &[Term] = &[
    Term(-0.406_14, 0, 1.0, 0.0, 0.0, 0.0),
    Term(0.173_02, 1, 0.0, 1.0, 0.0, 0.0),
    Term(0.016_14, 0, 2.0, 0.0, 0.0, 0.0),
    Term(0.010_43, 0, 0.0, 0.0, 2.0, 0.0),
    Term(0.007_34, 1, 1.0, -1.0, 0.0, 0.0),
    Term(-0.005_15, 1, 1.0, 1.0, 0.0, 0.0),
    Term(0.002_09, 2, 0.0, 2.0, 0.0, 0.0),
    Term(-0.001_11, 0, 1.0, 0.0, -2.0, 0.0),
    Term(-0.000_57, 0, 1.0, 0.0, 2.0, 0.0),
    Term(0.000_56, 1, 2.0, 1.0, 0.0, 0.0),
    Term(-0.000_42, 0, 3.0, 0.0, 0.0, 0.0),
    Term(0.000_42, 1, 0.0, 1.0, 2.0, 0.0),
    Term(0.000_38, 1, 0.0, 1.0, -2.0, 0.0),
    Term(-0.000_24, 1, 2.0, -1.0, 0.0, 0.0),
    Term(-0.000_17, 0, 0.0, 0.0, 0.0, 1.0),
    Term(-0.000_07, 0, 1.0, 2.0, 0.0, 0.0),
    Term(0.000_04, 0, 2.0, 0.0, -2.0, 0.0),
    Term(0.000_04, 0, 0.0, 3.0, 0.0, 0.0),
    Term(0.000_03, 0, 1.0, 1.0, -2.0, 0.0),
    Term(0.000_03, 0, 2.0, 0.0, 2.0, 0.0),
    Term(-0.000_03, 0, 1.0, 1.0, 2.0, 0.0),
    Term(0.000_03, 0, 1.0, -1.0, 2.0, 0.0),
    Term(-0.000_02, 0, 1.0, -1.0, -2.0, 0.0),
    Term(-0.000_02, 0, 3.0, 1.0, 0.0, 0.0),
    Term(0.000_02, 0, 4.0, 0.0, 0.0, 0.0),
];

const QUARTER_TERMS: &[Term] = &[
    Term(-0.628_01, 0, 1.0, 0.0, 0.0, 0.0),
    Term(0.171_72, 1, 0.0, 1.0, 0.0, 0.0),
    Term(-0.011_83, 1, 1.0, 1.0, 0.0, 0.0),
    Term(0.008_62, 0, 2.0, 0.0, 0.0, 0.0),
    Term(0.008_04, 0, 0.0, 0.0, 2.0, 0.0),
    Term(0.004_54, 1, 1.0, -1.0, 0.0, 0.0),
    Term(0.002_04, 2, 0.0, 2.0, 0.0, 0.0),
    Term(-0.001_80, 0, 1.0, 0.0, -2.0, 0.0),
    Term(-0.000_70, 0, 1.0, 0.0, 2.0, 0.0),
    Term(-0.000_40, 0, 3.0, 0.0, 0.0, 0.0),
    Term(-0.000_34, 1, 2.0, -1.0, 0.0, 0.0),
    Term(0.000_32, 1, 0.0, 1.0, 2.0, 0.0),
    Term(0.000_32, 1, 0.0, 1.0, -2.0, 0.0),
    Term(-0.000_28, 2, 1.0, 2.0, 0.0, 0.0),
    Term(0.000_27, 1, 2.0, 1.0, 0.0, 0.0),
    Term(-0.000_17, 0, 0.0, 0.0, 0.0, 1.0),
    Term(-0.000_05, 0, 1.0, -1.0, -2.0, 0.0),
    Term(0.000_04, 0, 2.0, 0.0, 2.0, 0.0),
    Term(-0.000_04, 0, 1.0, 1.0, 2.0, 0.0),
    Term(0.000_04, 0, 1.0, -2.0, 0.0, 0.0),
    Term(0.000_03, 0, 1.0, 1.0, -2.0, 0.0),
    Term(0.000_03, 0, 0.0, 3.0, 0.0, 0.0),
    Term(0.000_02, 0, 2.0, 0.0, -2.0, 0.0),
    Term(0.000_02, 0, 1.0, -1.0, 2.0, 0.0),
    Term(-0.000_02, 0, 3.0, 1.0, 0.0, 0.0),
];

/// Planetary arguments (A1..A14): (constant, rate per lunation, coefficient).
const PLANETARY_TERMS: [(f64, f64, f64); 14] = [
    (299.77, 0.107_408, 0.000_325),
    (251.88, 0.016_321, 0.000_165),
    (251.83, 26.651_886, 0.000_164),
    (349.42, 36.412_478, 0.000_126),
    (84.66, 18.206_239, 0.000_110),
    (141.74, 53.303_771, 0.000_062),
    (207.14, 2.453_732, 0.000_060),
    (154.84, 7.306_860, 0.000_056),
    (34.52, 27.261_239, 0.000_047),
    (207.19, 0.121_824, 0.000_042),
    (291.34, 1.844_379, 0.000_040),
    (161.72, 24.198_154, 0.000_037),
    (239.56, 25.513_099, 0.000_035),
    (331.55, 3.592_518, 0.000_023),
];

/// Julian ephemeris day of the phase `phase` in lunation `lunation`
/// (lunation 0 starts at the new moon of 2000-01-06).
#[must_use]
pub fn true_phase_jde(lunation: i64, phase: MoonPhase) -> f64 {
    let k = lunation as f64 + phase.phase_value();
    let t = k / 1236.85;
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let mut jde = 2_451_550.097_66 + 29.530_588_861 * k + 0.000_154_37 * t2 - 0.000_000_150 * t3
        + 0.000_000_000_73 * t4;

    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t2;
    let m = RAD * (2.5534 + 29.105_356_70 * k - 0.000_001_4 * t2 - 0.000_000_11 * t3);
    let mp = RAD
        * (201.5643 + 385.816_935_28 * k + 0.010_758_2 * t2 + 0.000_012_38 * t3
            - 0.000_000_058 * t4);
    let f = RAD
        * (160.7108 + 390.670_502_84 * k - 0.001_611_8 * t2 - 0.000_002_27 * t3
            + 0.000_000_011 * t4);
    let om = RAD * (124.7746 - 1.563_755_88 * k + 0.002_067_2 * t2 + 0.000_002_15 * t3);

    let terms = match phase {
        MoonPhase::New => NEW_MOON_TERMS,
        MoonPhase::Full => FULL_MOON_TERMS,
        MoonPhase::FirstQuarter | MoonPhase::LastQuarter => QUARTER_TERMS,
    };
    jde += terms
        .iter()
        .map(|Term(coeff, e_pow, c_mp, c_m, c_f, c_om)| {
            coeff * e.powi(*e_pow) * (c_mp * mp + c_m * m + c_f * f + c_om * om).sin()
        })
        .sum::<f64>();

    if matches!(phase, MoonPhase::FirstQuarter | MoonPhase::LastQuarter) {
        let w = 0.003_06 - 0.000_38 * e * m.cos() + 0.000_26 * mp.cos()
            - 0.000_02 * (mp - m).cos()
            + 0.000_02 * (mp + m).cos()
            + 0.000_02 * (2.0 * f).cos();
        jde += if phase == MoonPhase::FirstQuarter { w } else { -w };
    }

    jde + PLANETARY_TERMS
        .iter()
        .enumerate()
        .map(|(i, (base, rate, coeff))| {
            let mut arg = base + rate * k;
            if i == 0 {
                arg -= 0.009_173 * t2;
            }
            coeff * (RAD * arg).sin()
        })
        .sum::<f64>()
}

/// All principal phases whose UTC date falls in `year`, in chronological order.
#[must_use]
pub fn moon_phases_for_year(year: i32) -> Vec<MoonPhaseData> {
    let first_lunation = ((f64::from(year) - 2000.0) * 12.3685).floor() as i64 - 1;

    let mut phases: Vec<MoonPhaseData> = (first_lunation..first_lunation + 16)
        .flat_map(|lunation| MoonPhase::ALL.map(|phase| (lunation, phase)))
        .filter_map(|(lunation, phase)| {
            let instant = from_julian(true_phase_jde(lunation, phase))?;
            (instant.year() == year).then(|| MoonPhaseData {
                date: instant.date_naive(),
                phase,
                phase_value: mean_phase_value(instant),
                instant,
            })
        })
        .collect();

    phases.sort_by_key(|data| data.instant);
    phases
}

/// Principal phases of one year indexed by UTC date.
#[derive(Debug, Clone, Default)]
pub struct MoonCalendar {
    year: i32,
    phases: Vec<MoonPhaseData>,
    by_date: BTreeMap<NaiveDate, MoonPhase>,
}

impl MoonCalendar {
    /// Computes the phase calendar for a year.
    #[must_use]
    pub fn for_year(year: i32) -> Self {
        let phases = moon_phases_for_year(year);
        let by_date = phases.iter().map(|data| (data.date, data.phase)).collect();
        Self {
            year,
            phases,
            by_date,
        }
    }

    /// The year this calendar covers.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Phases in chronological order.
    #[must_use]
    pub fn phases(&self) -> &[MoonPhaseData] {
        &self.phases
    }

    /// The principal phase falling on `date`, if any.
    #[must_use]
    pub fn phase_on(&self, date: NaiveDate) -> Option<MoonPhase> {
        self.by_date.get(&date).copied()
    }

    /// Whether any principal phase falls on `date`.
    #[must_use]
    pub fn is_phase_day(&self, date: NaiveDate) -> bool {
        self.by_date.contains_key(&date)
    }

    /// Whether the full moon falls on `date`.
    #[must_use]
    pub fn is_full_moon_day(&self, date: NaiveDate) -> bool {
        self.phase_on(date) == Some(MoonPhase::Full)
    }
}

/// Whether a principal phase falls on `date`.
#[must_use]
pub fn is_moon_phase_day(date: NaiveDate) -> bool {
    MoonCalendar::for_year(date.year()).is_phase_day(date)
}

/// Whether the full moon falls on `date`.
#[must_use]
pub fn is_full_moon_day(date: NaiveDate) -> bool {
    MoonCalendar::for_year(date.year()).is_full_moon_day(date)
}

/// Whether a moon is drawn on `date` under `mode`.
#[must_use]
pub fn should_show_moon(mode: MoonDisplayMode, date: NaiveDate, calendar: &MoonCalendar) -> bool {
    match mode {
        MoonDisplayMode::None => false,
        MoonDisplayMode::Illumination => true,
        MoonDisplayMode::Phases => calendar.is_phase_day(date),
        MoonDisplayMode::FullOnly => calendar.is_full_moon_day(date),
    }
}
