//! Equinoxes and solstices (Meeus, Astronomical Algorithms ch. 27).

use super::ephemeris::{from_julian, J2000, RAD};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four seasonal markers, named for the northern hemisphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeasonKind {
    /// March equinox
    SpringEquinox,
    /// June solstice
    SummerSolstice,
    /// September equinox
    AutumnEquinox,
    /// December solstice
    WinterSolstice,
}

impl SeasonKind {
    /// All markers in calendar order.
    pub const ALL: [Self; 4] = [
        Self::SpringEquinox,
        Self::SummerSolstice,
        Self::AutumnEquinox,
        Self::WinterSolstice,
    ];

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SpringEquinox => "Spring Equinox",
            Self::SummerSolstice => "Summer Solstice",
            Self::AutumnEquinox => "Autumn Equinox",
            Self::WinterSolstice => "Winter Solstice",
        }
    }

    fn mean_jde(self, y: f64) -> f64 {
        let coeffs: [f64; 5] = match self {
            Self::SpringEquinox => [2_451_623.809_84, 365_242.374_04, 0.051_69, -0.004_11, -0.000_57],
            Self::SummerSolstice => [2_451_716.567_67, 365_241.626_03, 0.003_25, 0.008_88, -0.000_30],
            Self::AutumnEquinox => [2_451_810.217_15, 365_242.017_67, -0.115_75, 0.003_37, 0.000_78],
            Self::WinterSolstice => [2_451_900.059_52, 365_242.740_49, -0.062_23, -0.008_23, 0.000_32],
        };
        coeffs.iter().rev().fold(0.0, |acc, c| acc * y + c)
    }
}

impl fmt::Display for SeasonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One equinox or solstice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalEvent {
    /// Which marker
    #[serde(rename = "type")]
    pub kind: SeasonKind,
    /// UTC date
    pub date: NaiveDate,
    /// Instant of the event
    pub instant: DateTime<Utc>,
}

/// Periodic terms (A, B, C) of the seasonal correction.
const PERIODIC_TERMS: [(f64, f64, f64); 24] = [
    (485.0, 324.96, 1_934.136),
    (203.0, 337.23, 32_964.467),
    (199.0, 342.08, 20.186),
    (182.0, 27.85, 445_267.112),
    (156.0, 73.14, 45_036.886),
    (136.0, 171.52, 22_518.443),
    (77.0, 222.54, 65_928.934),
    (74.0, 296.72, 3_034.906),
    (70.0, 243.58, 9_037.513),
    (58.0, 119.81, 33_718.147),
    (52.0, 297.17, 150.678),
    (50.0, 21.02, 2_281.226),
    (45.0, 247.54, 29_929.562),
    (44.0, 325.15, 31_555.956),
    (29.0, 60.93, 4_443.417),
    (18.0, 155.12, 67_555.328),
    (17.0, 288.79, 4_562.452),
    (16.0, 198.04, 62_894.029),
    (14.0, 199.76, 31_436.921),
    (12.0, 95.39, 14_577.848),
    (12.0, 287.11, 31_931.756),
    (12.0, 320.81, 34_777.259),
    (9.0, 227.73, 1_222.114),
    (8.0, 15.45, 16_859.074),
];

/// Julian ephemeris day of a seasonal marker.
#[must_use]
pub fn season_jde(year: i32, kind: SeasonKind) -> f64 {
    let y = (f64::from(year) - 2000.0) / 1000.0;
    let jde0 = kind.mean_jde(y);

    let t = (jde0 - J2000) / 36_525.0;
    let w = RAD * (35_999.373 * t - 2.47);
    let delta_lambda = 1.0 + 0.0334 * w.cos() + 0.0007 * (2.0 * w).cos();
    let s: f64 = PERIODIC_TERMS
        .iter()
        .map(|(a, b, c)| a * (RAD * (b + c * t)).cos())
        .sum();

    jde0 + 0.000_01 * s / delta_lambda
}

/// The four seasonal events of `year`.
#[must_use]
pub fn seasonal_events(year: i32) -> Vec<SeasonalEvent> {
    SeasonKind::ALL
        .into_iter()
        .filter_map(|kind| {
            let instant = from_julian(season_jde(year, kind))?;
            Some(SeasonalEvent {
                kind,
                date: instant.date_naive(),
                instant,
            })
        })
        .collect()
}
