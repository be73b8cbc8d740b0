//! The arithmetic Hebrew calendar.
//!
//! Dates are converted through day counts ("rata die", day 1 = 0001-01-01 in
//! the proleptic Gregorian calendar), which is exactly what chrono's
//! `num_days_from_ce` returns.
//!
//! Months are numbered from Nisan (1) so that Adar II (13) is the last month
//! in leap years; the civil year nevertheless starts on 1 Tishrei (7).

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Day count of 1 Tishrei AM 1.
const HEBREW_EPOCH: i64 = -1_373_427;

/// Parts (1/1080 hour) in a day.
const PARTS_PER_DAY: i64 = 25_920;

/// A Hebrew month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HebrewMonth {
    /// Nisan
    Nisan = 1,
    /// Iyar
    Iyar,
    /// Sivan
    Sivan,
    /// Tammuz
    Tammuz,
    /// Av
    Av,
    /// Elul
    Elul,
    /// Tishrei, the first month of the civil year
    Tishrei,
    /// Cheshvan (29 or 30 days)
    Cheshvan,
    /// Kislev (29 or 30 days)
    Kislev,
    /// Tevet
    Tevet,
    /// Shevat
    Shevat,
    /// Adar, called Adar I in leap years
    Adar,
    /// Adar II, only in leap years
    AdarII,
}

impl HebrewMonth {
    const BY_NUMBER: [Self; 13] = [
        Self::Nisan,
        Self::Iyar,
        Self::Sivan,
        Self::Tammuz,
        Self::Av,
        Self::Elul,
        Self::Tishrei,
        Self::Cheshvan,
        Self::Kislev,
        Self::Tevet,
        Self::Shevat,
        Self::Adar,
        Self::AdarII,
    ];

    /// Month number, Nisan = 1.
    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Month for a number, clamped into 1..=13.
    #[must_use]
    pub fn from_number(number: u8) -> Self {
        Self::BY_NUMBER[usize::from(number.clamp(1, 13)) - 1]
    }

    /// Display name; Adar becomes "Adar I" in leap years.
    #[must_use]
    pub const fn name(self, leap_year: bool) -> &'static str {
        match self {
            Self::Nisan => "Nisan",
            Self::Iyar => "Iyar",
            Self::Sivan => "Sivan",
            Self::Tammuz => "Tammuz",
            Self::Av => "Av",
            Self::Elul => "Elul",
            Self::Tishrei => "Tishrei",
            Self::Cheshvan => "Cheshvan",
            Self::Kislev => "Kislev",
            Self::Tevet => "Tevet",
            Self::Shevat => "Shevat",
            Self::Adar if leap_year => "Adar I",
            Self::Adar => "Adar",
            Self::AdarII => "Adar II",
        }
    }
}

/// A date in the Hebrew calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HebrewDate {
    /// Year (anno mundi)
    pub year: i64,
    /// Month
    pub month: HebrewMonth,
    /// Day of month, 1-based
    pub day: u8,
}

impl HebrewDate {
    /// Month name as it is written in this year.
    #[must_use]
    pub fn month_name(&self) -> &'static str {
        self.month.name(is_hebrew_leap_year(self.year))
    }
}

impl fmt::Display for HebrewDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.day, self.month_name(), self.year)
    }
}

/// Gregorian day paired with its Hebrew date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HebrewDateMapping {
    /// Gregorian date
    pub gregorian_date: NaiveDate,
    /// Hebrew date, e.g. "1 Tevet 5785"
    pub hebrew_date: String,
}

/// Metonic cycle: years 3, 6, 8, 11, 14, 17 and 19 of every 19 are leap years.
#[must_use]
pub fn is_hebrew_leap_year(year: i64) -> bool {
    (7 * year + 1).rem_euclid(19) < 7
}

/// 13 in leap years, 12 otherwise.
#[must_use]
pub fn months_in_hebrew_year(year: i64) -> u8 {
    if is_hebrew_leap_year(year) {
        13
    } else {
        12
    }
}

/// Month names of a year in civil order, starting with Tishrei.
#[must_use]
pub fn hebrew_month_names(year: i64) -> Vec<&'static str> {
    let leap = is_hebrew_leap_year(year);
    let last = months_in_hebrew_year(year);
    (7..=last)
        .chain(1..=6)
        .map(|n| HebrewMonth::from_number(n).name(leap))
        .collect()
}

/// Days from the epoch to the molad of Tishrei, after the first postponement rule.
fn elapsed_days(year: i64) -> i64 {
    let months_elapsed = (235 * year - 234).div_euclid(19);
    let parts = 12_084 + 13_753 * months_elapsed;
    let day = months_elapsed * 29 + parts.div_euclid(PARTS_PER_DAY);
    if (3 * (day + 1)).rem_euclid(7) < 3 {
        day + 1
    } else {
        day
    }
}

/// Delays that keep year lengths within 353..=355 / 383..=385.
fn year_length_correction(year: i64) -> i64 {
    let ny0 = elapsed_days(year - 1);
    let ny1 = elapsed_days(year);
    let ny2 = elapsed_days(year + 1);
    if ny2 - ny1 == 356 {
        2
    } else if ny1 - ny0 == 382 {
        1
    } else {
        0
    }
}

/// Day count of 1 Tishrei of `year`.
fn new_year(year: i64) -> i64 {
    HEBREW_EPOCH + elapsed_days(year) + year_length_correction(year)
}

/// Length of a Hebrew year in days.
#[must_use]
pub fn days_in_hebrew_year(year: i64) -> i64 {
    new_year(year + 1) - new_year(year)
}

fn long_cheshvan(year: i64) -> bool {
    days_in_hebrew_year(year) % 10 == 5
}

fn short_kislev(year: i64) -> bool {
    days_in_hebrew_year(year) % 10 == 3
}

/// Days in a month of a year.
#[must_use]
pub fn days_in_hebrew_month(year: i64, month: HebrewMonth) -> u8 {
    let short = match month {
        HebrewMonth::Iyar
        | HebrewMonth::Tammuz
        | HebrewMonth::Elul
        | HebrewMonth::Tevet
        | HebrewMonth::AdarII => true,
        HebrewMonth::Adar => !is_hebrew_leap_year(year),
        HebrewMonth::Cheshvan => !long_cheshvan(year),
        HebrewMonth::Kislev => short_kislev(year),
        _ => false,
    };
    if short {
        29
    } else {
        30
    }
}

fn month_sum(year: i64, months: impl Iterator<Item = u8>) -> i64 {
    months
        .map(|n| i64::from(days_in_hebrew_month(year, HebrewMonth::from_number(n))))
        .sum()
}

fn fixed_from_hebrew(date: HebrewDate) -> i64 {
    let HebrewDate { year, month, day } = date;
    let month = month.number();
    let before = if month < HebrewMonth::Tishrei.number() {
        month_sum(year, HebrewMonth::Tishrei.number()..=months_in_hebrew_year(year))
            + month_sum(year, 1..month)
    } else {
        month_sum(year, HebrewMonth::Tishrei.number()..month)
    };
    new_year(year) + i64::from(day) - 1 + before
}

fn hebrew_from_fixed(fixed: i64) -> HebrewDate {
    let mean_year = 35_975_351.0 / 98_496.0;
    let approx = ((fixed - HEBREW_EPOCH) as f64 / mean_year).floor() as i64 + 1;
    let mut year = approx - 1;
    while new_year(year + 1) <= fixed {
        year += 1;
    }

    let nisan_first = fixed_from_hebrew(HebrewDate {
        year,
        month: HebrewMonth::Nisan,
        day: 1,
    });
    let mut month = if fixed < nisan_first {
        HebrewMonth::Tishrei.number()
    } else {
        HebrewMonth::Nisan.number()
    };
    loop {
        let candidate = HebrewMonth::from_number(month);
        let last = fixed_from_hebrew(HebrewDate {
            year,
            month: candidate,
            day: days_in_hebrew_month(year, candidate),
        });
        if fixed <= last || month >= 13 {
            break;
        }
        month += 1;
    }

    let month = HebrewMonth::from_number(month);
    let first = fixed_from_hebrew(HebrewDate {
        year,
        month,
        day: 1,
    });
    HebrewDate {
        year,
        month,
        day: (fixed - first + 1) as u8,
    }
}

/// Converts a Gregorian date to the Hebrew calendar.
#[must_use]
pub fn gregorian_to_hebrew(date: NaiveDate) -> HebrewDate {
    hebrew_from_fixed(i64::from(date.num_days_from_ce()))
}

/// Converts a Hebrew date to the Gregorian calendar.
///
/// Out-of-range input is clamped: Adar II in a common year becomes Adar and
/// the day is limited to the month's length.
#[must_use]
pub fn hebrew_to_gregorian(year: i64, month: HebrewMonth, day: u8) -> Option<NaiveDate> {
    let month = if month == HebrewMonth::AdarII && !is_hebrew_leap_year(year) {
        HebrewMonth::Adar
    } else {
        month
    };
    let day = day.clamp(1, days_in_hebrew_month(year, month));
    let fixed = fixed_from_hebrew(HebrewDate { year, month, day });
    NaiveDate::from_num_days_from_ce_opt(i32::try_from(fixed).ok()?)
}

/// One mapping per day of a Gregorian year, in order.
#[must_use]
pub fn hebrew_dates_for_year(year: i32) -> Vec<HebrewDateMapping> {
    let Some(first) = NaiveDate::from_ymd_opt(year, 1, 1) else {
        return Vec::new();
    };
    first
        .iter_days()
        .take_while(|date| date.year() == year)
        .map(|date| HebrewDateMapping {
            gregorian_date: date,
            hebrew_date: gregorian_to_hebrew(date).to_string(),
        })
        .collect()
}
