//! Named holiday sets.
//!
//! Each set resolves to dated entries (emoji plus title) for one Gregorian
//! year. Fixed-date holidays are plain month/day pairs; movable ones are
//! derived from weekday rules, the Easter computus, the Hebrew calendar or
//! the seasonal-event ephemeris.

use crate::astronomy::{hebrew_to_gregorian, seasonal_events, HebrewMonth, SeasonKind};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A holiday calendar that can be enabled in a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HolidaySet {
    /// United States federal holidays and popular observances
    Us,
    /// Canadian statutory holidays
    Canada,
    /// UK bank holidays (England and Wales)
    Uk,
    /// Western Christian feasts
    Christian,
    /// Jewish holidays
    Jewish,
    /// Equinoxes and solstices
    Astronomical,
}

impl HolidaySet {
    /// Every available set.
    pub const ALL: [Self; 6] = [
        Self::Us,
        Self::Canada,
        Self::Uk,
        Self::Christian,
        Self::Jewish,
        Self::Astronomical,
    ];

    /// Parses a set id; unknown ids yield `None`.
    #[must_use]
    pub fn parse(id: &str) -> Option<Self> {
        match id.trim().to_ascii_lowercase().as_str() {
            "us" | "usa" | "united-states" => Some(Self::Us),
            "canada" | "ca" => Some(Self::Canada),
            "uk" | "gb" | "united-kingdom" => Some(Self::Uk),
            "christian" => Some(Self::Christian),
            "jewish" => Some(Self::Jewish),
            "astronomical" | "seasons" => Some(Self::Astronomical),
            _ => None,
        }
    }

    /// Canonical id.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Us => "us",
            Self::Canada => "canada",
            Self::Uk => "uk",
            Self::Christian => "christian",
            Self::Jewish => "jewish",
            Self::Astronomical => "astronomical",
        }
    }

    /// Holidays of this set in `year`.
    #[must_use]
    pub fn holidays(self, year: i32) -> Vec<Holiday> {
        let entries = match self {
            Self::Us => us_holidays(year),
            Self::Canada => canada_holidays(year),
            Self::Uk => uk_holidays(year),
            Self::Christian => christian_holidays(year),
            Self::Jewish => jewish_holidays(year),
            Self::Astronomical => astronomical_holidays(year),
        };
        entries
            .into_iter()
            .filter_map(|(date, emoji, title)| {
                Some(Holiday {
                    date: date?,
                    emoji,
                    title,
                    set: self,
                })
            })
            .filter(|holiday| holiday.date.year() == year)
            .collect()
    }
}

impl fmt::Display for HolidaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// One dated holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Holiday {
    /// Date it falls on
    pub date: NaiveDate,
    /// Glyph drawn in the cell
    pub emoji: &'static str,
    /// Display title
    pub title: &'static str,
    /// Set it comes from
    pub set: HolidaySet,
}

type Entry = (Option<NaiveDate>, &'static str, &'static str);

/// Resolves enabled set ids into holidays keyed by date.
///
/// Unknown ids are skipped with a warning. A date shared by several sets keeps
/// one entry per set; the same title from two sets (Christmas in `us` and
/// `christian`) is kept once.
pub fn holidays_for_year<'a>(
    year: i32,
    set_ids: impl IntoIterator<Item = &'a str>,
) -> BTreeMap<NaiveDate, Vec<Holiday>> {
    let mut by_date: BTreeMap<NaiveDate, Vec<Holiday>> = BTreeMap::new();

    for id in set_ids {
        let Some(set) = HolidaySet::parse(id) else {
            tracing::warn!("Unknown holiday set '{id}'");
            continue;
        };
        for holiday in set.holidays(year) {
            let day = by_date.entry(holiday.date).or_default();
            if !day.iter().any(|h| h.title == holiday.title) {
                day.push(holiday);
            }
        }
    }

    by_date
}

/// Gregorian Easter Sunday (anonymous computus).
#[must_use]
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

fn fixed(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

/// The `n`th (1-based) weekday of a month.
fn nth_weekday(year: i32, month: u32, weekday: Weekday, n: u8) -> Option<NaiveDate> {
    NaiveDate::from_weekday_of_month_opt(year, month, weekday, n)
}

fn last_weekday(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    let next_month = if month == 12 {
        fixed(year + 1, 1, 1)
    } else {
        fixed(year, month + 1, 1)
    }?;
    let last = next_month.pred_opt()?;
    let back = (7 + last.weekday().num_days_from_monday() - weekday.num_days_from_monday()) % 7;
    Some(last - Duration::days(i64::from(back)))
}

fn easter_offset(year: i32, days: i64) -> Option<NaiveDate> {
    easter_sunday(year).map(|easter| easter + Duration::days(days))
}

fn us_holidays(year: i32) -> Vec<Entry> {
    vec![
        (fixed(year, 1, 1), "🎉", "New Year's Day"),
        (nth_weekday(year, 1, Weekday::Mon, 3), "✊", "Martin Luther King Jr. Day"),
        (fixed(year, 2, 14), "❤️", "Valentine's Day"),
        (nth_weekday(year, 2, Weekday::Mon, 3), "🏛️", "Presidents' Day"),
        (fixed(year, 3, 17), "🍀", "St. Patrick's Day"),
        (last_weekday(year, 5, Weekday::Mon), "🇺🇸", "Memorial Day"),
        (fixed(year, 6, 19), "✊", "Juneteenth"),
        (fixed(year, 7, 4), "🎆", "Independence Day"),
        (nth_weekday(year, 9, Weekday::Mon, 1), "🛠️", "Labor Day"),
        (nth_weekday(year, 10, Weekday::Mon, 2), "🧭", "Columbus Day"),
        (fixed(year, 10, 31), "🎃", "Halloween"),
        (fixed(year, 11, 11), "🎖️", "Veterans Day"),
        (nth_weekday(year, 11, Weekday::Thu, 4), "🦃", "Thanksgiving"),
        (fixed(year, 12, 25), "🎄", "Christmas Day"),
    ]
}

fn canada_holidays(year: i32) -> Vec<Entry> {
    // Victoria Day: the last Monday before May 25
    let victoria_day = fixed(year, 5, 24).map(|may24| {
        let back = may24.weekday().num_days_from_monday();
        may24 - Duration::days(i64::from(back))
    });
    vec![
        (fixed(year, 1, 1), "🎉", "New Year's Day"),
        (nth_weekday(year, 2, Weekday::Mon, 3), "👪", "Family Day"),
        (easter_offset(year, -2), "✝️", "Good Friday"),
        (victoria_day, "👑", "Victoria Day"),
        (fixed(year, 7, 1), "🍁", "Canada Day"),
        (nth_weekday(year, 8, Weekday::Mon, 1), "🏞️", "Civic Holiday"),
        (nth_weekday(year, 9, Weekday::Mon, 1), "🛠️", "Labour Day"),
        (fixed(year, 9, 30), "🧡", "Truth and Reconciliation Day"),
        (nth_weekday(year, 10, Weekday::Mon, 2), "🦃", "Thanksgiving"),
        (fixed(year, 11, 11), "🌺", "Remembrance Day"),
        (fixed(year, 12, 25), "🎄", "Christmas Day"),
        (fixed(year, 12, 26), "🎁", "Boxing Day"),
    ]
}

fn uk_holidays(year: i32) -> Vec<Entry> {
    vec![
        (fixed(year, 1, 1), "🎉", "New Year's Day"),
        (easter_offset(year, -2), "✝️", "Good Friday"),
        (easter_offset(year, 1), "🐣", "Easter Monday"),
        (nth_weekday(year, 5, Weekday::Mon, 1), "🌼", "Early May Bank Holiday"),
        (last_weekday(year, 5, Weekday::Mon), "🌷", "Spring Bank Holiday"),
        (last_weekday(year, 8, Weekday::Mon), "☀️", "Summer Bank Holiday"),
        (fixed(year, 12, 25), "🎄", "Christmas Day"),
        (fixed(year, 12, 26), "🎁", "Boxing Day"),
    ]
}

fn christian_holidays(year: i32) -> Vec<Entry> {
    vec![
        (fixed(year, 1, 6), "⭐", "Epiphany"),
        (easter_offset(year, -46), "✝️", "Ash Wednesday"),
        (easter_offset(year, -7), "🌿", "Palm Sunday"),
        (easter_offset(year, -2), "✝️", "Good Friday"),
        (easter_offset(year, 0), "🥚", "Easter"),
        (easter_offset(year, 39), "☁️", "Ascension"),
        (easter_offset(year, 49), "🕊️", "Pentecost"),
        (fixed(year, 11, 1), "🕯️", "All Saints' Day"),
        (fixed(year, 12, 24), "⭐", "Christmas Eve"),
        (fixed(year, 12, 25), "🎄", "Christmas Day"),
    ]
}

fn jewish_holidays(year: i32) -> Vec<Entry> {
    use HebrewMonth as M;

    // Spring feasts come from the Hebrew year that began the previous autumn,
    // autumn and winter feasts from the one beginning this autumn.
    let spring = i64::from(year) + 3760;
    let autumn = spring + 1;
    let purim_month = if crate::astronomy::is_hebrew_leap_year(spring) {
        M::AdarII
    } else {
        M::Adar
    };

    let mut entries = vec![
        (hebrew_to_gregorian(spring, M::Shevat, 15), "🌳", "Tu BiShvat"),
        (hebrew_to_gregorian(spring, purim_month, 14), "🎭", "Purim"),
        (hebrew_to_gregorian(spring, M::Nisan, 15), "🍷", "Passover"),
        (hebrew_to_gregorian(spring, M::Sivan, 6), "📜", "Shavuot"),
        (hebrew_to_gregorian(autumn, M::Tishrei, 1), "🍎", "Rosh Hashanah"),
        (hebrew_to_gregorian(autumn, M::Tishrei, 10), "✡️", "Yom Kippur"),
        (hebrew_to_gregorian(autumn, M::Tishrei, 15), "🌿", "Sukkot"),
        (hebrew_to_gregorian(autumn, M::Tishrei, 23), "📜", "Simchat Torah"),
    ];
    // Hanukkah of the previous Hebrew year can still spill into early January
    for hebrew_year in [spring, autumn] {
        entries.push((hebrew_to_gregorian(hebrew_year, M::Kislev, 25), "🕎", "Hanukkah"));
    }
    entries
}

fn astronomical_holidays(year: i32) -> Vec<Entry> {
    seasonal_events(year)
        .into_iter()
        .map(|event| {
            let emoji = match event.kind {
                SeasonKind::SpringEquinox => "🌸",
                SeasonKind::SummerSolstice => "☀️",
                SeasonKind::AutumnEquinox => "🍂",
                SeasonKind::WinterSolstice => "❄️",
            };
            (Some(event.date), emoji, event.kind.name())
        })
        .collect()
}
