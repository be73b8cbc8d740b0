//! Per-render color resolution and per-cell background colors.

use super::{resolve_theme, Theme, ThemeStyle};
use crate::config::{non_empty, Configuration};
use crate::constants::TRANSPARENT_FILL;
use crate::models::hsl_to_hex;
use chrono::{Datelike, NaiveDate, Weekday};

/// Id of the gradient rainbow themes paint the year title with.
pub const YEAR_GRADIENT_ID: &str = "yearGradient";

/// Saturation of rainbow cell colors, in percent.
const RAINBOW_SATURATION: f64 = 70.0;

/// Lightness of rainbow cell colors, in percent.
const RAINBOW_LIGHTNESS: f64 = 80.0;

/// One stop of the year-title gradient.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientStop {
    /// Offset in percent
    pub offset: f64,
    /// Stop color
    pub color: String,
}

/// Seven stops sweeping the hue circle, for rainbow year titles.
#[must_use]
pub fn year_gradient() -> Vec<GradientStop> {
    (0..=6)
        .map(|i| {
            let t = f64::from(i) / 6.0;
            GradientStop {
                offset: t * 100.0,
                color: hsl_to_hex(t * 300.0, 80.0, 45.0),
            }
        })
        .collect()
}

/// Weekend days (Saturday and Sunday).
#[must_use]
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// 0-based index of the weekend a date belongs to within its month.
///
/// A weekend starts on a Saturday, or on the 1st when the month starts on a
/// Sunday. Returns `None` for weekdays.
#[must_use]
pub fn weekend_occurrence_index(date: NaiveDate) -> Option<i32> {
    if !is_weekend(date) {
        return None;
    }
    let starts = (1..=date.day())
        .filter_map(|day| date.with_day(day))
        .filter(|d| d.weekday() == Weekday::Sat || (d.day() == 1 && d.weekday() == Weekday::Sun))
        .count();
    Some(starts as i32 - 1)
}

/// Rainbow cell color for rainbow styles; `None` for every other style.
#[must_use]
pub fn rainbow_color(style: &ThemeStyle, date: NaiveDate) -> Option<String> {
    let day_of_month_hue = f64::from(date.day() - 1) * 360.0 / 31.0;
    let color = match style {
        ThemeStyle::RainbowByWeekday => {
            let hue = f64::from(date.weekday().num_days_from_sunday()) * 360.0 / 7.0;
            hsl_to_hex(hue, RAINBOW_SATURATION, RAINBOW_LIGHTNESS)
        }
        ThemeStyle::RainbowByDayOfMonth => {
            hsl_to_hex(day_of_month_hue, RAINBOW_SATURATION, RAINBOW_LIGHTNESS)
        }
        ThemeStyle::RainbowByDistanceFromYearEnd => {
            let year_end = NaiveDate::from_ymd_opt(date.year(), 12, 31)?;
            let distance = (year_end - date).num_days() as f64;
            let lightness = 70.0 + 20.0 * distance / 365.0;
            hsl_to_hex(day_of_month_hue, RAINBOW_SATURATION, lightness.min(90.0))
        }
        ThemeStyle::RainbowByDayOfYear => {
            let days_in_year = if date.leap_year() { 366.0 } else { 365.0 };
            let hue = f64::from(date.ordinal0()) * 360.0 / days_in_year;
            hsl_to_hex(hue, RAINBOW_SATURATION, RAINBOW_LIGHTNESS)
        }
        ThemeStyle::Flat | ThemeStyle::LookupTable1D { .. } | ThemeStyle::LookupTable2D { .. } => {
            return None
        }
    };
    Some(color)
}

/// Colors of one render: theme palette merged with the user's overrides.
#[derive(Debug, Clone)]
pub struct ColorScheme {
    /// The resolved theme
    pub theme: &'static Theme,
    /// Year title fill (a `url(#…)` reference for rainbow themes)
    pub year: String,
    /// Month labels
    pub month: String,
    /// Day numbers
    pub day_text: String,
    /// Day-name band
    pub day_name: String,
    /// Grid lines
    pub grid: String,
    /// Holiday day numbers
    pub holiday: String,
    /// Custom-date day numbers and titles
    pub custom_date: String,
    /// Page background
    pub background: String,
    /// Lit part of the moon
    pub moon_light: String,
    /// Dark part of the moon
    pub moon_dark: String,
    /// Moon outline
    pub moon_border: String,
    highlight_weekends: bool,
    weekend_override: Option<String>,
}

impl ColorScheme {
    /// Resolves the theme and applies the overrides of `config`.
    #[must_use]
    pub fn from_config(config: &Configuration) -> Self {
        let theme = resolve_theme(&config.theme);
        let palette = &theme.palette;
        let colors = &config.colors;
        let pick = |value: Option<&String>, fallback: &String| {
            non_empty(value).map_or_else(|| fallback.clone(), str::to_string)
        };

        let year = match non_empty(colors.year_color.as_ref()) {
            Some(color) => color.to_string(),
            None if theme.style.is_rainbow() => format!("url(#{YEAR_GRADIENT_ID})"),
            None => palette.year.clone(),
        };

        let moon = &config.moon;
        Self {
            theme,
            year,
            month: pick(colors.month_color.as_ref(), &palette.month),
            day_text: pick(colors.day_text_color.as_ref(), &palette.day_text),
            day_name: pick(colors.day_name_color.as_ref(), &palette.day_name),
            grid: pick(colors.grid_line_color.as_ref(), &palette.grid),
            holiday: non_empty(colors.holiday_color.as_ref())
                .unwrap_or(crate::config::DEFAULT_HOLIDAY_COLOR)
                .to_string(),
            custom_date: pick(colors.custom_date_color.as_ref(), &palette.custom_date),
            background: palette.background.clone(),
            moon_light: pick(moon.moon_light_color.as_ref(), &palette.moon_light),
            moon_dark: pick(moon.moon_dark_color.as_ref(), &palette.moon_dark),
            moon_border: pick(moon.moon_border_color.as_ref(), &palette.moon_border),
            highlight_weekends: config.highlight_weekends,
            weekend_override: non_empty(colors.weekend_bg_color.as_ref()).map(str::to_string),
        }
    }

    /// Whether the year title references the rainbow gradient.
    #[must_use]
    pub fn uses_year_gradient(&self) -> bool {
        self.year.starts_with("url(")
    }

    /// Background of a day cell.
    ///
    /// Rainbow themes always color the cell. Otherwise only weekends are
    /// painted, and only when weekend highlighting is on: the user override
    /// wins, then the theme's lookup table, then the palette's weekend color.
    /// Everything else is transparent.
    #[must_use]
    pub fn cell_background(
        &self,
        date: NaiveDate,
        is_weekend: bool,
        weekend_occurrence_index: i32,
    ) -> String {
        if let Some(color) = rainbow_color(&self.theme.style, date) {
            return color;
        }
        if !(is_weekend && self.highlight_weekends) {
            return TRANSPARENT_FILL.to_string();
        }
        if let Some(color) = &self.weekend_override {
            return color.clone();
        }

        let month = date.month0() as usize;
        let from_table = match &self.theme.style {
            ThemeStyle::LookupTable1D { month_colors } => month_colors.get(month),
            ThemeStyle::LookupTable2D { weekend_colors } => {
                weekend_colors.get(month).and_then(|row| {
                    usize::try_from(weekend_occurrence_index)
                        .ok()
                        .and_then(|idx| row.get(idx))
                        .or_else(|| row.first())
                })
            }
            _ => None,
        };
        from_table.unwrap_or(&self.theme.palette.weekend).clone()
    }
}

/// Background color of one day cell under `config`.
///
/// Month and day of month are taken from `date`. See
/// [`ColorScheme::cell_background`] for the resolution order.
#[must_use]
pub fn cell_background_color(
    config: &Configuration,
    date: NaiveDate,
    is_weekend: bool,
    weekend_occurrence_index: i32,
) -> String {
    ColorScheme::from_config(config).cell_background(date, is_weekend, weekend_occurrence_index)
}
