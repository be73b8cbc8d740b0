//! Calendar configuration.
//!
//! This module defines the declarative `Configuration` a calendar is rendered
//! from, its documented defaults, clamping of numeric fields, and loading and
//! saving in JSON, JSON5, TOML or YAML format with platform-specific default
//! locations.

use crate::constants::{MAX_YEAR, MIN_YEAR};
use crate::error::{CalendarError, Result as RenderResult};
use crate::models::{
    CustomDateEntries, CustomDateEntry, EmojiPosition, EventDisplayMode, LayoutStyle,
    MoonDisplayMode,
};
use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Default holiday day-number color.
pub const DEFAULT_HOLIDAY_COLOR: &str = "#ff5252";

/// Moon artwork settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MoonSettings {
    /// When moons are drawn
    pub moon_display_mode: MoonDisplayMode,
    /// Moon diameter in px
    pub moon_size: f64,
    /// Horizontal moon center in percent of the cell width
    pub moon_offset_x: f64,
    /// Vertical moon center in percent of the cell height
    pub moon_offset_y: f64,
    /// Border stroke width in px
    pub moon_border_width: f64,
    /// Border color (theme default when absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moon_border_color: Option<String>,
    /// Color of the lit part (theme default when absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moon_light_color: Option<String>,
    /// Color of the dark part (theme default when absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moon_dark_color: Option<String>,
    /// Observer latitude in degrees
    pub latitude: f64,
    /// Observer longitude in degrees
    pub longitude: f64,
}

impl Default for MoonSettings {
    fn default() -> Self {
        Self {
            moon_display_mode: MoonDisplayMode::None,
            moon_size: 20.0,
            moon_offset_x: 25.0,
            moon_offset_y: 36.0,
            moon_border_width: 1.5,
            moon_border_color: None,
            moon_light_color: None,
            moon_dark_color: None,
            latitude: 0.0,
            longitude: 0.0,
        }
    }
}

/// User color overrides. `None` (or an empty string) means "use the theme default".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorOverrides {
    /// Year title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_color: Option<String>,
    /// Month labels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month_color: Option<String>,
    /// Day numbers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_text_color: Option<String>,
    /// Day-name band
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_name_color: Option<String>,
    /// Weekend cell background
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekend_bg_color: Option<String>,
    /// Grid lines
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_line_color: Option<String>,
    /// Holiday day numbers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holiday_color: Option<String>,
    /// Custom-date day numbers and titles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_date_color: Option<String>,
}

impl Default for ColorOverrides {
    fn default() -> Self {
        Self {
            year_color: None,
            month_color: None,
            day_text_color: None,
            day_name_color: None,
            weekend_bg_color: None,
            grid_line_color: None,
            holiday_color: Some(DEFAULT_HOLIDAY_COLOR.to_string()),
            custom_date_color: None,
        }
    }
}

/// Returns the override if it is present and not blank.
#[must_use]
pub fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Declarative description of one calendar.
///
/// Every field has a documented default, so `{}` deserializes into a complete
/// configuration and unknown fields are ignored.
///
/// # Validation
///
/// - `year` must be within 1000..=9999 (the only hard error)
/// - numeric fields are clamped by [`Configuration::normalized`], never rejected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Configuration {
    /// Calendar year
    pub year: i32,
    /// Theme id
    pub theme: String,
    /// Layout style
    pub layout_style: LayoutStyle,
    /// Locale tag for month and day names
    pub locale: String,
    /// First day of the week, 0 = Sunday … 6 = Saturday
    #[serde(deserialize_with = "deserialize_weekday")]
    pub first_day_of_week: u8,
    /// Show week numbers
    pub show_week_numbers: bool,
    /// Shrink page, cells and fonts
    pub compact_mode: bool,
    /// Show the day-name band
    pub show_day_names: bool,
    /// Show day numbers in cells
    pub show_day_numbers: bool,
    /// Draw grid lines
    pub show_grid: bool,
    /// Paint weekend backgrounds
    pub highlight_weekends: bool,
    /// Rotate month labels by 90°
    pub rotate_month_names: bool,
    /// Print the Hebrew date in each cell
    pub show_hebrew_dates: bool,
    /// Moon artwork settings
    #[serde(flatten)]
    pub moon: MoonSettings,
    /// Color overrides
    #[serde(flatten)]
    pub colors: ColorOverrides,
    /// Emoji font: `None` for color emoji, `noto-mono` or `mono-<color>` for monochrome
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji_font: Option<String>,
    /// Default anchor for event emoji
    pub emoji_position: EmojiPosition,
    /// How events are drawn
    pub event_display_mode: EventDisplayMode,
    /// Enabled holiday set ids
    pub holiday_sets: BTreeSet<String>,
    /// Custom dates keyed by `YYYY-MM-DD` or recurring `MM-DD`
    pub custom_dates: BTreeMap<String, CustomDateEntries>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            year: chrono::Local::now().year(),
            theme: "default".to_string(),
            layout_style: LayoutStyle::Default,
            locale: "en".to_string(),
            first_day_of_week: 0,
            show_week_numbers: false,
            compact_mode: false,
            show_day_names: true,
            show_day_numbers: true,
            show_grid: true,
            highlight_weekends: true,
            rotate_month_names: false,
            show_hebrew_dates: false,
            moon: MoonSettings::default(),
            colors: ColorOverrides::default(),
            emoji_font: None,
            emoji_position: EmojiPosition::default(),
            event_display_mode: EventDisplayMode::default(),
            holiday_sets: BTreeSet::new(),
            custom_dates: BTreeMap::new(),
        }
    }
}

impl Configuration {
    /// Creates a default configuration for the given year.
    #[must_use]
    pub fn for_year(year: i32) -> Self {
        Self {
            year,
            ..Self::default()
        }
    }

    /// Parses a configuration from a JSON object, filling absent fields with defaults.
    pub fn from_json_str(json: &str) -> RenderResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a configuration from an already decoded JSON value.
    pub fn from_json_value(value: serde_json::Value) -> RenderResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Gets the platform-specific config directory path.
    ///
    /// - Linux: `~/.config/YearCal/`
    /// - macOS: `~/Library/Application Support/YearCal/`
    /// - Windows: `%APPDATA%\YearCal\`
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(crate::constants::APP_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the default calendar file.
    pub fn default_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("calendar.toml"))
    }

    /// Loads the default calendar file, or the defaults if it doesn't exist.
    pub fn load_default() -> Result<Self> {
        let path = Self::default_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// Loads a configuration file.
    ///
    /// The format is chosen by extension: `.json`, `.json5`, `.toml`,
    /// `.yaml`/`.yml`. Files without a known extension are read as JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let config: Self = match extension.as_str() {
            "toml" => toml::from_str(&content).context(format!(
                "Failed to parse TOML config file: {}",
                path.display()
            ))?,
            "yaml" | "yml" => serde_yml::from_str(&content).context(format!(
                "Failed to parse YAML config file: {}",
                path.display()
            ))?,
            "json5" => json5::from_str(&content).context(format!(
                "Failed to parse JSON5 config file: {}",
                path.display()
            ))?,
            _ => serde_json::from_str(&content).context(format!(
                "Failed to parse JSON config file: {}",
                path.display()
            ))?,
        };

        config
            .validate()
            .context(format!("Invalid configuration in {}", path.display()))?;

        Ok(config)
    }

    /// Saves the configuration as TOML using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).context(format!(
                "Failed to create config directory: {}",
                parent.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let temp_path = path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, path).context(format!(
            "Failed to rename temp config file to: {}",
            path.display()
        ))?;

        Ok(())
    }

    /// Validates the structural invariants.
    ///
    /// Only an out-of-range year is an error; everything else degrades gracefully.
    pub fn validate(&self) -> RenderResult<()> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&self.year) {
            return Err(CalendarError::InvalidYear(self.year));
        }
        Ok(())
    }

    /// Returns a copy with every numeric field clamped into its sane range.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut config = self.clone();
        let moon = &mut config.moon;
        moon.moon_size = clamp_or(moon.moon_size, 4.0, 120.0, 20.0);
        moon.moon_offset_x = clamp_or(moon.moon_offset_x, 0.0, 100.0, 25.0);
        moon.moon_offset_y = clamp_or(moon.moon_offset_y, 0.0, 100.0, 36.0);
        moon.moon_border_width = clamp_or(moon.moon_border_width, 0.0, 10.0, 1.5);
        moon.latitude = clamp_or(moon.latitude, -90.0, 90.0, 0.0);
        moon.longitude = clamp_or(moon.longitude, -180.0, 180.0, 0.0);
        config.first_day_of_week %= 7;
        config
    }

    /// The first day of the week as a chrono weekday.
    #[must_use]
    pub fn week_start(&self) -> Weekday {
        weekday_from_index(self.first_day_of_week)
    }

    /// Whether the large-moon rendering mode is active.
    #[must_use]
    pub fn large_moon(&self) -> bool {
        self.moon.moon_display_mode != MoonDisplayMode::None
            && self.moon.moon_size >= crate::constants::LARGE_MOON_MIN_SIZE
    }

    /// Resolves custom date keys against the configured year.
    ///
    /// `YYYY-MM-DD` keys apply only in their year; `MM-DD` keys recur every
    /// year (and `02-29` is skipped in common years). Unparsable keys are
    /// skipped with a warning. Entries keep their order and are not deduplicated.
    #[must_use]
    pub fn custom_dates_for_year(&self) -> BTreeMap<NaiveDate, Vec<&CustomDateEntry>> {
        let mut resolved: BTreeMap<NaiveDate, Vec<&CustomDateEntry>> = BTreeMap::new();

        for (key, entries) in &self.custom_dates {
            let key = key.trim();
            let date = if let Ok(date) = NaiveDate::parse_from_str(key, "%Y-%m-%d") {
                Some(date).filter(|d| d.year() == self.year)
            } else if let Some((month, day)) = parse_month_day(key) {
                NaiveDate::from_ymd_opt(self.year, month, day)
            } else {
                tracing::warn!("Skipping custom date with unparsable key '{key}'");
                None
            };

            if let Some(date) = date {
                resolved
                    .entry(date)
                    .or_default()
                    .extend(entries.as_slice().iter());
            }
        }

        resolved
    }
}

fn parse_month_day(key: &str) -> Option<(u32, u32)> {
    let (month, day) = key.split_once('-')?;
    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    ((1..=12).contains(&month) && (1..=31).contains(&day)).then_some((month, day))
}

fn clamp_or(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}

/// Maps 0 = Sunday … 6 = Saturday (taken modulo 7) to a chrono weekday.
#[must_use]
pub fn weekday_from_index(index: u8) -> Weekday {
    match index % 7 {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        _ => Weekday::Sat,
    }
}

/// Accepts a weekday as an index (0 = Sunday) or a name such as `"monday"`.
fn deserialize_weekday<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum WeekdayValue {
        Index(i64),
        Name(String),
    }

    let value = Option::<WeekdayValue>::deserialize(deserializer)?;
    Ok(match value {
        Some(WeekdayValue::Index(index)) => index.rem_euclid(7) as u8,
        Some(WeekdayValue::Name(name)) => name
            .trim()
            .parse::<Weekday>()
            .map(|day| day.num_days_from_sunday() as u8)
            .unwrap_or(0),
        None => 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = Configuration::from_json_str("{}").unwrap();
        let defaults = Configuration::default();
        assert_eq!(config, defaults);
        assert_eq!(config.theme, "default");
        assert_eq!(config.moon.moon_display_mode, MoonDisplayMode::None);
        assert!(config.show_day_names && config.show_day_numbers);
        assert!(config.show_grid && config.highlight_weekends);
        assert!(!config.show_week_numbers && !config.compact_mode && !config.rotate_month_names);
        assert_eq!(config.first_day_of_week, 0);
        assert_eq!(config.colors.holiday_color.as_deref(), Some("#ff5252"));
        assert_eq!(config.moon.moon_size, 20.0);
        assert_eq!(config.moon.moon_offset_x, 25.0);
        assert_eq!(config.moon.moon_offset_y, 36.0);
        assert_eq!(config.moon.moon_border_width, 1.5);
        assert_eq!(config.moon.latitude, 0.0);
        assert_eq!(config.moon.longitude, 0.0);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let config =
            Configuration::from_json_str(r#"{"year": 2025, "orderId": "abc", "nested": {"x": 1}}"#)
                .unwrap();
        assert_eq!(config.year, 2025);
    }

    #[test]
    fn test_flattened_fields_parse() {
        let config = Configuration::from_json_str(
            r##"{"moonDisplayMode":"phases","moonSize":30,"latitude":51.5,"weekendBgColor":"#eee","yearColor":null}"##,
        )
        .unwrap();
        assert_eq!(config.moon.moon_display_mode, MoonDisplayMode::Phases);
        assert_eq!(config.moon.moon_size, 30.0);
        assert_eq!(config.moon.latitude, 51.5);
        assert_eq!(config.colors.weekend_bg_color.as_deref(), Some("#eee"));
        assert_eq!(config.colors.year_color, None);
    }

    #[test]
    fn test_null_options_use_defaults() {
        let config = Configuration::from_json_str(
            r#"{"emojiPosition": null, "eventDisplayMode": null, "layoutStyle": null, "moonDisplayMode": null}"#,
        )
        .unwrap();
        assert_eq!(config.emoji_position, EmojiPosition::BottomLeft);
        assert_eq!(config.event_display_mode, EventDisplayMode::Large);
        assert_eq!(config.layout_style, LayoutStyle::Default);
        assert_eq!(config.moon.moon_display_mode, MoonDisplayMode::None);
    }

    #[test]
    fn test_first_day_of_week_forms() {
        let by_index = Configuration::from_json_str(r#"{"firstDayOfWeek": 1}"#).unwrap();
        assert_eq!(by_index.week_start(), Weekday::Mon);
        let by_name = Configuration::from_json_str(r#"{"firstDayOfWeek": "saturday"}"#).unwrap();
        assert_eq!(by_name.week_start(), Weekday::Sat);
        let wrapped = Configuration::from_json_str(r#"{"firstDayOfWeek": 8}"#).unwrap();
        assert_eq!(wrapped.week_start(), Weekday::Mon);
    }

    #[test]
    fn test_validate_year_range() {
        assert!(Configuration::for_year(2025).validate().is_ok());
        assert!(Configuration::for_year(1000).validate().is_ok());
        assert!(Configuration::for_year(9999).validate().is_ok());
        assert!(matches!(
            Configuration::for_year(999).validate(),
            Err(CalendarError::InvalidYear(999))
        ));
        assert!(Configuration::for_year(10_000).validate().is_err());
    }

    #[test]
    fn test_normalized_clamps() {
        let mut config = Configuration::for_year(2025);
        config.moon.moon_size = 1000.0;
        config.moon.moon_offset_x = -5.0;
        config.moon.latitude = 123.0;
        config.moon.moon_border_width = f64::NAN;
        let normalized = config.normalized();
        assert_eq!(normalized.moon.moon_size, 120.0);
        assert_eq!(normalized.moon.moon_offset_x, 0.0);
        assert_eq!(normalized.moon.latitude, 90.0);
        assert_eq!(normalized.moon.moon_border_width, 1.5);
    }

    #[test]
    fn test_large_moon_mode() {
        let mut config = Configuration::for_year(2025);
        assert!(!config.large_moon(), "display mode none disables large moons");
        config.moon.moon_display_mode = MoonDisplayMode::Illumination;
        assert!(config.large_moon());
        config.moon.moon_size = 14.9;
        assert!(!config.large_moon());
    }

    #[test]
    fn test_custom_dates_for_year() {
        let config = Configuration::from_json_str(
            r#"{
                "year": 2025,
                "customDates": {
                    "2025-03-14": {"emoji": "🥧", "title": "Pi Day"},
                    "2024-03-14": {"emoji": "🥧", "title": "Old"},
                    "12-25": [{"emoji": "🎄"}, {"emoji": "🎁"}],
                    "02-29": {"emoji": "🐸"},
                    "garbage": {"emoji": "?"}
                }
            }"#,
        )
        .unwrap();

        let resolved = config.custom_dates_for_year();
        assert_eq!(resolved.len(), 2);
        let pi_day = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        assert_eq!(resolved[&pi_day][0].title_text(), Some("Pi Day"));
        let christmas = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap();
        assert_eq!(resolved[&christmas].len(), 2);
    }

    #[test]
    fn test_save_and_load_toml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("calendar.toml");

        let mut config = Configuration::for_year(2026);
        config.theme = "rainbowDays2".to_string();
        config.holiday_sets.insert("us".to_string());
        config.custom_dates.insert(
            "2026-07-04".to_string(),
            CustomDateEntry::new("🎆", "Fireworks").into(),
        );
        config.save(&path).unwrap();

        let loaded = Configuration::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_other_formats() {
        let temp = TempDir::new().unwrap();

        let json5_path = temp.path().join("calendar.json5");
        fs::write(&json5_path, "{ year: 2030, theme: 'ocean', /* comment */ }").unwrap();
        assert_eq!(Configuration::load(&json5_path).unwrap().theme, "ocean");

        let yaml_path = temp.path().join("calendar.yaml");
        fs::write(&yaml_path, "year: 2031\nlayoutStyle: weekday-grid\n").unwrap();
        let yaml = Configuration::load(&yaml_path).unwrap();
        assert_eq!(yaml.layout_style, LayoutStyle::WeekdayGrid);

        let bad_path = temp.path().join("calendar.json");
        fs::write(&bad_path, r#"{"year": 12}"#).unwrap();
        assert!(Configuration::load(&bad_path).is_err());
    }
}
