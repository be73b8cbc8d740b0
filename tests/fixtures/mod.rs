//! Shared test fixtures for integration and E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use yearcal::models::{
    CustomDateEntries, CustomDateEntry, DisplaySettings, EventDisplayMode, MoonDisplayMode,
};
use yearcal::Configuration;

/// A default configuration with a fixed year.
pub fn test_config(year: i32) -> Configuration {
    Configuration::for_year(year)
}

/// A configuration with every optional feature turned on.
///
/// Holidays (US and Jewish), a single and a multi-entry custom date drawn
/// with emoji and title, moons in illumination mode, Hebrew dates, week
/// numbers and a rainbow theme.
pub fn test_config_full_featured(year: i32) -> Configuration {
    let mut config = Configuration::for_year(year);
    config.theme = "rainbowDays1".to_string();
    config.show_week_numbers = true;
    config.show_hebrew_dates = true;
    config.event_display_mode = EventDisplayMode::LargeText;
    config.moon.moon_display_mode = MoonDisplayMode::Illumination;
    config.moon.latitude = 40.7;
    config.moon.longitude = -74.0;
    config.holiday_sets = BTreeSet::from(["us".to_string(), "jewish".to_string()]);

    config.custom_dates.insert(
        format!("{year}-06-06"),
        CustomDateEntry::new("🧺", "Picnic").into(),
    );
    config.custom_dates.insert(
        "08-01".to_string(),
        CustomDateEntries::Many(vec![
            CustomDateEntry::new("🎂", "A very long birthday party title"),
            CustomDateEntry {
                emoji: "⭐".to_string(),
                title: None,
                display_settings: Some(DisplaySettings {
                    emoji_x: Some(75.0),
                    emoji_y: Some(25.0),
                    ..DisplaySettings::default()
                }),
            },
        ]),
    );
    config
}

/// Writes a configuration as JSON into a temp directory.
///
/// Returns the file path and the directory guard, which must be kept alive.
pub fn create_temp_config_file(config: &Configuration) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("calendar.json");
    let json = serde_json::to_string_pretty(config).expect("Failed to serialize config");
    fs::write(&path, json).expect("Failed to write config");
    (path, temp_dir)
}

/// Writes raw file content with the given file name into a temp directory.
pub fn create_temp_file(name: &str, content: &str) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(name);
    fs::write(&path, content).expect("Failed to write file");
    (path, temp_dir)
}

/// Counts non-overlapping occurrences of `needle`.
pub fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}
