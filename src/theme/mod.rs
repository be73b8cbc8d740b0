//! Color theme engine.
//!
//! Themes are embedded in the binary as JSON and resolved once into a closed
//! [`ThemeStyle`] so that per-cell color decisions are an exhaustive match
//! instead of string comparisons.

pub mod color;

pub use color::{
    cell_background_color, is_weekend, rainbow_color, weekend_occurrence_index, year_gradient,
    ColorScheme, GradientStop, YEAR_GRADIENT_ID,
};

use crate::models::RgbColor;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Id of the theme used for unknown theme names.
pub const DEFAULT_THEME_ID: &str = "default";

/// Base colors every theme defines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    /// Year title
    pub year: String,
    /// Month labels
    pub month: String,
    /// Day numbers
    pub day_text: String,
    /// Day-name band
    pub day_name: String,
    /// Default weekend background
    pub weekend: String,
    /// Grid lines
    pub grid: String,
    /// Custom-date text
    pub custom_date: String,
    /// Page background
    pub background: String,
    /// Lit part of the moon
    pub moon_light: String,
    /// Dark part of the moon
    pub moon_dark: String,
    /// Moon outline
    pub moon_border: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            year: "#333333".to_string(),
            month: "#333333".to_string(),
            day_text: "#333333".to_string(),
            day_name: "#777777".to_string(),
            weekend: "#F0F0F0".to_string(),
            grid: "#CCCCCC".to_string(),
            custom_date: "#1E88E5".to_string(),
            background: "#FFFFFF".to_string(),
            moon_light: "#FFF8DC".to_string(),
            moon_dark: "#3A3A3A".to_string(),
            moon_border: "#555555".to_string(),
        }
    }
}

impl Palette {
    /// Every palette color with its field name.
    fn entries(&self) -> [(&'static str, &str); 11] {
        [
            ("year", &self.year),
            ("month", &self.month),
            ("dayText", &self.day_text),
            ("dayName", &self.day_name),
            ("weekend", &self.weekend),
            ("grid", &self.grid),
            ("customDate", &self.custom_date),
            ("background", &self.background),
            ("moonLight", &self.moon_light),
            ("moonDark", &self.moon_dark),
            ("moonBorder", &self.moon_border),
        ]
    }
}

/// How a theme colors day cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ThemeStyle {
    /// Weekend cells use the palette's weekend color
    Flat,
    /// Hue by day of week
    RainbowByWeekday,
    /// Hue by day of month
    RainbowByDayOfMonth,
    /// Hue by day of month, lightness by distance to December 31
    RainbowByDistanceFromYearEnd,
    /// Hue by day of year
    RainbowByDayOfYear,
    /// One weekend color per month
    #[serde(rename = "lookup-table-1d")]
    LookupTable1D {
        /// Twelve colors, January first
        #[serde(rename = "monthColors")]
        month_colors: Vec<String>,
    },
    /// Ordered weekend colors per month, indexed by weekend occurrence
    #[serde(rename = "lookup-table-2d")]
    LookupTable2D {
        /// Twelve rows, January first
        #[serde(rename = "weekendColors")]
        weekend_colors: Vec<Vec<String>>,
    },
}

impl ThemeStyle {
    /// Whether cell colors come from an HSL rainbow.
    #[must_use]
    pub const fn is_rainbow(&self) -> bool {
        matches!(
            self,
            Self::RainbowByWeekday
                | Self::RainbowByDayOfMonth
                | Self::RainbowByDistanceFromYearEnd
                | Self::RainbowByDayOfYear
        )
    }
}

/// A named theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Theme id as used in configurations
    pub id: String,
    /// Display name
    pub name: String,
    /// One-line description
    #[serde(default)]
    pub description: String,
    /// Base colors
    pub palette: Palette,
    /// Cell coloring strategy
    #[serde(flatten)]
    pub style: ThemeStyle,
}

impl Theme {
    fn fallback() -> Self {
        Self {
            id: DEFAULT_THEME_ID.to_string(),
            name: "Default".to_string(),
            description: String::new(),
            palette: Palette::default(),
            style: ThemeStyle::Flat,
        }
    }
}

/// Schema of themes.json.
#[derive(Debug, Deserialize)]
struct ThemeFile {
    themes: Vec<Theme>,
}

/// All built-in themes with lookup by id.
#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    themes: Vec<Theme>,
    lookup: HashMap<String, usize>,
}

impl ThemeRegistry {
    /// Loads the themes embedded in the binary.
    pub fn load() -> Result<Self> {
        let json_data = include_str!("themes.json");
        let file: ThemeFile =
            serde_json::from_str(json_data).context("Failed to parse embedded themes.json")?;
        Ok(Self::from_themes(file.themes))
    }

    fn from_themes(mut themes: Vec<Theme>) -> Self {
        if !themes.iter().any(|theme| theme.id == DEFAULT_THEME_ID) {
            themes.insert(0, Theme::fallback());
        }
        for theme in &themes {
            for (field, color) in theme.palette.entries() {
                if let Err(err) = RgbColor::from_hex(color) {
                    tracing::warn!("Theme '{}' has an invalid {field} color: {err:#}", theme.id);
                }
            }
        }
        let lookup = themes
            .iter()
            .enumerate()
            .map(|(idx, theme)| (theme.id.clone(), idx))
            .collect();
        Self { themes, lookup }
    }

    /// Themes in declaration order.
    #[must_use]
    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }

    /// Looks up a theme by exact id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Theme> {
        self.lookup.get(id).map(|&idx| &self.themes[idx])
    }

    /// Resolves a theme id, falling back to the default theme.
    #[must_use]
    pub fn resolve(&self, id: &str) -> &Theme {
        if let Some(theme) = self.get(id.trim()) {
            return theme;
        }
        tracing::warn!("Unknown theme '{id}', using '{DEFAULT_THEME_ID}'");
        &self.themes[self.lookup[DEFAULT_THEME_ID]]
    }
}

/// The process-wide theme registry.
pub fn themes() -> &'static ThemeRegistry {
    static REGISTRY: OnceLock<ThemeRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        ThemeRegistry::load().unwrap_or_else(|err| {
            tracing::error!("{err:#}");
            ThemeRegistry::from_themes(Vec::new())
        })
    })
}

/// Resolves a theme id against the built-in registry.
pub fn resolve_theme(id: &str) -> &'static Theme {
    themes().resolve(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_colors_are_hex() {
        for theme in ThemeRegistry::load().unwrap().themes() {
            for (field, color) in theme.palette.entries() {
                assert!(
                    RgbColor::from_hex(color).is_ok(),
                    "{} {field}: {color}",
                    theme.id
                );
            }
        }
    }

    #[test]
    fn test_embedded_themes_load() {
        let registry = ThemeRegistry::load().unwrap();
        assert_eq!(registry.themes().len(), 13);
        for id in [
            "default",
            "classic",
            "ocean",
            "midnight",
            "pastel",
            "rainbowDays",
            "rainbowDays1",
            "rainbowDays2",
            "rainbowDays3",
            "lakeshoreWeekends",
            "forestWeekends",
            "vermontWeekends",
            "sunsetWeekends",
        ] {
            assert!(registry.get(id).is_some(), "missing theme {id}");
        }
    }

    #[test]
    fn test_styles_resolve_to_closed_enum() {
        let registry = ThemeRegistry::load().unwrap();
        assert_eq!(registry.resolve("rainbowDays1").style, ThemeStyle::RainbowByWeekday);
        assert_eq!(
            registry.resolve("rainbowDays3").style,
            ThemeStyle::RainbowByDistanceFromYearEnd
        );
        match &registry.resolve("lakeshoreWeekends").style {
            ThemeStyle::LookupTable1D { month_colors } => assert_eq!(month_colors.len(), 12),
            other => panic!("unexpected style {other:?}"),
        }
        match &registry.resolve("vermontWeekends").style {
            ThemeStyle::LookupTable2D { weekend_colors } => {
                assert_eq!(weekend_colors.len(), 12);
                assert!(weekend_colors.iter().all(|row| !row.is_empty()));
            }
            other => panic!("unexpected style {other:?}"),
        }
    }

    #[test]
    fn test_unknown_theme_falls_back_to_default() {
        assert_eq!(resolve_theme("no-such-theme").id, DEFAULT_THEME_ID);
        assert_eq!(resolve_theme("").id, DEFAULT_THEME_ID);
    }

    #[test]
    fn test_empty_registry_still_has_default() {
        let registry = ThemeRegistry::from_themes(Vec::new());
        assert_eq!(registry.resolve("ocean").id, DEFAULT_THEME_ID);
        assert_eq!(registry.resolve("ocean").style, ThemeStyle::Flat);
    }
}
