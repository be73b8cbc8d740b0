//! Localized month and weekday names.
//!
//! Name tables are embedded in the binary and parsed once per process.
//! Lookup is forgiving: `de-AT` falls back to `de`, and unknown tags fall
//! back to English.

use anyhow::{Context, Result};
use chrono::Weekday;
use serde::Deserialize;
use std::sync::OnceLock;

/// Locale used when a tag matches nothing.
pub const DEFAULT_LOCALE: &str = "en";

/// Month and weekday names for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleNames {
    /// Locale tag, e.g. `de`
    pub tag: String,
    /// Month names, January first
    pub months: Vec<String>,
    /// Short weekday names, Sunday first
    pub weekdays: Vec<String>,
    /// Header of the week-number column
    #[serde(default = "default_week_label")]
    pub week_label: String,
}

fn default_week_label() -> String {
    "Wk".to_string()
}

impl LocaleNames {
    /// Name of a month, `month0` in 0..12.
    #[must_use]
    pub fn month(&self, month0: u32) -> &str {
        self.months
            .get(month0 as usize)
            .map_or("", String::as_str)
    }

    /// Short name of a weekday.
    #[must_use]
    pub fn weekday(&self, day: Weekday) -> &str {
        self.weekdays
            .get(day.num_days_from_sunday() as usize)
            .map_or("", String::as_str)
    }

    fn is_complete(&self) -> bool {
        self.months.len() == 12 && self.weekdays.len() == 7
    }
}

/// Source of localized names.
pub trait LocaleProvider {
    /// Names for a locale tag. Never fails; unknown tags get a fallback.
    fn names(&self, tag: &str) -> &LocaleNames;
}

#[derive(Debug, Deserialize)]
struct LocaleFile {
    locales: Vec<LocaleNames>,
}

/// The built-in locale tables.
#[derive(Debug, Clone)]
pub struct LocaleTable {
    locales: Vec<LocaleNames>,
    fallback: LocaleNames,
}

impl LocaleTable {
    /// Loads the tables embedded in the binary.
    pub fn load() -> Result<Self> {
        let json_data = include_str!("locales.json");
        let file: LocaleFile =
            serde_json::from_str(json_data).context("Failed to parse embedded locales.json")?;
        Ok(Self::from_locales(file.locales))
    }

    /// Builds a table from explicit entries; incomplete entries are dropped.
    #[must_use]
    pub fn from_locales(locales: Vec<LocaleNames>) -> Self {
        let (complete, incomplete): (Vec<_>, Vec<_>) =
            locales.into_iter().partition(LocaleNames::is_complete);
        for locale in &incomplete {
            tracing::warn!("Dropping incomplete locale table '{}'", locale.tag);
        }
        let fallback = complete
            .iter()
            .find(|l| l.tag == DEFAULT_LOCALE)
            .cloned()
            .unwrap_or_else(english);
        Self {
            locales: complete,
            fallback,
        }
    }

    /// Tags of every available locale.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.locales.iter().map(|l| l.tag.as_str())
    }

    fn find(&self, tag: &str) -> Option<&LocaleNames> {
        self.locales.iter().find(|l| l.tag.eq_ignore_ascii_case(tag))
    }
}

impl LocaleProvider for LocaleTable {
    fn names(&self, tag: &str) -> &LocaleNames {
        let tag = tag.trim().replace('_', "-");
        if let Some(names) = self.find(&tag) {
            return names;
        }
        if let Some(names) = tag.split('-').next().and_then(|lang| self.find(lang)) {
            return names;
        }
        if !tag.is_empty() {
            tracing::debug!("Unknown locale '{tag}', using {DEFAULT_LOCALE}");
        }
        &self.fallback
    }
}

impl Default for LocaleTable {
    fn default() -> Self {
        Self::from_locales(Vec::new())
    }
}

fn english() -> LocaleNames {
    let months = [
        "January", "February", "March", "April", "May", "June", "July", "August",
        "September", "October", "November", "December",
    ];
    let weekdays = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
    LocaleNames {
        tag: DEFAULT_LOCALE.to_string(),
        months: months.iter().map(ToString::to_string).collect(),
        weekdays: weekdays.iter().map(ToString::to_string).collect(),
        week_label: default_week_label(),
    }
}

/// The process-wide locale table.
pub fn locales() -> &'static LocaleTable {
    static TABLE: OnceLock<LocaleTable> = OnceLock::new();
    TABLE.get_or_init(|| {
        LocaleTable::load().unwrap_or_else(|err| {
            tracing::error!("{err:#}");
            LocaleTable::default()
        })
    })
}
