//! User-supplied dated events.

use super::options::TextAlign;
use serde::{Deserialize, Serialize};

/// Per-event display overrides. Absent fields use the event display mode defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplaySettings {
    /// Emoji size in px
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji_size: Option<f64>,
    /// Horizontal emoji position in percent of the cell width
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji_x: Option<f64>,
    /// Vertical emoji position in percent of the cell height
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji_y: Option<f64>,
    /// Title alignment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    /// Bold title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_bold: Option<bool>,
    /// Wrap long titles instead of truncating them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_wrap: Option<bool>,
    /// Title rotation in degrees
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_rotation: Option<f64>,
}

impl DisplaySettings {
    /// The explicit emoji position override, when both coordinates are given.
    #[must_use]
    pub fn emoji_offset(&self) -> Option<(f64, f64)> {
        match (self.emoji_x, self.emoji_y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((x, y)),
            _ => None,
        }
    }
}

/// A single event on a custom date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomDateEntry {
    /// Emoji or other glyph string
    pub emoji: String,
    /// Optional title drawn as text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Optional display overrides
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_settings: Option<DisplaySettings>,
}

impl CustomDateEntry {
    /// Creates an entry with an emoji and a title.
    #[must_use]
    pub fn new(emoji: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            emoji: emoji.into(),
            title: Some(title.into()),
            display_settings: None,
        }
    }

    /// The title, if present and not blank.
    #[must_use]
    pub fn title_text(&self) -> Option<&str> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
    }
}

/// One or several entries stored under the same date key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomDateEntries {
    /// An ordered list of entries
    Many(Vec<CustomDateEntry>),
    /// A single entry object
    One(CustomDateEntry),
}

impl CustomDateEntries {
    /// The entries in their original order.
    #[must_use]
    pub fn as_slice(&self) -> &[CustomDateEntry] {
        match self {
            Self::One(entry) => std::slice::from_ref(entry),
            Self::Many(entries) => entries,
        }
    }
}

impl From<CustomDateEntry> for CustomDateEntries {
    fn from(entry: CustomDateEntry) -> Self {
        Self::One(entry)
    }
}
