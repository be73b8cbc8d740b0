//! String-keyed configuration options resolved into closed enums.
//!
//! Every option parses leniently: unknown or empty strings and `null` fall
//! back to the documented default instead of failing deserialization.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Page layout style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum LayoutStyle {
    /// Twelve month blocks with weeks as rows
    #[default]
    Default,
    /// Seven weekday columns across the page, one row per week of the year
    WeekdayGrid,
}

impl LayoutStyle {
    /// Parses a layout style id; anything unrecognized is `Default`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "weekday-grid" | "weekdayGrid" => Self::WeekdayGrid,
            _ => Self::Default,
        }
    }

    /// The canonical id.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::WeekdayGrid => "weekday-grid",
        }
    }
}

/// When moon artwork is drawn in day cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum MoonDisplayMode {
    /// No moons
    #[default]
    None,
    /// The illuminated disc on every day
    Illumination,
    /// Only on the days of the four principal phases
    Phases,
    /// Only on full-moon days
    FullOnly,
}

impl MoonDisplayMode {
    /// Parses a moon display mode id; anything unrecognized is `None`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "illumination" => Self::Illumination,
            "phases" => Self::Phases,
            "full-only" | "fullOnly" | "full" => Self::FullOnly,
            _ => Self::None,
        }
    }

    /// The canonical id.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Illumination => "illumination",
            Self::Phases => "phases",
            Self::FullOnly => "full-only",
        }
    }
}

/// How holiday and custom-date events are drawn inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum EventDisplayMode {
    /// Events are not drawn
    None,
    /// Large emoji only
    #[default]
    Large,
    /// Large emoji plus title text
    LargeText,
    /// Small emoji only
    Small,
    /// Small emoji plus title text
    SmallText,
    /// Title text only
    Text,
}

impl EventDisplayMode {
    /// Parses an event display mode id; anything unrecognized is `Large`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "none" => Self::None,
            "large-text" => Self::LargeText,
            "small" => Self::Small,
            "small-text" => Self::SmallText,
            "text" => Self::Text,
            _ => Self::Large,
        }
    }

    /// The canonical id.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Large => "large",
            Self::LargeText => "large-text",
            Self::Small => "small",
            Self::SmallText => "small-text",
            Self::Text => "text",
        }
    }

    /// Whether the emoji is drawn at all.
    #[must_use]
    pub const fn shows_emoji(&self) -> bool {
        matches!(
            self,
            Self::Large | Self::LargeText | Self::Small | Self::SmallText
        )
    }

    /// Whether the emoji is drawn large.
    #[must_use]
    pub const fn is_large(&self) -> bool {
        matches!(self, Self::Large | Self::LargeText)
    }

    /// Whether the event title is drawn (callers still skip empty titles).
    #[must_use]
    pub const fn shows_text(&self) -> bool {
        matches!(self, Self::LargeText | Self::SmallText | Self::Text)
    }
}

/// One of the nine named anchors inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum EmojiPosition {
    /// Top edge, left side
    TopLeft,
    /// Top edge, centered
    TopCenter,
    /// Top edge, right side
    TopRight,
    /// Vertical middle, left side
    MiddleLeft,
    /// Cell center
    MiddleCenter,
    /// Vertical middle, right side
    MiddleRight,
    /// Bottom edge, left side
    #[default]
    BottomLeft,
    /// Bottom edge, centered
    BottomCenter,
    /// Bottom edge, right side
    BottomRight,
}

impl EmojiPosition {
    /// Parses an anchor id; unknown and empty strings are `BottomLeft`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "top-left" => Self::TopLeft,
            "top-center" => Self::TopCenter,
            "top-right" => Self::TopRight,
            "middle-left" => Self::MiddleLeft,
            "middle-center" | "center" => Self::MiddleCenter,
            "middle-right" => Self::MiddleRight,
            "bottom-center" => Self::BottomCenter,
            "bottom-right" => Self::BottomRight,
            _ => Self::BottomLeft,
        }
    }

    /// The canonical id.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopCenter => "top-center",
            Self::TopRight => "top-right",
            Self::MiddleLeft => "middle-left",
            Self::MiddleCenter => "middle-center",
            Self::MiddleRight => "middle-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomCenter => "bottom-center",
            Self::BottomRight => "bottom-right",
        }
    }

    /// Whether glyphs at this anchor are centered on it horizontally.
    #[must_use]
    pub const fn is_centered(&self) -> bool {
        matches!(
            self,
            Self::TopCenter | Self::MiddleCenter | Self::BottomCenter
        )
    }
}

/// Horizontal alignment of event text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum TextAlign {
    /// Text starts at the anchor
    #[default]
    Left,
    /// Text is centered on the anchor
    Center,
    /// Text ends at the anchor
    Right,
}

impl TextAlign {
    /// Parses an alignment id; anything unrecognized is `Left`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "center" | "middle" => Self::Center,
            "right" | "end" => Self::Right,
            _ => Self::Left,
        }
    }

    /// The canonical id.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }

    /// The SVG `text-anchor` value.
    #[must_use]
    pub const fn text_anchor(&self) -> &'static str {
        match self {
            Self::Left => "start",
            Self::Center => "middle",
            Self::Right => "end",
        }
    }
}

macro_rules! string_conversions {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<Option<String>> for $ty {
                fn from(value: Option<String>) -> Self {
                    value.as_deref().map_or_else(Self::default, Self::parse)
                }
            }

            impl From<$ty> for String {
                fn from(value: $ty) -> Self {
                    value.as_str().to_string()
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

string_conversions!(
    LayoutStyle,
    MoonDisplayMode,
    EventDisplayMode,
    EmojiPosition,
    TextAlign
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_values_fall_back() {
        assert_eq!(LayoutStyle::parse("spiral"), LayoutStyle::Default);
        assert_eq!(MoonDisplayMode::parse(""), MoonDisplayMode::None);
        assert_eq!(EventDisplayMode::parse("huge"), EventDisplayMode::Large);
        assert_eq!(EmojiPosition::parse(""), EmojiPosition::BottomLeft);
        assert_eq!(EmojiPosition::parse("upper-left"), EmojiPosition::BottomLeft);
        assert_eq!(TextAlign::parse("justify"), TextAlign::Left);
    }

    #[test]
    fn test_canonical_ids_round_trip() {
        for pos in [
            EmojiPosition::TopLeft,
            EmojiPosition::MiddleCenter,
            EmojiPosition::BottomRight,
        ] {
            assert_eq!(EmojiPosition::parse(pos.as_str()), pos);
        }
        assert_eq!(
            MoonDisplayMode::parse(MoonDisplayMode::FullOnly.as_str()),
            MoonDisplayMode::FullOnly
        );
    }

    #[test]
    fn test_event_mode_flags() {
        assert!(EventDisplayMode::LargeText.shows_text());
        assert!(EventDisplayMode::LargeText.is_large());
        assert!(!EventDisplayMode::Text.shows_emoji());
        assert!(EventDisplayMode::SmallText.shows_emoji());
        assert!(!EventDisplayMode::Small.is_large());
        assert!(!EventDisplayMode::None.shows_text());
    }

    #[test]
    fn test_serde_uses_string_ids() {
        let mode: MoonDisplayMode = serde_json::from_str("\"full-only\"").unwrap();
        assert_eq!(mode, MoonDisplayMode::FullOnly);
        let json = serde_json::to_string(&LayoutStyle::WeekdayGrid).unwrap();
        assert_eq!(json, "\"weekday-grid\"");
    }

    #[test]
    fn test_null_falls_back_to_default() {
        let pos: EmojiPosition = serde_json::from_str("null").unwrap();
        assert_eq!(pos, EmojiPosition::BottomLeft);
        let mode: EventDisplayMode = serde_json::from_str("null").unwrap();
        assert_eq!(mode, EventDisplayMode::Large);
    }
}
