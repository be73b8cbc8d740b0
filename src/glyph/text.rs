//! Event titles: truncation, word wrapping and rotation.

use crate::constants::{MAX_SINGLE_LINE_CHARS, TEXT_FONT_FAMILY, TRUNCATED_CHARS, WRAP_MIN_CHARS};
use crate::models::{DisplaySettings, TextAlign};
use crate::svg::{rotate_attr, text, TextAttrs};

/// Line height as a multiple of the font size.
const LINE_HEIGHT: f64 = 1.15;

/// Resolved styling for one event title.
#[derive(Debug, Clone, Copy)]
pub struct EventTextStyle<'a> {
    /// Font size in px
    pub font_size: f64,
    /// Fill color
    pub color: &'a str,
    /// Horizontal alignment about the anchor
    pub align: TextAlign,
    /// Bold weight
    pub bold: bool,
    /// Wrap at word boundaries instead of truncating
    pub wrap: bool,
    /// Rotation in degrees about the anchor
    pub rotation: f64,
}

impl<'a> EventTextStyle<'a> {
    /// Plain style with the given size and color.
    #[must_use]
    pub const fn new(font_size: f64, color: &'a str) -> Self {
        Self {
            font_size,
            color,
            align: TextAlign::Left,
            bold: false,
            wrap: false,
            rotation: 0.0,
        }
    }

    /// Applies per-event overrides.
    #[must_use]
    pub fn with_settings(mut self, settings: Option<&DisplaySettings>) -> Self {
        if let Some(settings) = settings {
            if let Some(align) = settings.text_align {
                self.align = align;
            }
            self.bold = settings.text_bold.unwrap_or(self.bold);
            self.wrap = settings.text_wrap.unwrap_or(self.wrap);
            self.rotation = settings
                .text_rotation
                .filter(|deg| deg.is_finite())
                .unwrap_or(self.rotation);
        }
        self
    }
}

/// Keeps titles of up to ten characters; longer ones become nine characters and `…`.
#[must_use]
pub fn truncate_title(title: &str) -> String {
    if title.chars().count() > MAX_SINGLE_LINE_CHARS {
        let mut truncated: String = title.chars().take(TRUNCATED_CHARS).collect();
        truncated.push('…');
        truncated
    } else {
        title.to_string()
    }
}

/// Splits a title at word boundaries into at least two lines.
///
/// Returns `None` when the title is too short to wrap or has no space.
#[must_use]
pub fn wrap_title(title: &str) -> Option<Vec<String>> {
    let title = title.trim();
    if title.chars().count() <= WRAP_MIN_CHARS || !title.contains(' ') {
        return None;
    }

    let words: Vec<&str> = title.split_whitespace().collect();
    let longest = words.iter().map(|w| w.chars().count()).max().unwrap_or(0);
    let width = longest.max(MAX_SINGLE_LINE_CHARS);

    let mut lines: Vec<String> = Vec::new();
    for word in words.iter().copied() {
        match lines.last_mut() {
            Some(line) if line.chars().count() + 1 + word.chars().count() <= width => {
                line.push(' ');
                line.push_str(word);
            }
            _ => lines.push(word.to_string()),
        }
    }

    if lines.len() < 2 {
        // Everything fit on one line: break at the space nearest the middle
        let middle = title.chars().count() / 2;
        let split = title
            .char_indices()
            .filter(|(_, c)| *c == ' ')
            .map(|(idx, _)| idx)
            .min_by_key(|idx| title[..*idx].chars().count().abs_diff(middle))?;
        lines = vec![
            title[..split].trim().to_string(),
            title[split..].trim().to_string(),
        ];
    }
    Some(lines)
}

/// Draws an event title anchored at (`x`, `y`).
///
/// Wrapped titles become one `<text>` per line on successive baselines,
/// grouped in a `<g>` that carries the rotation.
#[must_use]
pub fn render_event_text(title: &str, x: f64, y: f64, style: &EventTextStyle<'_>) -> String {
    let title = title.trim();
    if title.is_empty() {
        return String::new();
    }

    let attrs = TextAttrs {
        size: style.font_size,
        fill: style.color,
        anchor: style.align.text_anchor(),
        bold: style.bold,
        family: TEXT_FONT_FAMILY,
    };
    let rotation = rotate_attr(style.rotation, x, y);

    let wrapped = if style.wrap { wrap_title(title) } else { None };
    match wrapped {
        Some(lines) => {
            let line_height = style.font_size * LINE_HEIGHT;
            let mut out = format!("<g{rotation}>");
            for (i, line) in lines.iter().enumerate() {
                out.push_str(&text(x, y + i as f64 * line_height, line, attrs, ""));
            }
            out.push_str("</g>");
            out
        }
        None => {
            let content = if style.wrap {
                title.to_string()
            } else {
                truncate_title(title)
            };
            text(x, y, &content, attrs, &rotation)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncation_threshold() {
        assert_eq!(truncate_title("Ten chars!"), "Ten chars!");
        assert_eq!(truncate_title("Eleven char"), "Eleven ch…");
        assert_eq!(truncate_title("Ünïcödé Tëxt"), "Ünïcödé T…");
    }

    #[test]
    fn test_wrap_requires_length_and_space() {
        assert_eq!(wrap_title("Birthday"), None, "8 chars is not longer than the minimum");
        assert_eq!(wrap_title("Anniversary"), None, "no space");
        assert_eq!(
            wrap_title("New Year's Day").unwrap(),
            vec!["New Year's".to_string(), "Day".to_string()]
        );
        assert_eq!(
            wrap_title("Earth Day!").unwrap(),
            vec!["Earth".to_string(), "Day!".to_string()]
        );
    }

    #[test]
    fn test_wrapped_output_has_multiple_lines() {
        let style = EventTextStyle {
            wrap: true,
            ..EventTextStyle::new(8.0, "#000")
        };
        let markup = render_event_text("Independence Day", 10.0, 20.0, &style);
        assert!(markup.starts_with("<g>"));
        assert_eq!(markup.matches("<text").count(), 2);
        assert!(markup.contains(r#"y="20""#));
        assert!(markup.contains(r#"y="29.2""#));
    }

    #[test]
    fn test_single_line_truncates_without_wrap() {
        let style = EventTextStyle::new(8.0, "#000");
        let markup = render_event_text("Independence Day", 10.0, 20.0, &style);
        assert!(markup.contains(">Independe…</text>"));
        assert!(!markup.contains("transform"));
    }

    #[test]
    fn test_rotation_only_when_nonzero() {
        let style = EventTextStyle {
            rotation: 45.0,
            ..EventTextStyle::new(8.0, "#000")
        };
        let markup = render_event_text("Hi", 10.0, 20.0, &style);
        assert!(markup.contains(r#"transform="rotate(45 10 20)""#));

        let wrapped = EventTextStyle {
            wrap: true,
            ..style
        };
        let markup = render_event_text("Independence Day", 10.0, 20.0, &wrapped);
        assert!(markup.starts_with(r#"<g transform="rotate(45 10 20)">"#));
    }

    #[test]
    fn test_settings_override_style() {
        let settings = DisplaySettings {
            text_align: Some(TextAlign::Center),
            text_bold: Some(true),
            text_rotation: Some(f64::NAN),
            ..DisplaySettings::default()
        };
        let style = EventTextStyle::new(8.0, "#000").with_settings(Some(&settings));
        assert_eq!(style.align, TextAlign::Center);
        assert!(style.bold);
        assert_eq!(style.rotation, 0.0);
    }
}
