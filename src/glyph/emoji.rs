//! Emoji placement, monochrome substitution and markup.

use super::{resolve_glyph, GlyphSource, SpriteLookup, SymbolDefs};
use crate::constants::{MONO_EMOJI_FAMILY, MONO_EMOJI_FONT, MONO_EMOJI_PREFIX};
use crate::models::{Cell, DisplaySettings, EmojiPosition};
use crate::svg::{escape_xml, num};

/// Replacements for emoji that monochrome emoji fonts lack.
const MONOCHROME_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("🕎", "✡️"),
    ("🪔", "🕯️"),
    ("🧧", "🏮"),
    ("🪅", "🎉"),
    ("🫓", "🍞"),
    ("🥮", "🌕"),
    ("🪁", "🎈"),
    ("🪷", "🌸"),
];

/// Whether an emoji font id selects monochrome rendering.
#[must_use]
pub fn is_monochrome_font(font: Option<&str>) -> bool {
    font.map(str::trim)
        .is_some_and(|f| f == MONO_EMOJI_FONT || f.starts_with(MONO_EMOJI_PREFIX))
}

/// Fill color of monochrome emoji: the `mono-<color>` suffix, or `default`.
#[must_use]
pub fn monochrome_color<'a>(font: &'a str, default: &'a str) -> &'a str {
    font.trim()
        .strip_prefix(MONO_EMOJI_PREFIX)
        .map(str::trim)
        .filter(|color| !color.is_empty())
        .unwrap_or(default)
}

/// The glyph to draw for `emoji` under a monochrome font.
///
/// Unmapped emoji pass through unchanged.
#[must_use]
pub fn monochrome_substitute(emoji: &str) -> &str {
    MONOCHROME_SUBSTITUTIONS
        .iter()
        .find(|(from, _)| *from == emoji)
        .map_or(emoji, |(_, to)| *to)
}

/// Point for an anchor inside a cell, in absolute coordinates.
///
/// x: left = +5, center = w/2, right = w − 15.
/// y: top = +15, middle = h/2 + 5, bottom = h − 5.
#[must_use]
pub fn anchor_point(anchor: EmojiPosition, cell: &Cell) -> (f64, f64) {
    use EmojiPosition as P;

    let dx = match anchor {
        P::TopLeft | P::MiddleLeft | P::BottomLeft => 5.0,
        P::TopCenter | P::MiddleCenter | P::BottomCenter => cell.width / 2.0,
        P::TopRight | P::MiddleRight | P::BottomRight => cell.width - 15.0,
    };
    let dy = match anchor {
        P::TopLeft | P::TopCenter | P::TopRight => 15.0,
        P::MiddleLeft | P::MiddleCenter | P::MiddleRight => cell.height / 2.0 + 5.0,
        P::BottomLeft | P::BottomCenter | P::BottomRight => cell.height - 5.0,
    };
    (cell.x + dx, cell.y + dy)
}

/// Point for a named anchor; unknown or empty names use bottom-left.
#[must_use]
pub fn calculate_emoji_position(position: &str, cell: &Cell) -> (f64, f64) {
    anchor_point(EmojiPosition::parse(position), cell)
}

/// Everything needed to draw one emoji into a cell.
#[derive(Debug, Clone, Copy)]
pub struct EmojiRender<'a> {
    /// The emoji string
    pub emoji: &'a str,
    /// Target cell
    pub cell: &'a Cell,
    /// Default anchor
    pub anchor: EmojiPosition,
    /// Default size in px
    pub size: f64,
    /// Per-event overrides
    pub settings: Option<&'a DisplaySettings>,
    /// Emoji font id (`None` for color emoji)
    pub emoji_font: Option<&'a str>,
    /// Fill for `noto-mono` glyphs
    pub text_color: &'a str,
}

/// Draws an emoji as a sprite reference or a text glyph.
///
/// Sprites used are registered in `defs`. Returns an empty string for blank emoji.
pub fn render_emoji(
    request: &EmojiRender<'_>,
    sprites: &dyn SpriteLookup,
    defs: &mut SymbolDefs,
) -> String {
    let emoji = request.emoji.trim();
    if emoji.is_empty() {
        return String::new();
    }

    let cell = request.cell;
    let size = request
        .settings
        .and_then(|s| s.emoji_size)
        .filter(|size| size.is_finite() && *size > 0.0)
        .unwrap_or(request.size);

    let (x, y, centered) = match request.settings.and_then(DisplaySettings::emoji_offset) {
        Some((px, py)) => {
            let (x, y) = cell.point_at_percent(px, py);
            (x, y, true)
        }
        None => {
            let (x, y) = anchor_point(request.anchor, cell);
            (x, y, request.anchor.is_centered())
        }
    };

    if let Some(font) = request.emoji_font.filter(|f| is_monochrome_font(Some(*f))) {
        let glyph = monochrome_substitute(emoji);
        let fill = monochrome_color(font, request.text_color);
        return glyph_text(glyph, x, y, size, centered, Some((MONO_EMOJI_FAMILY, fill)));
    }

    match resolve_glyph(sprites, emoji) {
        GlyphSource::Sprite { symbol_id, markup } => {
            defs.insert(&symbol_id, markup);
            let (tx, ty) = if centered {
                (x - size / 2.0, y - size / 2.0)
            } else {
                (
                    x.min(cell.right() - size).max(cell.x),
                    (y - size).max(cell.y),
                )
            };
            format!(
                r##"<g transform="translate({} {})"><use xlink:href="#{}" width="{}" height="{}"/></g>"##,
                num(tx),
                num(ty),
                symbol_id,
                num(size),
                num(size)
            )
        }
        GlyphSource::Text(glyph) => glyph_text(&glyph, x, y, size, centered, None),
    }
}

fn glyph_text(
    glyph: &str,
    x: f64,
    y: f64,
    size: f64,
    centered: bool,
    mono: Option<(&str, &str)>,
) -> String {
    let mut attrs = format!(r#"x="{}" y="{}" font-size="{}""#, num(x), num(y), num(size));
    if let Some((family, fill)) = mono {
        attrs.push_str(&format!(
            r#" font-family="{}" fill="{}""#,
            escape_xml(family),
            escape_xml(fill)
        ));
    }
    if centered {
        attrs.push_str(r#" text-anchor="middle" dominant-baseline="central""#);
    }
    format!("<text {attrs}>{}</text>", escape_xml(glyph))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::SpriteCache;

    fn cell() -> Cell {
        Cell::new(100.0, 200.0, 60.0, 40.0)
    }

    fn request<'a>(emoji: &'a str, cell: &'a Cell) -> EmojiRender<'a> {
        EmojiRender {
            emoji,
            cell,
            anchor: EmojiPosition::BottomLeft,
            size: 16.0,
            settings: None,
            emoji_font: None,
            text_color: "#333333",
        }
    }

    #[test]
    fn test_anchor_offsets() {
        let c = cell();
        assert_eq!(calculate_emoji_position("top-left", &c), (105.0, 215.0));
        assert_eq!(calculate_emoji_position("middle-center", &c), (130.0, 225.0));
        assert_eq!(calculate_emoji_position("bottom-right", &c), (145.0, 235.0));
        assert_eq!(calculate_emoji_position("", &c), (105.0, 235.0));
        assert_eq!(calculate_emoji_position("sideways", &c), (105.0, 235.0));
    }

    #[test]
    fn test_monochrome_detection_and_color() {
        assert!(is_monochrome_font(Some("noto-mono")));
        assert!(is_monochrome_font(Some("mono-red")));
        assert!(!is_monochrome_font(Some("noto-color")));
        assert!(!is_monochrome_font(None));
        assert_eq!(monochrome_color("mono-red", "#333"), "red");
        assert_eq!(monochrome_color("noto-mono", "#333"), "#333");
    }

    #[test]
    fn test_substitution() {
        assert_eq!(monochrome_substitute("🕎"), "✡️");
        assert_eq!(monochrome_substitute("🪔"), "🕯️");
        assert_eq!(monochrome_substitute("🧧"), "🏮");
        assert_eq!(monochrome_substitute("🎂"), "🎂");
    }

    #[test]
    fn test_color_mode_never_substitutes() {
        let c = cell();
        let mut defs = SymbolDefs::default();
        let empty = SpriteCache::default();
        let markup = render_emoji(&request("🕎", &c), &empty, &mut defs);
        assert!(markup.contains("🕎"));
        assert!(!markup.contains("✡"));
    }

    #[test]
    fn test_monochrome_renders_text_with_font() {
        let c = cell();
        let mut defs = SymbolDefs::default();
        let req = EmojiRender {
            emoji_font: Some("mono-navy"),
            ..request("🕎", &c)
        };
        let markup = render_emoji(&req, &SpriteCache::default(), &mut defs);
        assert!(markup.contains("✡️"));
        assert!(markup.contains(r#"font-family="Noto Emoji""#));
        assert!(markup.contains(r#"fill="navy""#));
        assert!(defs.is_empty());
    }

    #[test]
    fn test_sprite_reference_and_defs() {
        let c = cell();
        let sprites =
            SpriteCache::from_pairs([("⭐".to_string(), "<circle r=\"18\"/>".to_string())]);
        let mut defs = SymbolDefs::default();
        let markup = render_emoji(&request("⭐", &c), &sprites, &mut defs);
        assert!(markup.starts_with("<g transform=\"translate("));
        assert!(markup.contains(r##"xlink:href="#emoji-2b50""##));
        assert!(defs.contains("emoji-2b50"));
    }

    #[test]
    fn test_text_fallback_centering() {
        let c = cell();
        let mut defs = SymbolDefs::default();
        let empty = SpriteCache::default();

        let left = render_emoji(&request("🦄", &c), &empty, &mut defs);
        assert!(!left.contains("text-anchor"));
        assert!(!left.contains("dominant-baseline"));

        let centered_req = EmojiRender {
            anchor: EmojiPosition::MiddleCenter,
            ..request("🦄", &c)
        };
        let centered = render_emoji(&centered_req, &empty, &mut defs);
        assert!(centered.contains(r#"text-anchor="middle" dominant-baseline="central""#));
    }

    #[test]
    fn test_percentage_override() {
        let c = cell();
        let settings = DisplaySettings {
            emoji_x: Some(50.0),
            emoji_y: Some(50.0),
            emoji_size: Some(10.0),
            ..DisplaySettings::default()
        };
        let req = EmojiRender {
            settings: Some(&settings),
            ..request("🦄", &c)
        };
        let markup = render_emoji(&req, &SpriteCache::default(), &mut SymbolDefs::default());
        assert!(markup.contains(r#"x="130" y="220" font-size="10""#));
        assert!(markup.contains("text-anchor=\"middle\""));
    }

    #[test]
    fn test_blank_emoji_renders_nothing() {
        let c = cell();
        let markup = render_emoji(
            &request("  ", &c),
            &SpriteCache::default(),
            &mut SymbolDefs::default(),
        );
        assert!(markup.is_empty());
    }
}
