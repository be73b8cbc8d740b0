//! Emoji and text glyph rendering.
//!
//! Emoji are drawn from embedded vector sprites when one exists, and as text
//! otherwise. Sprites are emitted once per document as `<symbol>` elements and
//! referenced from each cell with `<use>`, so a sprite used on 52 Sundays is
//! stored once.

pub mod emoji;
pub mod text;

pub use emoji::{
    calculate_emoji_position, is_monochrome_font, monochrome_color, monochrome_substitute,
    render_emoji, EmojiRender,
};
pub use text::{render_event_text, truncate_title, wrap_title, EventTextStyle};

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Write;
use std::sync::OnceLock;

/// Variation selector 16, ignored when matching sprites.
const VARIATION_SELECTOR: char = '\u{FE0F}';

/// Source of vector artwork for emoji.
pub trait SpriteLookup {
    /// Whether a sprite exists for the emoji.
    fn has_sprite(&self, emoji: &str) -> bool;

    /// The sprite's inner SVG markup (in a 36×36 coordinate system).
    fn sprite_markup(&self, emoji: &str) -> Option<&str>;
}

/// How a glyph will be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlyphSource<'a> {
    /// A vector sprite
    Sprite {
        /// Id of the `<symbol>` element
        symbol_id: String,
        /// Inner markup of the symbol
        markup: &'a str,
    },
    /// A text glyph
    Text(String),
}

/// Picks the sprite for an emoji, or falls back to drawing it as text.
#[must_use]
pub fn resolve_glyph<'a>(sprites: &'a dyn SpriteLookup, emoji: &str) -> GlyphSource<'a> {
    match sprites.sprite_markup(emoji) {
        Some(markup) => GlyphSource::Sprite {
            symbol_id: symbol_id(emoji),
            markup,
        },
        None => GlyphSource::Text(emoji.to_string()),
    }
}

/// `emoji-<codepoints>` id, e.g. `emoji-2b50` for ⭐.
#[must_use]
pub fn symbol_id(emoji: &str) -> String {
    let codepoints: Vec<String> = normalize(emoji)
        .chars()
        .map(|c| format!("{:x}", u32::from(c)))
        .collect();
    format!("emoji-{}", codepoints.join("-"))
}

fn normalize(emoji: &str) -> String {
    emoji
        .trim()
        .chars()
        .filter(|c| *c != VARIATION_SELECTOR)
        .collect()
}

/// Sprite definition from sprites.json.
#[derive(Debug, Clone, Deserialize)]
struct SpriteDefinition {
    emoji: String,
    svg: String,
}

/// Schema of sprites.json.
#[derive(Debug, Deserialize)]
struct SpriteFile {
    sprites: Vec<SpriteDefinition>,
}

/// Sprites embedded in the binary, keyed by emoji without variation selectors.
#[derive(Debug, Clone, Default)]
pub struct SpriteCache {
    sprites: HashMap<String, String>,
}

impl SpriteCache {
    /// Loads the sprites embedded in the binary.
    pub fn load() -> Result<Self> {
        let json_data = include_str!("sprites.json");
        let file: SpriteFile =
            serde_json::from_str(json_data).context("Failed to parse embedded sprites.json")?;
        Ok(Self::from_pairs(
            file.sprites.into_iter().map(|sprite| (sprite.emoji, sprite.svg)),
        ))
    }

    /// Builds a cache from `(emoji, markup)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            sprites: pairs
                .into_iter()
                .map(|(emoji, markup)| (normalize(&emoji), markup))
                .collect(),
        }
    }

    /// Number of sprites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

impl SpriteLookup for SpriteCache {
    fn has_sprite(&self, emoji: &str) -> bool {
        self.sprites.contains_key(&normalize(emoji))
    }

    fn sprite_markup(&self, emoji: &str) -> Option<&str> {
        self.sprites.get(&normalize(emoji)).map(String::as_str)
    }
}

/// The process-wide sprite cache.
pub fn sprites() -> &'static SpriteCache {
    static CACHE: OnceLock<SpriteCache> = OnceLock::new();
    CACHE.get_or_init(|| {
        SpriteCache::load().unwrap_or_else(|err| {
            tracing::error!("{err:#}");
            SpriteCache::default()
        })
    })
}

/// Symbols referenced by a document, emitted once into `<defs>`.
#[derive(Debug, Clone, Default)]
pub struct SymbolDefs {
    symbols: BTreeMap<String, String>,
}

impl SymbolDefs {
    /// Registers a symbol; repeated ids are stored once.
    pub fn insert(&mut self, id: &str, markup: &str) {
        if !self.symbols.contains_key(id) {
            self.symbols.insert(id.to_string(), markup.to_string());
        }
    }

    /// Whether a symbol id is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.symbols.contains_key(id)
    }

    /// Number of registered symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether no symbol is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// `<symbol>` elements for every registered sprite.
    #[must_use]
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        for (id, markup) in &self.symbols {
            let _ = write!(
                out,
                r#"<symbol id="{id}" viewBox="0 0 36 36">{markup}</symbol>"#
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_sprites_load() {
        let cache = SpriteCache::load().unwrap();
        assert!(cache.len() >= 20);
        assert!(cache.has_sprite("🎂"));
        assert!(cache.has_sprite("❤️"));
        assert!(cache.has_sprite("❤"), "variation selector is ignored");
        assert!(!cache.has_sprite("🦄"));
    }

    #[test]
    fn test_symbol_id() {
        assert_eq!(symbol_id("⭐"), "emoji-2b50");
        assert_eq!(symbol_id("❤️"), "emoji-2764");
        assert_eq!(symbol_id("🇺🇸"), "emoji-1f1fa-1f1f8");
    }

    #[test]
    fn test_resolve_glyph_is_exhaustive() {
        let cache = SpriteCache::from_pairs([("⭐".to_string(), "<circle r=\"1\"/>".to_string())]);
        match resolve_glyph(&cache, "⭐") {
            GlyphSource::Sprite { symbol_id, markup } => {
                assert_eq!(symbol_id, "emoji-2b50");
                assert_eq!(markup, "<circle r=\"1\"/>");
            }
            GlyphSource::Text(_) => panic!("expected sprite"),
        }
        assert_eq!(
            resolve_glyph(&cache, "🦄"),
            GlyphSource::Text("🦄".to_string())
        );
    }

    #[test]
    fn test_symbol_defs_dedupe() {
        let mut defs = SymbolDefs::default();
        defs.insert("emoji-2b50", "<path/>");
        defs.insert("emoji-2b50", "<path/>");
        assert_eq!(defs.len(), 1);
        assert_eq!(
            defs.to_markup(),
            r#"<symbol id="emoji-2b50" viewBox="0 0 36 36"><path/></symbol>"#
        );
    }
}
