//! Application-wide constants.
//!
//! This module defines the application name plus the page geometry and text
//! layout constants shared by the layout engine, the glyph renderer and the
//! PDF transcoder.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "YearCal";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "yearcal";

/// Page width of a full-size sheet (US Letter, landscape).
pub const PAGE_WIDTH_INCHES: f64 = 11.0;

/// Page height of a full-size sheet (US Letter, landscape).
pub const PAGE_HEIGHT_INCHES: f64 = 8.5;

/// Unprintable border kept on every edge of the page.
pub const MARGIN_INCHES: f64 = 0.25;

/// Output-surface units per inch. SVG user units are CSS pixels.
pub const PX_PER_INCH: f64 = 96.0;

/// PDF points per inch.
pub const PT_PER_INCH: f64 = 72.0;

/// Uniform shrink factor applied to page, cell and font metrics in compact mode.
pub const COMPACT_SCALE: f64 = 0.85;

/// Lowest year the renderer accepts.
pub const MIN_YEAR: i32 = 1000;

/// Highest year the renderer accepts.
pub const MAX_YEAR: i32 = 9999;

/// Titles longer than this are truncated when wrapping is off.
pub const MAX_SINGLE_LINE_CHARS: usize = 10;

/// Visible characters kept in front of the ellipsis when truncating.
pub const TRUNCATED_CHARS: usize = 9;

/// Titles must be longer than this (and contain a space) to be wrapped.
pub const WRAP_MIN_CHARS: usize = 8;

/// Moon sizes at or above this switch the renderer into large-moon mode.
pub const LARGE_MOON_MIN_SIZE: f64 = 15.0;

/// Fully transparent white, the "no fill" cell background.
pub const TRANSPARENT_FILL: &str = "rgba(255,255,255,0)";

/// Emoji font id selecting monochrome glyphs in the day text color.
pub const MONO_EMOJI_FONT: &str = "noto-mono";

/// Prefix of monochrome emoji font variants, e.g. `mono-red`.
pub const MONO_EMOJI_PREFIX: &str = "mono-";

/// Font family used to draw monochrome emoji.
pub const MONO_EMOJI_FAMILY: &str = "Noto Emoji";

/// Font family used for all calendar text.
pub const TEXT_FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";
