//! Data models shared by the renderers.
//!
//! This module contains the plain value types used throughout the crate:
//! colors, cell rectangles, configuration option enums and custom date entries.
//! Models are independent of any rendering logic.

pub mod cell;
pub mod custom_date;
pub mod options;
pub mod rgb;

// Re-export all model types
pub use cell::Cell;
pub use custom_date::{CustomDateEntries, CustomDateEntry, DisplaySettings};
pub use options::{EmojiPosition, EventDisplayMode, LayoutStyle, MoonDisplayMode, TextAlign};
pub use rgb::{hsl_to_hex, RgbColor};
