//! SVG and PDF rendering of whole calendars.
//!
//! - [`layout`]: page geometry and day cells
//! - [`moon`]: moon illumination glyphs
//! - [`calendar`]: the assembler that draws a complete document
//! - [`preview`]: viewBox normalization for arbitrary fragments

pub mod calendar;
pub mod layout;
pub mod moon;
pub mod preview;

pub use calendar::{render_calendar, CalendarRenderer};
pub use layout::{CalendarLayout, DayCell, PageGeometry};
pub use moon::{generate_moon_illumination_svg, render_moon, MoonStyle};
pub use preview::wrap_svg_for_preview;

use crate::config::Configuration;
use crate::error::Result;
use crate::glyph::sprites;
use crate::locale::locales;

/// Renders a configuration to an SVG document using the built-in sprites and
/// locale tables.
///
/// Fails only when the year is outside 1000..=9999.
pub fn generate_calendar_svg(config: &Configuration) -> Result<String> {
    render_calendar(config, sprites(), locales())
}

/// Renders a configuration to a one-page PDF.
///
/// The page is US Letter landscape, or the compact page size in compact mode.
pub fn generate_calendar_pdf(config: &Configuration) -> Result<Vec<u8>> {
    let svg = generate_calendar_svg(config)?;
    let page = PageGeometry::new(config.compact_mode);
    let title = format!("{} {}", crate::constants::APP_NAME, config.year);
    Ok(crate::pdf::render_pages_to_pdf(&[svg.as_str()], &page, &title)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_calendar_svg_validates_year() {
        assert!(generate_calendar_svg(&Configuration::for_year(2025)).is_ok());
        assert!(generate_calendar_svg(&Configuration::for_year(10_000)).is_err());
    }

    #[test]
    fn test_leap_year_document() {
        let svg = generate_calendar_svg(&Configuration::for_year(2024)).unwrap();
        assert!(svg.contains("2024"));
        assert!(svg.contains(r#"data-date="2024-02-29""#));
        assert!(!svg.contains(r#"data-date="2024-02-30""#));
    }
}
