//! YearCal Library
//!
//! This library renders a whole year onto a single printable page: a grid of
//! day cells with theme colors, holiday and custom-date glyphs, lunar phase
//! artwork and optional Hebrew dates, emitted as SVG and transcoded to PDF.
//!
//! ```
//! use yearcal::{generate_calendar_svg, Configuration};
//!
//! let svg = generate_calendar_svg(&Configuration::for_year(2025)).unwrap();
//! assert!(svg.starts_with("<svg"));
//! ```

// Module declarations
pub mod astronomy;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod glyph;
pub mod holidays;
pub mod locale;
pub mod models;
pub mod pdf;
pub mod render;
pub mod svg;
pub mod theme;

// Re-export commonly used types
pub use config::Configuration;
pub use error::{CalendarError, PdfError, Result};
pub use pdf::{convert_color_for_pdf, render_svg_to_pdf};
pub use render::{
    generate_calendar_pdf, generate_calendar_svg, generate_moon_illumination_svg,
    wrap_svg_for_preview,
};
