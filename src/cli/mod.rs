//! CLI command handlers for YearCal.
//!
//! Headless access to the renderer for scripting and automation.

pub mod astro;
pub mod common;
pub mod moon;
pub mod render;
pub mod themes;

// Re-export types used by main.rs and tests
pub use astro::AstroArgs;
pub use common::{CliError, CliResult, ExitCode};
pub use moon::MoonArgs;
pub use render::{PdfArgs, RenderOptions, SvgArgs};
pub use themes::ThemesArgs;
