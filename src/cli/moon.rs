//! `moon` command: a standalone moon glyph for one date.

use crate::cli::common::{load_configuration, write_output, CliError, CliResult};
use crate::render::{generate_moon_illumination_svg, wrap_svg_for_preview};
use crate::svg::{num, SVG_NS};
use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;

/// Draw the moon as seen on a date
#[derive(Debug, Clone, Args)]
pub struct MoonArgs {
    /// Date (YYYY-MM-DD)
    #[arg(short, long, value_name = "DATE")]
    pub date: String,

    /// Observer latitude in degrees
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub lat: f64,

    /// Observer longitude in degrees
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub lng: f64,

    /// Moon diameter in px
    #[arg(long, value_name = "PX")]
    pub size: Option<f64>,

    /// Configuration providing moon colors and border
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl MoonArgs {
    /// Execute the moon command
    pub fn execute(&self) -> CliResult<()> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").map_err(|e| {
            CliError::validation(format!("Invalid date '{}': {e}", self.date))
        })?;

        let mut config = load_configuration(self.config.as_deref(), None)?;
        if let Some(size) = self.size {
            if !size.is_finite() || size <= 0.0 {
                return Err(CliError::validation(format!("Invalid moon size: {size}")));
            }
            config.moon.moon_size = size;
        }

        let size = config.normalized().moon.moon_size;
        let extent = size + 2.0 * config.moon.moon_border_width.max(0.0) + 2.0;
        let center = extent / 2.0;
        let glyph = generate_moon_illumination_svg(date, center, center, self.lat, self.lng, &config);
        let svg = wrap_svg_for_preview(&format!(
            r#"<svg xmlns="{SVG_NS}" width="{e}" height="{e}">{glyph}</svg>"#,
            e = num(extent)
        ));

        match &self.output {
            Some(path) => {
                write_output(path, svg.as_bytes())?;
                println!("✓ Wrote {}", path.display());
            }
            None => println!("{svg}"),
        }
        Ok(())
    }
}
