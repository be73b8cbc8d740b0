//! `svg` and `pdf` commands: render a calendar to a file.

use crate::cli::common::{load_configuration, write_output, CliError, CliResult};
use crate::config::Configuration;
use crate::render::{generate_calendar_pdf, generate_calendar_svg};
use clap::Args;
use std::io::Write;
use std::path::PathBuf;

/// Options shared by both render commands
#[derive(Debug, Clone, Args)]
pub struct RenderOptions {
    /// Calendar configuration (.json, .json5, .toml, .yaml); defaults to the
    /// calendar file in the config directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the configured year
    #[arg(short, long, value_name = "YEAR")]
    pub year: Option<i32>,

    /// Override the configured theme
    #[arg(long, value_name = "THEME")]
    pub theme: Option<String>,

    /// Output file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl RenderOptions {
    fn configuration(&self) -> CliResult<Configuration> {
        let mut config = load_configuration(self.config.as_deref(), self.year)?;
        if let Some(theme) = &self.theme {
            config.theme.clone_from(theme);
        }
        Ok(config)
    }
}

/// Render a calendar as SVG
#[derive(Debug, Clone, Args)]
pub struct SvgArgs {
    /// Render options
    #[command(flatten)]
    pub options: RenderOptions,
}

impl SvgArgs {
    /// Execute the svg command
    ///
    /// Writes to `--output`, or to stdout when no output is given.
    pub fn execute(&self) -> CliResult<()> {
        let config = self.options.configuration()?;
        let svg = generate_calendar_svg(&config)?;

        match &self.options.output {
            Some(path) => {
                write_output(path, svg.as_bytes())?;
                println!("✓ Wrote {}", path.display());
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(svg.as_bytes())
                    .map_err(|e| CliError::io(format!("Failed to write SVG: {e}")))?;
            }
        }
        Ok(())
    }
}

/// Render a calendar as PDF
#[derive(Debug, Clone, Args)]
pub struct PdfArgs {
    /// Render options
    #[command(flatten)]
    pub options: RenderOptions,
}

impl PdfArgs {
    /// Execute the pdf command
    ///
    /// Writes to `--output`, or to `calendar-<year>.pdf` in the working
    /// directory.
    pub fn execute(&self) -> CliResult<()> {
        let config = self.options.configuration()?;
        let bytes = generate_calendar_pdf(&config)?;

        let path = self
            .options
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("calendar-{}.pdf", config.year)));
        write_output(&path, &bytes)?;
        println!("✓ Wrote {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }
}
