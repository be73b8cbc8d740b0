//! `astro` command: moon phases, seasons and daylight for a year.

use crate::astronomy::{almanac, Almanac};
use crate::cli::common::{CliError, CliResult};
use crate::constants::{MAX_YEAR, MIN_YEAR};
use clap::Args;

/// Print the astronomical almanac of a year
#[derive(Debug, Clone, Args)]
pub struct AstroArgs {
    /// Gregorian year
    #[arg(short, long, value_name = "YEAR")]
    pub year: i32,

    /// Observer latitude in degrees
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub lat: f64,

    /// Observer longitude in degrees
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub lng: f64,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

impl AstroArgs {
    /// Execute the astro command
    pub fn execute(&self) -> CliResult<()> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&self.year) {
            return Err(CliError::validation(format!(
                "Year {} is outside the supported range {MIN_YEAR}..={MAX_YEAR}",
                self.year
            )));
        }
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(CliError::validation(format!(
                "Latitude {} is outside -90..=90",
                self.lat
            )));
        }

        let almanac = almanac(self.year, self.lat, self.lng);

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&almanac)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else {
            print_almanac(&almanac);
        }
        Ok(())
    }
}

fn print_almanac(almanac: &Almanac) {
    println!(
        "Almanac {} ({:.2}, {:.2})",
        almanac.year, almanac.latitude, almanac.longitude
    );

    println!("\nMoon phases (UTC):");
    for phase in &almanac.moon_phases {
        println!(
            "  {}  {:<14} {}",
            phase.date,
            phase.phase.name(),
            phase.instant.format("%H:%M")
        );
    }

    println!("\nSeasons:");
    for season in &almanac.seasons {
        let sun = &season.sun;
        println!(
            "  {}  {:<16} sunrise {:<5}  sunset {:<5}  daylight {}",
            season.event.date,
            season.event.kind.name(),
            sun.sunrise.as_deref().unwrap_or("--:--"),
            sun.sunset.as_deref().unwrap_or("--:--"),
            sun.day_length_minutes
                .map_or_else(|| "--".to_string(), |m| format!("{}h{:02}m", m / 60, m % 60))
        );
    }
}
