//! `themes` command: list the built-in themes.

use crate::cli::common::{CliError, CliResult};
use crate::theme::themes;
use clap::Args;
use serde::Serialize;

/// List built-in color themes
#[derive(Debug, Clone, Args)]
pub struct ThemesArgs {
    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ThemeSummary<'a> {
    id: &'a str,
    name: &'a str,
    description: &'a str,
    rainbow: bool,
}

impl ThemesArgs {
    /// Execute the themes command
    pub fn execute(&self) -> CliResult<()> {
        let summaries: Vec<ThemeSummary<'_>> = themes()
            .themes()
            .iter()
            .map(|theme| ThemeSummary {
                id: &theme.id,
                name: &theme.name,
                description: &theme.description,
                rainbow: theme.style.is_rainbow(),
            })
            .collect();

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&summaries)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
            return Ok(());
        }

        for theme in &summaries {
            println!("{:<20} {:<24} {}", theme.id, theme.name, theme.description);
        }
        Ok(())
    }
}
