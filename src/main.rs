//! YearCal - single-page year calendar renderer
//!
//! Renders a configured year to SVG or PDF and prints the astronomical data
//! the calendar is drawn from.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use yearcal::cli::{AstroArgs, CliResult, MoonArgs, PdfArgs, SvgArgs, ThemesArgs};
use yearcal::constants::APP_BINARY_NAME;

/// YearCal - render a year onto a single printable page
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a calendar as SVG
    Svg(SvgArgs),
    /// Render a calendar as PDF
    Pdf(PdfArgs),
    /// Draw the moon for one date
    Moon(MoonArgs),
    /// Print moon phases, seasons and daylight for a year
    Astro(AstroArgs),
    /// List built-in themes
    Themes(ThemesArgs),
}

impl Command {
    fn execute(&self) -> CliResult<()> {
        match self {
            Self::Svg(args) => args.execute(),
            Self::Pdf(args) => args.execute(),
            Self::Moon(args) => args.execute(),
            Self::Astro(args) => args.execute(),
            Self::Themes(args) => args.execute(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so SVG written to stdout stays clean
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(err) = cli.command.execute() {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code().code());
    }
}
