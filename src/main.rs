//! 3MF Settings Analyzer
//!
//! Command-line tool that prints the slicer settings stored in a 3MF project:
//! the global profile, settings changed from the system preset, and every
//! object and part with the values it overrides.

#![forbid(unsafe_code)]

use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use threemf_settings::{Analyzer, Error, ReportOptions, write_json, write_report};
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Analyze 3MF files and display slicer settings
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = None,
    after_help = "Examples:\n  threemf-settings model.3mf\n  threemf-settings model.3mf --diff\n  threemf-settings model.3mf --json\n  threemf-settings model.3mf --no-color > output.txt"
)]
struct Args {
    /// Path to the 3MF file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Show the profile default next to every custom value
    #[arg(long)]
    diff: bool,

    /// Output JSON only (no formatted tables)
    #[arg(long)]
    json: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn use_color(no_color: bool) -> bool {
    !no_color && std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

fn run(args: &Args) -> Result<(), Error> {
    let is_3mf = args
        .file
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("3mf"));
    if !is_3mf {
        warn!(
            "File does not have .3mf extension: {}",
            args.file.display()
        );
    }

    let analysis = Analyzer::new(&args.file).analyze()?;

    let stdout = std::io::stdout().lock();
    if args.json {
        write_json(&analysis, stdout)
    } else {
        let options = ReportOptions::new()
            .with_diff(args.diff)
            .with_color(use_color(args.no_color));
        write_report(&analysis, &options, stdout)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
