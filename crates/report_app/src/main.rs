mod platform;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use platform::settings::{self, AppSettings};

#[derive(Debug, Parser)]
#[command(
    name = "report-studio",
    version,
    about = "Configure, generate and read space-industry research reports from the terminal"
)]
struct Cli {
    /// Settings file (RON). Missing files fall back to defaults.
    #[arg(long, default_value = settings::DEFAULT_SETTINGS_FILE)]
    settings: PathBuf,
    /// Log at debug level regardless of the settings file.
    #[arg(long)]
    verbose: bool,
    /// Print the effective settings as RON and exit.
    #[arg(long)]
    print_settings: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (settings, load) = settings::load_or_default(&cli.settings);

    if cli.print_settings {
        let text = settings::to_ron(&settings).context("serializing settings")?;
        println!("{text}");
        return Ok(());
    }

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        settings.log_level()
    };
    report_logging::initialize(settings.log_destination.into(), level, &settings.log_file);
    load.log(&cli.settings);

    run(settings)
}

fn run(settings: AppSettings) -> Result<()> {
    platform::app::run_app(settings).context("report studio stopped unexpectedly")
}
