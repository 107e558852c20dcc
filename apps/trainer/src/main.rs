use std::{io, path::PathBuf};

use anyhow::Result;
use catalog::{FileEventLog, TrainingCatalog};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod console;
mod render;

use config::{load_settings, ReportFormat};
use console::Console;

#[derive(Parser, Debug)]
#[command(name = "trainer", about = "Track training courses, employees and enrollments")]
struct Args {
    #[arg(long, default_value = "trainer.toml")]
    config: PathBuf,
    /// Overrides `log_file` from the config file and environment.
    #[arg(long)]
    log_file: Option<PathBuf>,
    #[arg(long, value_enum)]
    report_format: Option<ReportFormat>,
    /// Go straight to the menu without the bulk entry prompts.
    #[arg(long)]
    skip_setup: bool,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut settings = load_settings(&args.config)?;
    if let Some(log_file) = args.log_file {
        settings.log_file = log_file;
    }
    if let Some(report_format) = args.report_format {
        settings.report_format = report_format;
    }
    if args.skip_setup {
        settings.initial_setup = false;
    }

    let catalog = match FileEventLog::open(&settings.log_file) {
        Ok(log) => {
            info!(path = %log.path().display(), "event log opened");
            TrainingCatalog::new(log)
        }
        Err(error) => {
            warn!("event log unavailable, continuing without it: {error:#}");
            TrainingCatalog::default()
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(catalog, stdin.lock(), stdout.lock(), settings.report_format);
    if settings.initial_setup {
        console.run_setup()?;
    }
    console.run_menu()?;

    Ok(())
}
