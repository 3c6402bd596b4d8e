//! RideForge - text workouts to Zwift files
//!
//! Main entry point. With a file argument the file is converted in place;
//! without one every file in the queue directory is converted.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rideforge::convert::{process_single_file, Converter};
use rideforge::queue::process_queue;
use rideforge::storage::config::load_config;

#[derive(Parser, Debug)]
#[command(
    name = "rideforge",
    version,
    about = "Convert workout text files to Zwift ZWO format",
    after_help = "Queue mode (no FILE): converts every .txt in the queue directory into the \
                  output directory and moves each converted input to the archive directory.\n\
                  Single file mode: writes the .zwo and .png next to FILE and leaves it in place."
)]
struct Cli {
    /// Single .txt file to process (omit to process the queue)
    file: Option<PathBuf>,

    /// Configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip PNG chart generation
    #[arg(long)]
    no_chart: bool,

    /// Queue directory of pending .txt files
    #[arg(long)]
    queue_dir: Option<PathBuf>,

    /// Output directory for .zwo and .png files in queue mode
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Archive directory for processed .txt files
    #[arg(long)]
    archive_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref()).context("load configuration")?;
    if cli.no_chart {
        config.chart.enabled = false;
    }
    if let Some(dir) = cli.queue_dir {
        config.queue.queue_dir = dir;
    }
    if let Some(dir) = cli.output_dir {
        config.queue.output_dir = dir;
    }
    if let Some(dir) = cli.archive_dir {
        config.queue.archive_dir = dir;
    }

    let converter = Converter::from_config(&config).context("prepare converter")?;

    match cli.file {
        Some(file) => {
            process_single_file(&converter, &file)
                .with_context(|| format!("process '{}'", file.display()))?;
        }
        None => {
            let report = process_queue(&converter, &config.queue).context("process queue")?;
            if !report.is_empty() {
                tracing::info!(
                    converted = report.converted.len(),
                    failed = report.failed.len(),
                    "Queue finished"
                );
            }
        }
    }

    Ok(())
}
