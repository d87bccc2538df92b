mod analyze;
mod process;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "reviewlens")]
#[command(about = "Incremental restaurant review preprocessing")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Process new reviews from the raw batch and append them to the processed dataset
    Process {
        /// Raw scraper CSV (defaults to REVIEWLENS_INPUT_PATH)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Processed dataset to dedup against and append to (defaults to REVIEWLENS_OUTPUT_PATH)
        #[arg(long, conflicts_with = "no_persist")]
        output: Option<PathBuf>,

        /// Analyze the batch without deduplicating or writing anything
        #[arg(long)]
        no_persist: bool,

        /// Print the batch report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the derived fields for one review text
    Analyze {
        text: String,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = reviewlens_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(config.log_ansi())
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Process {
            input,
            output,
            no_persist,
            json,
        } => {
            let input = input.unwrap_or_else(|| config.input_path.clone());
            let output = if no_persist {
                None
            } else {
                Some(output.unwrap_or_else(|| config.output_path.clone()))
            };
            process::run_process(&config, &input, output.as_deref(), json)
        }
        Commands::Analyze { text, json } => analyze::run_analyze(&config, &text, json),
    }
}
