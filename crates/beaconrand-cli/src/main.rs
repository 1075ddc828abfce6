//! CLI for beaconrand — statistical randomness auditing for RANDAO streams.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "beaconrand")]
#[command(about = "beaconrand — statistical randomness auditing for beacon-chain RANDAO values")]
#[command(version = beaconrand_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the statistical test battery over a collected RANDAO log
    Analyze {
        /// Path to the JSONL log of collected RANDAO values
        #[arg(long, short = 'l')]
        log_file: String,

        /// Write the full machine-readable report as JSON
        #[arg(long)]
        output: Option<String>,

        /// Write a Markdown summary report
        #[arg(long)]
        markdown: Option<String>,

        /// Run only the reduced battery (bias, Hamming, entropy, autocorrelation)
        #[arg(long)]
        basic: bool,

        /// Autocorrelation lag ceiling; reduced automatically on short streams
        #[arg(long, default_value = "50")]
        max_lag: usize,

        /// Seed for random-pair sampling (same input + seed = same report)
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Load a log and print sample diagnostics without running any test
    Inspect {
        /// Path to the JSONL log of collected RANDAO values
        #[arg(long, short = 'l')]
        log_file: String,
    },

    /// Convert a log to bitstream / per-sample bit / hex text files
    Export {
        /// Path to the JSONL log of collected RANDAO values
        #[arg(long, short = 'l')]
        log_file: String,

        /// Continuous bitstream output path
        #[arg(long)]
        bitstream: Option<String>,

        /// One-line-per-sample bit output path
        #[arg(long)]
        bitlines: Option<String>,

        /// Concatenated hex output path
        #[arg(long)]
        hex: Option<String>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            log_file,
            output,
            markdown,
            basic,
            max_lag,
            seed,
        } => commands::analyze::run(commands::analyze::AnalyzeCommandConfig {
            log_file: &log_file,
            output_path: output.as_deref(),
            markdown_path: markdown.as_deref(),
            basic,
            max_lag,
            seed,
        }),
        Commands::Inspect { log_file } => commands::inspect::run(&log_file),
        Commands::Export {
            log_file,
            bitstream,
            bitlines,
            hex,
        } => commands::export::run(
            &log_file,
            bitstream.as_deref(),
            bitlines.as_deref(),
            hex.as_deref(),
        ),
    }
}
