mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "commscope")]
#[command(about = "Cross-platform community normalization and engagement metrics")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Load every collector export, normalize, aggregate, and write all artifacts
    Run {
        /// Seed for synthetic engagement rates (overrides `COMMSCOPE_RNG_SEED`)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Load and normalize collector exports, writing only the integrated CSV
    Normalize {
        /// Seed for synthetic engagement rates (overrides `COMMSCOPE_RNG_SEED`)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Recompute cross-platform metrics from an integrated CSV
    Metrics {
        /// Integrated CSV to read (defaults to the one in the output directory)
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Score communities for student and professional relevance
    Classify {
        /// Integrated CSV to read (defaults to the one in the output directory)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Where to write the classified CSV
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = commscope_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::debug!(env = %config.env, "configuration loaded");

    match cli.command {
        Some(Commands::Run { seed }) => commands::run_full(&config, seed),
        Some(Commands::Normalize { seed }) => commands::run_normalize_only(&config, seed),
        Some(Commands::Metrics { input }) => commands::run_metrics(&config, input),
        Some(Commands::Classify { input, output }) => {
            commands::run_classify(&config, input, output)
        }
        None => {
            println!("commscope: no command given, see --help");
            Ok(())
        }
    }
}
