//! # obvl CLI
//!
//! Command-line launcher for obverter referential-game training runs.
//!
//! ## Usage
//!
//! - `obvl` - Launch the trainer under the pdb post-mortem harness
//! - `obvl --use_cuda --seed 42` - Launch with hyperparameter overrides
//! - `obvl --dry-run` - Print the full command line without launching
//! - `obvl args` - Print the forwarded trainer argv, one entry per line
//! - `obvl config` - Print the resolved configuration as JSON
//!
//! Hyperparameters come from a config file (`obverter.json`,
//! `.obverter/config.json`, or XDG) when present, with flags overriding and
//! the reference invocation's literals as the fallback.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;

use commands::{args_command, config_command, launch_command, LaunchOptions};
use config::{CliConfigLoader, TrainArgs};

/// obvl - debugging launcher for obverter referential-game training
#[derive(Parser)]
#[command(name = "obvl")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Launch obverter referential-game training under a post-mortem debugger")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file or directory path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Trainer entrypoint script
    #[arg(long, default_value = "train_obverter.py")]
    script: PathBuf,

    /// Python interpreter to use (default: python3/python from PATH)
    #[arg(long)]
    python: Option<PathBuf>,

    /// Run the trainer without the pdb harness
    #[arg(long)]
    no_debugger: bool,

    /// Print the full command line instead of launching
    #[arg(long)]
    dry_run: bool,

    /// Working directory for the trainer
    #[arg(long)]
    working_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(flatten)]
    train: TrainArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the forwarded trainer argument vector, one entry per line
    Args,

    /// Print the resolved experiment configuration as JSON
    Config,
}

/// Build a configuration loader from CLI arguments
fn build_config_loader(cli: &Cli) -> CliConfigLoader {
    let mut loader = CliConfigLoader::new().with_train_overrides(cli.train.clone());

    if let Some(config_path) = &cli.config {
        loader = loader.with_config_override(config_path.clone());
    }

    loader
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let config_loader = build_config_loader(&cli);

    match cli.command {
        Some(Commands::Args) => args_command(config_loader).await,
        Some(Commands::Config) => config_command(config_loader).await,
        None => {
            let options = LaunchOptions {
                script: cli.script,
                python: cli.python,
                no_debugger: cli.no_debugger,
                dry_run: cli.dry_run,
                working_dir: cli.working_dir,
            };
            launch_command(config_loader, options).await
        }
    }
}
