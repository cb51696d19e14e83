//! Trainer launch command

use anyhow::Result;
use chrono::Utc;
use obverter_launch_core::{DebugHarness, LaunchRecord, LaunchRecorder, Launcher};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::CliConfigLoader;

/// Launch-time options that are not part of the forwarded configuration
pub struct LaunchOptions {
    /// Trainer entrypoint script
    pub script: PathBuf,
    /// Interpreter override
    pub python: Option<PathBuf>,
    /// Run without the pdb harness
    pub no_debugger: bool,
    /// Print the command line instead of launching
    pub dry_run: bool,
    /// Working directory for the trainer
    pub working_dir: Option<PathBuf>,
}

/// Resolve the configuration and launch the trainer
pub async fn launch_command(config_loader: CliConfigLoader, options: LaunchOptions) -> Result<()> {
    let config = config_loader.load().await?;

    let script = PathBuf::from(shellexpand::tilde(&options.script.to_string_lossy()).into_owned());
    let mut launcher = Launcher::new(&script);

    if let Some(python) = &options.python {
        launcher = launcher.with_interpreter(python);
    }
    if let Some(working_dir) = &options.working_dir {
        launcher = launcher.with_working_directory(working_dir);
    }
    if options.no_debugger {
        launcher = launcher.with_harness(DebugHarness::Disabled);
    }

    let command_line = launcher.command_line(&config)?;

    if options.dry_run {
        println!("{}", command_line.join(" "));
        return Ok(());
    }

    info!("Output directory: {}", config.parent_folder);
    if config.use_cuda {
        info!("Device: CUDA");
    }

    let started_at = Utc::now();
    let outcome = launcher.launch(&config).await?;

    // Record the launch before reporting; a record failure must not mask the
    // trainer's exit status.
    let record = LaunchRecord::from_outcome(
        &config,
        command_line,
        options.working_dir.as_deref(),
        started_at,
        &outcome,
    );
    let recorder = LaunchRecorder::new(&config.parent_folder);
    match recorder.save(&record).await {
        Ok(path) => info!("Launch record saved to: {}", path.display()),
        Err(e) => warn!("Failed to save launch record: {}", e),
    }

    if outcome.success() {
        info!("Trainer exited cleanly after {} ms", outcome.duration_ms);
        Ok(())
    } else {
        info!(
            "Trainer exited with code {} after {} ms",
            outcome.exit_code, outcome.duration_ms
        );
        std::process::exit(outcome.exit_code);
    }
}
