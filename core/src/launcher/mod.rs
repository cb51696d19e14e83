//! Trainer process launching
//!
//! The launcher builds the full command line (interpreter, harness arguments,
//! script path, rendered hyperparameter flags) and hands the terminal to the
//! trainer: stdio is inherited so the pdb session stays interactive. There is
//! no timeout and no retry; failures surface through the attached debugger.

mod harness;

pub use harness::DebugHarness;

use crate::config::ExperimentConfig;
use crate::error::{LaunchError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tokio::time::Instant;
use tracing::{debug, info};

/// Interpreter names tried in order when none is configured
const DEFAULT_INTERPRETERS: [&str; 2] = ["python3", "python"];

/// Result of one trainer run
#[derive(Debug, Clone)]
pub struct LaunchOutcome {
    /// Exit code of the trainer process (-1 if terminated by a signal)
    pub exit_code: i32,
    /// Wall-clock duration of the run in milliseconds
    pub duration_ms: u64,
}

impl LaunchOutcome {
    /// Whether the trainer exited cleanly
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Launches the external training script under a debugging harness
#[derive(Debug, Clone)]
pub struct Launcher {
    script: PathBuf,
    interpreter: Option<PathBuf>,
    working_directory: Option<PathBuf>,
    environment: HashMap<String, String>,
    harness: DebugHarness,
}

impl Launcher {
    /// Create a launcher for the given training script
    pub fn new<P: AsRef<Path>>(script: P) -> Self {
        Self {
            script: script.as_ref().to_path_buf(),
            interpreter: None,
            working_directory: None,
            environment: HashMap::new(),
            harness: DebugHarness::default(),
        }
    }

    /// Set an explicit interpreter instead of resolving one from PATH
    pub fn with_interpreter<P: AsRef<Path>>(mut self, interpreter: P) -> Self {
        self.interpreter = Some(interpreter.as_ref().to_path_buf());
        self
    }

    /// Set the working directory for the trainer process
    pub fn with_working_directory<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.working_directory = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Add an environment variable for the trainer process
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment.insert(key.into(), value.into());
        self
    }

    /// Select the debugging harness
    pub fn with_harness(mut self, harness: DebugHarness) -> Self {
        self.harness = harness;
        self
    }

    /// The training script path
    pub fn script(&self) -> &Path {
        &self.script
    }

    /// Resolve the interpreter binary, from the override or from PATH
    pub fn resolve_interpreter(&self) -> Result<PathBuf> {
        if let Some(interpreter) = &self.interpreter {
            return Ok(interpreter.clone());
        }

        for candidate in DEFAULT_INTERPRETERS {
            if let Ok(path) = which::which(candidate) {
                return Ok(path);
            }
        }

        Err(LaunchError::InterpreterNotFound {
            tried: DEFAULT_INTERPRETERS.join(", "),
        }
        .into())
    }

    /// The full command line this launcher would execute, interpreter first
    pub fn command_line(&self, config: &ExperimentConfig) -> Result<Vec<String>> {
        let interpreter = self.resolve_interpreter()?;

        let mut argv = Vec::new();
        argv.push(interpreter.to_string_lossy().into_owned());
        argv.extend(
            self.harness
                .interpreter_args()
                .iter()
                .map(|s| s.to_string()),
        );
        argv.push(self.script.to_string_lossy().into_owned());
        argv.extend(config.to_args());

        Ok(argv)
    }

    /// Spawn the trainer and wait for it to exit.
    ///
    /// Stdio is inherited: the debugger needs the terminal on an uncaught
    /// failure, and training output streams straight through.
    pub async fn launch(&self, config: &ExperimentConfig) -> Result<LaunchOutcome> {
        let script = match &self.working_directory {
            Some(dir) if self.script.is_relative() => dir.join(&self.script),
            _ => self.script.clone(),
        };
        if !script.exists() {
            return Err(LaunchError::ScriptNotFound {
                path: script.to_string_lossy().into_owned(),
            }
            .into());
        }

        let argv = self.command_line(config)?;
        info!("Launching trainer: {}", argv.join(" "));

        let mut cmd = Command::new(&argv[0]);
        cmd.args(&argv[1..]);

        if let Some(dir) = &self.working_directory {
            cmd.current_dir(dir);
        }

        for (key, value) in &self.environment {
            cmd.env(key, value);
        }

        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let start = Instant::now();
        let mut child = cmd.spawn().map_err(|e| LaunchError::SpawnFailed {
            message: e.to_string(),
        })?;

        let status = child.wait().await?;
        let exit_code = status.code().unwrap_or(-1);
        let duration_ms = start.elapsed().as_millis() as u64;

        debug!(
            "Trainer exited with code {} after {} ms",
            exit_code, duration_ms
        );

        Ok(LaunchOutcome {
            exit_code,
            duration_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn launcher() -> Launcher {
        Launcher::new("train_obverter.py").with_interpreter("/usr/bin/python3")
    }

    #[test]
    fn test_command_line_shape() {
        let config = ExperimentConfig::default();
        let argv = launcher().command_line(&config).unwrap();

        assert_eq!(argv[0], "/usr/bin/python3");
        assert_eq!(&argv[1..5], ["-m", "pdb", "-c", "continue"]);
        assert_eq!(argv[5], "train_obverter.py");
        assert_eq!(argv[6], "--parent_folder");
    }

    #[test]
    fn test_disabled_harness_runs_script_directly() {
        let config = ExperimentConfig::default();
        let argv = launcher()
            .with_harness(DebugHarness::Disabled)
            .command_line(&config)
            .unwrap();

        assert_eq!(argv[1], "train_obverter.py");
    }

    #[test]
    fn test_command_line_forwards_config_args() {
        let config = ExperimentConfig {
            seed: 42,
            ..Default::default()
        };
        let argv = launcher().command_line(&config).unwrap();
        let i = argv.iter().position(|a| a == "--seed").unwrap();
        assert_eq!(argv[i + 1], "42");
    }

    #[test]
    fn test_explicit_interpreter_wins_over_path_lookup() {
        let launcher = Launcher::new("train_obverter.py").with_interpreter("/opt/py/bin/python");
        assert_eq!(
            launcher.resolve_interpreter().unwrap(),
            PathBuf::from("/opt/py/bin/python")
        );
    }

    #[tokio::test]
    async fn test_launch_fails_on_missing_script() {
        let config = ExperimentConfig::default();
        let result = Launcher::new("/nonexistent/train_obverter.py")
            .with_interpreter("/usr/bin/python3")
            .launch(&config)
            .await;

        assert!(matches!(
            result,
            Err(crate::error::Error::Launch(
                LaunchError::ScriptNotFound { .. }
            ))
        ));
    }
}
