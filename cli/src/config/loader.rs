//! CLI configuration loader for Obverter Launch
//!
//! Implements single-source priority loading with flag overrides:
//! 1. --config file/dir (highest priority)
//! 2. Current working directory: ./obverter.json or ./.obverter/config.json
//! 3. Git repository root: <repo_root>/.obverter/config.json
//! 4. XDG config: $XDG_CONFIG_HOME/obverter/config.json or ~/.config/obverter/config.json
//! 5. Built-in defaults (the reference invocation's literals)

use anyhow::{anyhow, Context, Result};
use obverter_launch_core::ExperimentConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::TrainArgs;

/// CLI configuration loader
pub struct CliConfigLoader {
    /// Override config file/directory path
    config_override: Option<PathBuf>,
    /// Hyperparameter flag overrides, applied after file loading
    train_overrides: TrainArgs,
}

impl CliConfigLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self {
            config_override: None,
            train_overrides: TrainArgs::default(),
        }
    }

    /// Set config file/directory override
    pub fn with_config_override(mut self, path: PathBuf) -> Self {
        self.config_override = Some(path);
        self
    }

    /// Set hyperparameter flag overrides
    pub fn with_train_overrides(mut self, overrides: TrainArgs) -> Self {
        self.train_overrides = overrides;
        self
    }

    /// Load and resolve the experiment configuration
    pub async fn load(&self) -> Result<ExperimentConfig> {
        // Step 1: Find and load base configuration
        let mut config = if let Some(override_path) = &self.config_override {
            self.load_from_path(override_path).await.with_context(|| {
                format!(
                    "Failed to load config from override path: {}",
                    override_path.display()
                )
            })?
        } else {
            self.search_and_load().await?
        };

        // Step 2: Apply flag overrides
        self.train_overrides.apply(&mut config);

        // Step 3: Expand paths and validate
        config.parent_folder = shellexpand::tilde(&config.parent_folder).into_owned();
        config
            .validate()
            .map_err(|e| anyhow!("Configuration validation failed: {}", e))?;

        Ok(config)
    }

    /// Search for config in priority order; defaults when nothing is found
    async fn search_and_load(&self) -> Result<ExperimentConfig> {
        if let Some(config) = self.try_load_cwd().await? {
            return Ok(config);
        }

        if let Some(config) = self.try_load_git_root().await? {
            return Ok(config);
        }

        if let Some(config) = self.try_load_xdg().await? {
            return Ok(config);
        }

        // The original launcher carried its whole configuration inline, so a
        // missing config file is not an error.
        debug!("No config file found, using built-in defaults");
        Ok(ExperimentConfig::default())
    }

    /// Try loading from current working directory
    async fn try_load_cwd(&self) -> Result<Option<ExperimentConfig>> {
        let cwd = std::env::current_dir()?;

        let obverter_json = cwd.join("obverter.json");
        if obverter_json.exists() {
            return Ok(Some(self.load_file(&obverter_json).await?));
        }

        let dir_config = cwd.join(".obverter").join("config.json");
        if dir_config.exists() {
            return Ok(Some(self.load_file(&dir_config).await?));
        }

        Ok(None)
    }

    /// Try loading from git repository root
    async fn try_load_git_root(&self) -> Result<Option<ExperimentConfig>> {
        if let Some(git_root) = self.find_git_root()? {
            let config_path = git_root.join(".obverter").join("config.json");
            if config_path.exists() {
                return Ok(Some(self.load_file(&config_path).await?));
            }
        }
        Ok(None)
    }

    /// Try loading from XDG config directory
    async fn try_load_xdg(&self) -> Result<Option<ExperimentConfig>> {
        if let Some(config_dir) = self.get_xdg_config_dir() {
            let config_path = config_dir.join("obverter").join("config.json");
            if config_path.exists() {
                return Ok(Some(self.load_file(&config_path).await?));
            }
        }
        Ok(None)
    }

    /// Load configuration from a specific path (file or directory)
    async fn load_from_path(&self, path: &Path) -> Result<ExperimentConfig> {
        if path.is_file() {
            self.load_file(path).await
        } else if path.is_dir() {
            let config_file = path.join("config.json");
            if config_file.exists() {
                self.load_file(&config_file).await
            } else {
                Err(anyhow!(
                    "No config.json found in directory: {}",
                    path.display()
                ))
            }
        } else {
            Err(anyhow!("Config path does not exist: {}", path.display()))
        }
    }

    /// Load a single config file
    async fn load_file(&self, path: &Path) -> Result<ExperimentConfig> {
        debug!("Loading config file: {}", path.display());

        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Find git repository root
    fn find_git_root(&self) -> Result<Option<PathBuf>> {
        let mut current = std::env::current_dir()?;

        loop {
            if current.join(".git").exists() {
                return Ok(Some(current));
            }

            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                break;
            }
        }

        Ok(None)
    }

    /// Get XDG config directory
    fn get_xdg_config_dir(&self) -> Option<PathBuf> {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            Some(PathBuf::from(xdg_config))
        } else {
            dirs::config_dir()
        }
    }
}

impl Default for CliConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_explicit_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("experiment.json");
        tokio::fs::write(&path, r#"{"seed": 99, "vocab_size": 10}"#)
            .await
            .unwrap();

        let config = CliConfigLoader::new()
            .with_config_override(path)
            .load()
            .await
            .unwrap();

        assert_eq!(config.seed, 99);
        assert_eq!(config.vocab_size, 10);
        // Unlisted fields fall back to defaults
        assert_eq!(config.epoch, 10000);
    }

    #[tokio::test]
    async fn test_config_directory_resolves_config_json() {
        let dir = tempdir().unwrap();
        tokio::fs::write(dir.path().join("config.json"), r#"{"epoch": 500}"#)
            .await
            .unwrap();

        let config = CliConfigLoader::new()
            .with_config_override(dir.path().to_path_buf())
            .load()
            .await
            .unwrap();

        assert_eq!(config.epoch, 500);
    }

    #[tokio::test]
    async fn test_flag_overrides_beat_file_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("experiment.json");
        tokio::fs::write(&path, r#"{"seed": 99}"#).await.unwrap();

        let overrides = TrainArgs {
            seed: Some(7),
            ..Default::default()
        };
        let config = CliConfigLoader::new()
            .with_config_override(path)
            .with_train_overrides(overrides)
            .load()
            .await
            .unwrap();

        assert_eq!(config.seed, 7);
    }

    #[tokio::test]
    async fn test_missing_override_path_fails() {
        let result = CliConfigLoader::new()
            .with_config_override(PathBuf::from("/nonexistent/obverter.json"))
            .load()
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_invalid_file_values_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("experiment.json");
        tokio::fs::write(&path, r#"{"lr": -1.0}"#).await.unwrap();

        let result = CliConfigLoader::new()
            .with_config_override(path)
            .load()
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_tilde_expansion_of_parent_folder() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("experiment.json");
        tokio::fs::write(&path, r#"{"parent_folder": "~/obverter_runs"}"#)
            .await
            .unwrap();

        let config = CliConfigLoader::new()
            .with_config_override(path)
            .load()
            .await
            .unwrap();

        assert!(!config.parent_folder.starts_with('~'));
    }
}
