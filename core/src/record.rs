//! Launch record persistence
//!
//! Every real launch leaves one JSON file behind so a run can be tied back to
//! the exact invocation that produced it. Records are observational only: a
//! failed write must never mask the trainer's own exit status, so callers log
//! and move on.

use crate::config::ExperimentConfig;
use crate::error::{RecordError, Result};
use crate::launcher::LaunchOutcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// One persisted launch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchRecord {
    /// Unique identifier for this launch
    pub id: String,

    /// When the trainer was started
    pub started_at: DateTime<Utc>,

    /// When the trainer exited
    pub finished_at: DateTime<Utc>,

    /// Full command line, interpreter first
    pub command_line: Vec<String>,

    /// Working directory the trainer ran in
    pub working_directory: Option<String>,

    /// The configuration record that was forwarded
    pub config: ExperimentConfig,

    /// Trainer exit code
    pub exit_code: i32,

    /// Whether the trainer exited cleanly
    pub success: bool,

    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
}

impl LaunchRecord {
    /// Build a record from a finished launch
    pub fn from_outcome(
        config: &ExperimentConfig,
        command_line: Vec<String>,
        working_directory: Option<&Path>,
        started_at: DateTime<Utc>,
        outcome: &LaunchOutcome,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            started_at,
            finished_at: Utc::now(),
            command_line,
            working_directory: working_directory.map(|p| p.to_string_lossy().into_owned()),
            config: config.clone(),
            exit_code: outcome.exit_code,
            success: outcome.success(),
            duration_ms: outcome.duration_ms,
        }
    }
}

/// Writes launch records under `<parent_folder>/launches/`
pub struct LaunchRecorder {
    directory: PathBuf,
}

impl LaunchRecorder {
    /// Create a recorder rooted at the experiment's parent folder
    pub fn new<P: AsRef<Path>>(parent_folder: P) -> Self {
        Self {
            directory: parent_folder.as_ref().join("launches"),
        }
    }

    /// The directory records are written into
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Persist one record, returning the path it was written to
    pub async fn save(&self, record: &LaunchRecord) -> Result<PathBuf> {
        let filename = format!(
            "launch_{}.json",
            record.started_at.format("%Y%m%d_%H%M%S")
        );
        let path = self.directory.join(filename);

        let json =
            serde_json::to_string_pretty(record).map_err(|e| RecordError::WriteFailed {
                message: format!("Failed to serialize launch record: {}", e),
            })?;

        fs::create_dir_all(&self.directory).await?;
        fs::write(&path, json).await?;

        Ok(path)
    }

    /// Load a record back from file
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<LaunchRecord> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(RecordError::LoadFailed {
                path: path.to_string_lossy().into_owned(),
            }
            .into());
        }

        let content = fs::read_to_string(path).await?;
        let record: LaunchRecord =
            serde_json::from_str(&content).map_err(|_| RecordError::InvalidFormat)?;

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_record() -> LaunchRecord {
        let config = ExperimentConfig::default();
        let outcome = LaunchOutcome {
            exit_code: 0,
            duration_ms: 1234,
        };
        LaunchRecord::from_outcome(
            &config,
            vec!["python3".to_string(), "train_obverter.py".to_string()],
            None,
            Utc::now(),
            &outcome,
        )
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let recorder = LaunchRecorder::new(dir.path());

        let record = sample_record();
        let path = recorder.save(&record).await.unwrap();

        assert!(path.starts_with(dir.path().join("launches")));

        let loaded = LaunchRecorder::load(&path).await.unwrap();
        assert_eq!(loaded.id, record.id);
        assert_eq!(loaded.exit_code, 0);
        assert!(loaded.success);
        assert_eq!(loaded.config, record.config);
    }

    #[tokio::test]
    async fn test_load_missing_record_fails() {
        let result = LaunchRecorder::load("/nonexistent/launch.json").await;
        assert!(result.is_err());
    }

    #[test]
    fn test_nonzero_exit_marks_failure() {
        let outcome = LaunchOutcome {
            exit_code: 1,
            duration_ms: 10,
        };
        let record = LaunchRecord::from_outcome(
            &ExperimentConfig::default(),
            vec![],
            None,
            Utc::now(),
            &outcome,
        );
        assert!(!record.success);
    }
}
