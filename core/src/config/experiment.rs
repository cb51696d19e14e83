//! The experiment configuration record

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};

use super::AgentLossType;

/// Full hyperparameter set forwarded to the obverter trainer.
///
/// Field order matters: the argument vector is rendered in declaration order,
/// so two identical configs always produce identical invocations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Base output/log directory for the trainer
    pub parent_folder: String,

    /// Run the trainer on GPU
    pub use_cuda: bool,

    /// RNG seed forwarded to the trainer
    pub seed: u64,

    /// Games played per obverter round
    pub obverter_nbr_games_per_round: u32,

    /// Confidence threshold at which message generation stops (0-1)
    pub obverter_threshold_to_stop_message_generation: f64,

    /// Dropout on symbol embeddings (0-1)
    pub emb_dropout_prob: f64,

    /// Dropout on the remaining layers (0-1)
    pub dropout_prob: f64,

    /// Encode messages as one-hot vectors rather than embedding indices
    pub use_sentences_one_hot_vectors: bool,

    /// Stimulus batch size
    pub batch_size: u32,

    /// Mini-batch size used inside the obverter decoding loop
    pub mini_batch_size: u32,

    /// Square image resize dimension (forwarded as `--resizeDim`)
    pub resize_dim: u32,

    /// Vision backbone architecture name
    pub arch: String,

    /// Enable the descriptive game variant
    pub descriptive: bool,

    /// Ratio of descriptive rounds with the target present (0-1)
    pub descriptive_ratio: f64,

    /// Maximum message length in symbols
    pub max_sentence_length: u32,

    /// Number of distinct symbols available to the agents
    pub vocab_size: u32,

    /// Number of training epochs
    pub epoch: u32,

    /// Hidden units in the recurrent symbol encoder
    pub symbol_processing_nbr_hidden_units: u32,

    /// Symbol embedding dimensionality
    pub symbol_embedding_size: u32,

    /// Render scenes object-centrically
    pub object_centric: bool,

    /// Distractors per training sample
    pub nbr_train_distractors: u32,

    /// Distractors per test sample
    pub nbr_test_distractors: u32,

    /// Use the decision-head obverter variant
    pub obverter_use_decision_head: bool,

    /// Loss function selector
    pub agent_loss_type: AgentLossType,

    /// Use the fast approximate metric computation
    pub metric_fast: bool,

    /// Epochs between metric computations
    pub metric_epoch_period: u32,

    /// Distinct shapes in the generated 3D-shapes dataset
    pub nb_3dshapespybullet_shapes: u32,

    /// Distinct colors in the generated 3D-shapes dataset
    pub nb_3dshapespybullet_colors: u32,

    /// Samples generated per shape/color combination
    pub nb_3dshapespybullet_samples: u32,

    /// Colors reserved for the training split
    pub nb_3dshapespybullet_train_colors: u32,

    /// Learning rate
    pub lr: f64,

    /// Egocentric viewpoint augmentation. Recognized by the trainer but off
    /// in the reference invocation.
    pub egocentric: bool,

    /// Force an end-of-sentence symbol. Recognized by the trainer but off in
    /// the reference invocation.
    pub force_eos: bool,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            parent_folder: "./obverter_runs".to_string(),
            use_cuda: false,
            seed: 0,
            obverter_nbr_games_per_round: 20,
            obverter_threshold_to_stop_message_generation: 0.95,
            emb_dropout_prob: 0.0,
            dropout_prob: 0.0,
            use_sentences_one_hot_vectors: true,
            batch_size: 32,
            mini_batch_size: 32,
            resize_dim: 64,
            arch: "BN+CNN3x3".to_string(),
            descriptive: true,
            descriptive_ratio: 0.5,
            max_sentence_length: 5,
            vocab_size: 5,
            epoch: 10000,
            symbol_processing_nbr_hidden_units: 64,
            symbol_embedding_size: 64,
            object_centric: true,
            nbr_train_distractors: 3,
            nbr_test_distractors: 3,
            obverter_use_decision_head: true,
            agent_loss_type: AgentLossType::Nll,
            metric_fast: true,
            metric_epoch_period: 20,
            nb_3dshapespybullet_shapes: 5,
            nb_3dshapespybullet_colors: 8,
            nb_3dshapespybullet_samples: 100,
            nb_3dshapespybullet_train_colors: 6,
            lr: 0.001,
            egocentric: false,
            force_eos: false,
        }
    }
}

impl ExperimentConfig {
    /// Validate the configuration before launch
    pub fn validate(&self) -> Result<()> {
        Self::check_unit_interval(
            "obverter_threshold_to_stop_message_generation",
            self.obverter_threshold_to_stop_message_generation,
        )?;
        Self::check_unit_interval("emb_dropout_prob", self.emb_dropout_prob)?;
        Self::check_unit_interval("dropout_prob", self.dropout_prob)?;
        Self::check_unit_interval("descriptive_ratio", self.descriptive_ratio)?;

        if self.lr <= 0.0 || !self.lr.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "lr".to_string(),
                value: self.lr.to_string(),
            }
            .into());
        }

        Self::check_nonzero("batch_size", self.batch_size)?;
        Self::check_nonzero("mini_batch_size", self.mini_batch_size)?;
        Self::check_nonzero("vocab_size", self.vocab_size)?;
        Self::check_nonzero("max_sentence_length", self.max_sentence_length)?;
        Self::check_nonzero("epoch", self.epoch)?;
        Self::check_nonzero("resize_dim", self.resize_dim)?;
        Self::check_nonzero("metric_epoch_period", self.metric_epoch_period)?;

        if self.mini_batch_size > self.batch_size {
            return Err(ConfigError::InvalidValue {
                field: "mini_batch_size".to_string(),
                value: format!(
                    "{} (exceeds batch_size {})",
                    self.mini_batch_size, self.batch_size
                ),
            }
            .into());
        }

        if self.arch.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "arch".to_string(),
                value: "<empty>".to_string(),
            }
            .into());
        }

        if self.nb_3dshapespybullet_train_colors > self.nb_3dshapespybullet_colors {
            return Err(ConfigError::InvalidValue {
                field: "nb_3dshapespybullet_train_colors".to_string(),
                value: format!(
                    "{} (exceeds nb_3dshapespybullet_colors {})",
                    self.nb_3dshapespybullet_train_colors, self.nb_3dshapespybullet_colors
                ),
            }
            .into());
        }

        Ok(())
    }

    fn check_unit_interval(field: &str, value: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&value) || !value.is_finite() {
            return Err(ConfigError::OutOfRange {
                field: field.to_string(),
                value,
                min: 0.0,
                max: 1.0,
            }
            .into());
        }
        Ok(())
    }

    fn check_nonzero(field: &str, value: u32) -> Result<()> {
        if value == 0 {
            return Err(ConfigError::InvalidValue {
                field: field.to_string(),
                value: "0".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ExperimentConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_literals() {
        let config = ExperimentConfig::default();
        assert_eq!(config.seed, 0);
        assert_eq!(config.vocab_size, 5);
        assert_eq!(config.epoch, 10000);
        assert_eq!(config.lr, 0.001);
        assert_eq!(config.max_sentence_length, 5);
        assert!(!config.use_cuda);
        assert!(!config.egocentric);
        assert!(!config.force_eos);
    }

    #[test]
    fn test_rejects_out_of_range_threshold() {
        let config = ExperimentConfig {
            obverter_threshold_to_stop_message_generation: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_positive_lr() {
        let config = ExperimentConfig {
            lr: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ExperimentConfig {
            lr: -0.001,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_sizes() {
        let config = ExperimentConfig {
            vocab_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ExperimentConfig {
            batch_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_mini_batch_larger_than_batch() {
        let config = ExperimentConfig {
            batch_size: 32,
            mini_batch_size: 64,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_file_round_trip() {
        let config = ExperimentConfig {
            seed: 42,
            use_cuda: true,
            agent_loss_type: AgentLossType::Hinge,
            ..Default::default()
        };
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: ExperimentConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_config_file_fills_defaults() {
        let parsed: ExperimentConfig =
            serde_json::from_str(r#"{"seed": 7, "use_cuda": true}"#).unwrap();
        assert_eq!(parsed.seed, 7);
        assert!(parsed.use_cuda);
        assert_eq!(parsed.vocab_size, 5);
        assert_eq!(parsed.lr, 0.001);
    }
}
