//! Hyperparameter override flags
//!
//! One optional flag per configuration field, spelled exactly the way the
//! trainer spells it so an invocation reads the same whether the flag is
//! aimed at `obvl` or pasted from an old shell script. Boolean trainer flags
//! are plain switches: giving one turns the field on, omitting it leaves the
//! configured value alone.

use clap::Args;
use obverter_launch_core::{AgentLossType, ExperimentConfig};

/// Trainer hyperparameter overrides
#[derive(Args, Debug, Clone, Default)]
#[command(rename_all = "snake_case")]
pub struct TrainArgs {
    /// Base output/log directory
    #[arg(long)]
    pub parent_folder: Option<String>,

    /// Run the trainer on GPU
    #[arg(long)]
    pub use_cuda: bool,

    /// RNG seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Games per obverter round
    #[arg(long)]
    pub obverter_nbr_games_per_round: Option<u32>,

    /// Stop threshold for message generation (0-1)
    #[arg(long)]
    pub obverter_threshold_to_stop_message_generation: Option<f64>,

    /// Symbol embedding dropout rate
    #[arg(long)]
    pub emb_dropout_prob: Option<f64>,

    /// Dropout rate
    #[arg(long)]
    pub dropout_prob: Option<f64>,

    /// Encode messages as one-hot vectors
    #[arg(long)]
    pub use_sentences_one_hot_vectors: bool,

    /// Batch size
    #[arg(long)]
    pub batch_size: Option<u32>,

    /// Mini-batch size
    #[arg(long)]
    pub mini_batch_size: Option<u32>,

    /// Image resize dimension
    #[arg(long = "resizeDim")]
    pub resize_dim: Option<u32>,

    /// Vision backbone architecture name
    #[arg(long)]
    pub arch: Option<String>,

    /// Enable the descriptive game variant
    #[arg(long)]
    pub descriptive: bool,

    /// Descriptive target-present ratio (0-1)
    #[arg(long)]
    pub descriptive_ratio: Option<f64>,

    /// Maximum message length
    #[arg(long)]
    pub max_sentence_length: Option<u32>,

    /// Vocabulary size
    #[arg(long)]
    pub vocab_size: Option<u32>,

    /// Training epoch count
    #[arg(long)]
    pub epoch: Option<u32>,

    /// Hidden units in the symbol encoder
    #[arg(long)]
    pub symbol_processing_nbr_hidden_units: Option<u32>,

    /// Symbol embedding size
    #[arg(long)]
    pub symbol_embedding_size: Option<u32>,

    /// Object-centric rendering
    #[arg(long)]
    pub object_centric: bool,

    /// Training distractor count
    #[arg(long)]
    pub nbr_train_distractors: Option<u32>,

    /// Test distractor count
    #[arg(long)]
    pub nbr_test_distractors: Option<u32>,

    /// Enable the decision-head variant
    #[arg(long)]
    pub obverter_use_decision_head: bool,

    /// Loss function (NLL or Hinge)
    #[arg(long)]
    pub agent_loss_type: Option<AgentLossType>,

    /// Fast approximate metric computation
    #[arg(long)]
    pub metric_fast: bool,

    /// Epochs between metric computations
    #[arg(long)]
    pub metric_epoch_period: Option<u32>,

    /// Distinct shapes in the generated dataset
    #[arg(long)]
    pub nb_3dshapespybullet_shapes: Option<u32>,

    /// Distinct colors in the generated dataset
    #[arg(long)]
    pub nb_3dshapespybullet_colors: Option<u32>,

    /// Samples per shape/color combination
    #[arg(long)]
    pub nb_3dshapespybullet_samples: Option<u32>,

    /// Colors reserved for the training split
    #[arg(long)]
    pub nb_3dshapespybullet_train_colors: Option<u32>,

    /// Learning rate
    #[arg(long)]
    pub lr: Option<f64>,

    /// Egocentric viewpoint augmentation
    #[arg(long)]
    pub egocentric: bool,

    /// Force an end-of-sentence symbol
    #[arg(long)]
    pub force_eos: bool,
}

impl TrainArgs {
    /// Apply the given overrides on top of a loaded configuration
    pub fn apply(&self, config: &mut ExperimentConfig) {
        if let Some(parent_folder) = &self.parent_folder {
            config.parent_folder = parent_folder.clone();
        }
        if self.use_cuda {
            config.use_cuda = true;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(games) = self.obverter_nbr_games_per_round {
            config.obverter_nbr_games_per_round = games;
        }
        if let Some(threshold) = self.obverter_threshold_to_stop_message_generation {
            config.obverter_threshold_to_stop_message_generation = threshold;
        }
        if let Some(prob) = self.emb_dropout_prob {
            config.emb_dropout_prob = prob;
        }
        if let Some(prob) = self.dropout_prob {
            config.dropout_prob = prob;
        }
        if self.use_sentences_one_hot_vectors {
            config.use_sentences_one_hot_vectors = true;
        }
        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }
        if let Some(mini_batch_size) = self.mini_batch_size {
            config.mini_batch_size = mini_batch_size;
        }
        if let Some(resize_dim) = self.resize_dim {
            config.resize_dim = resize_dim;
        }
        if let Some(arch) = &self.arch {
            config.arch = arch.clone();
        }
        if self.descriptive {
            config.descriptive = true;
        }
        if let Some(ratio) = self.descriptive_ratio {
            config.descriptive_ratio = ratio;
        }
        if let Some(len) = self.max_sentence_length {
            config.max_sentence_length = len;
        }
        if let Some(vocab_size) = self.vocab_size {
            config.vocab_size = vocab_size;
        }
        if let Some(epoch) = self.epoch {
            config.epoch = epoch;
        }
        if let Some(units) = self.symbol_processing_nbr_hidden_units {
            config.symbol_processing_nbr_hidden_units = units;
        }
        if let Some(size) = self.symbol_embedding_size {
            config.symbol_embedding_size = size;
        }
        if self.object_centric {
            config.object_centric = true;
        }
        if let Some(n) = self.nbr_train_distractors {
            config.nbr_train_distractors = n;
        }
        if let Some(n) = self.nbr_test_distractors {
            config.nbr_test_distractors = n;
        }
        if self.obverter_use_decision_head {
            config.obverter_use_decision_head = true;
        }
        if let Some(loss) = self.agent_loss_type {
            config.agent_loss_type = loss;
        }
        if self.metric_fast {
            config.metric_fast = true;
        }
        if let Some(period) = self.metric_epoch_period {
            config.metric_epoch_period = period;
        }
        if let Some(n) = self.nb_3dshapespybullet_shapes {
            config.nb_3dshapespybullet_shapes = n;
        }
        if let Some(n) = self.nb_3dshapespybullet_colors {
            config.nb_3dshapespybullet_colors = n;
        }
        if let Some(n) = self.nb_3dshapespybullet_samples {
            config.nb_3dshapespybullet_samples = n;
        }
        if let Some(n) = self.nb_3dshapespybullet_train_colors {
            config.nb_3dshapespybullet_train_colors = n;
        }
        if let Some(lr) = self.lr {
            config.lr = lr;
        }
        if self.egocentric {
            config.egocentric = true;
        }
        if self.force_eos {
            config.force_eos = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_overrides_change_nothing() {
        let mut config = ExperimentConfig::default();
        TrainArgs::default().apply(&mut config);
        assert_eq!(config, ExperimentConfig::default());
    }

    #[test]
    fn test_value_overrides_win() {
        let mut config = ExperimentConfig::default();
        let args = TrainArgs {
            seed: Some(7),
            lr: Some(0.0003),
            arch: Some("ResNet18".to_string()),
            ..Default::default()
        };
        args.apply(&mut config);

        assert_eq!(config.seed, 7);
        assert_eq!(config.lr, 0.0003);
        assert_eq!(config.arch, "ResNet18");
        // Untouched fields keep their values
        assert_eq!(config.vocab_size, 5);
    }

    #[test]
    fn test_switch_overrides_only_turn_on() {
        let mut config = ExperimentConfig {
            use_cuda: true,
            ..Default::default()
        };
        TrainArgs::default().apply(&mut config);
        assert!(config.use_cuda);

        let mut config = ExperimentConfig::default();
        let args = TrainArgs {
            use_cuda: true,
            egocentric: true,
            ..Default::default()
        };
        args.apply(&mut config);
        assert!(config.use_cuda);
        assert!(config.egocentric);
    }
}
