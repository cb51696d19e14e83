//! Rendering of the configuration record into the trainer's argument vector

use crate::config::ExperimentConfig;

impl ExperimentConfig {
    /// Render the trainer's argument vector.
    ///
    /// Flags appear in field-declaration order. Value flags contribute two
    /// entries (`--flag`, `value`); boolean flags contribute a single bare
    /// `--flag` entry when on and nothing when off, leaving the trainer's own
    /// default in effect.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = ArgBuilder::new();

        args.value("--parent_folder", &self.parent_folder);
        args.switch("--use_cuda", self.use_cuda);
        args.value("--seed", self.seed);
        args.value(
            "--obverter_nbr_games_per_round",
            self.obverter_nbr_games_per_round,
        );
        args.value(
            "--obverter_threshold_to_stop_message_generation",
            self.obverter_threshold_to_stop_message_generation,
        );
        args.value("--emb_dropout_prob", self.emb_dropout_prob);
        args.value("--dropout_prob", self.dropout_prob);
        args.switch(
            "--use_sentences_one_hot_vectors",
            self.use_sentences_one_hot_vectors,
        );
        args.value("--batch_size", self.batch_size);
        args.value("--mini_batch_size", self.mini_batch_size);
        args.value("--resizeDim", self.resize_dim);
        args.value("--arch", &self.arch);
        args.switch("--descriptive", self.descriptive);
        args.value("--descriptive_ratio", self.descriptive_ratio);
        args.value("--max_sentence_length", self.max_sentence_length);
        args.value("--vocab_size", self.vocab_size);
        args.value("--epoch", self.epoch);
        args.value(
            "--symbol_processing_nbr_hidden_units",
            self.symbol_processing_nbr_hidden_units,
        );
        args.value("--symbol_embedding_size", self.symbol_embedding_size);
        args.switch("--object_centric", self.object_centric);
        args.value("--nbr_train_distractors", self.nbr_train_distractors);
        args.value("--nbr_test_distractors", self.nbr_test_distractors);
        args.switch(
            "--obverter_use_decision_head",
            self.obverter_use_decision_head,
        );
        args.value("--agent_loss_type", self.agent_loss_type);
        args.switch("--metric_fast", self.metric_fast);
        args.value("--metric_epoch_period", self.metric_epoch_period);
        args.value(
            "--nb_3dshapespybullet_shapes",
            self.nb_3dshapespybullet_shapes,
        );
        args.value(
            "--nb_3dshapespybullet_colors",
            self.nb_3dshapespybullet_colors,
        );
        args.value(
            "--nb_3dshapespybullet_samples",
            self.nb_3dshapespybullet_samples,
        );
        args.value(
            "--nb_3dshapespybullet_train_colors",
            self.nb_3dshapespybullet_train_colors,
        );
        args.value("--lr", self.lr);
        args.switch("--egocentric", self.egocentric);
        args.switch("--force_eos", self.force_eos);

        args.finish()
    }
}

/// Accumulates argv entries with the two flag shapes the trainer understands
struct ArgBuilder {
    args: Vec<String>,
}

impl ArgBuilder {
    fn new() -> Self {
        Self { args: Vec::new() }
    }

    /// `--flag value` pair. Display of f64 yields the shortest round-trip
    /// form, so configured literals like 0.001 are preserved verbatim.
    fn value(&mut self, flag: &str, value: impl ToString) {
        self.args.push(flag.to_string());
        self.args.push(value.to_string());
    }

    /// Bare `--flag`, emitted only when on
    fn switch(&mut self, flag: &str, on: bool) {
        if on {
            self.args.push(flag.to_string());
        }
    }

    fn finish(self) -> Vec<String> {
        self.args
    }
}
