//! Experiment configuration for the obverter trainer
//!
//! The configuration record is built once at launch, optionally from a config
//! file with flag overrides, and is consumed exactly once by the external
//! training process.

mod experiment;
mod types;

pub use experiment::ExperimentConfig;
pub use types::AgentLossType;
