//! # Obverter Launch Core
//!
//! Core library for Obverter Launch - a debugging launcher for obverter
//! referential-game training runs.
//!
//! This library holds the experiment configuration record, its rendering into
//! the trainer's argument vector, the process launcher with its post-mortem
//! debugging harness, and launch record persistence.

// Core modules
pub mod args;
pub mod config;
pub mod error;
pub mod launcher;
pub mod record;

// Re-export commonly used types
pub use config::{AgentLossType, ExperimentConfig};
pub use launcher::{DebugHarness, LaunchOutcome, Launcher};
pub use record::{LaunchRecord, LaunchRecorder};

/// Current version of the obverter-launch-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing for the library
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

/// Initialize tracing with a specific debug mode
pub fn init_tracing_with_debug(debug: bool) {
    let filter = if debug { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
