//! CLI configuration loading and overrides

mod loader;
mod overrides;

pub use loader::CliConfigLoader;
pub use overrides::TrainArgs;
