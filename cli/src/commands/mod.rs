//! CLI command implementations

mod args;
mod config;
mod launch;

pub use args::args_command;
pub use config::config_command;
pub use launch::{launch_command, LaunchOptions};
