//! Print the forwarded trainer argument vector

use anyhow::Result;

use crate::config::CliConfigLoader;

/// Print the resolved trainer argv, one entry per line
pub async fn args_command(config_loader: CliConfigLoader) -> Result<()> {
    let config = config_loader.load().await?;

    for arg in config.to_args() {
        println!("{}", arg);
    }

    Ok(())
}
