//! Print the resolved experiment configuration

use anyhow::Result;

use crate::config::CliConfigLoader;

/// Print the resolved configuration as pretty JSON
pub async fn config_command(config_loader: CliConfigLoader) -> Result<()> {
    let config = config_loader.load().await?;

    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}
