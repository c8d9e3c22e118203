//! Validate configuration command.

use anyhow::{Context, Result};
use orderbot_config::AppConfig;
use std::path::Path;

/// Print the effective configuration as TOML.
pub fn run(config_path: &Path, config: &AppConfig) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);
    println!("Configuration is valid!");
    println!();
    print!("{}", render(config)?);
    Ok(())
}

fn render(config: &AppConfig) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to render configuration")
}
