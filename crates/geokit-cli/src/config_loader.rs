//! Configuration loading utilities for CLI commands

use anyhow::{Context, Result};
use geokit_core::config::{CliConfigOverrides, LayeredConfig};
use std::path::{Path, PathBuf};

/// Name of the config file picked up from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "geokit.toml";

/// Load layered configuration: defaults, then file, then environment, then CLI
pub fn load_config(path: Option<&Path>, overrides: CliConfigOverrides) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();

    match path {
        Some(path) => {
            config = config
                .load_from_file(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
        }
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if default_path.is_file() {
                config = config
                    .load_from_file(&default_path)
                    .context("Failed to load geokit.toml")?;
            }
        }
    }

    let mut config = config.load_from_env();
    config.update_from_cli(overrides);
    Ok(config)
}
