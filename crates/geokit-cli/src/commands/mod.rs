//! Command implementations

mod doctor;
mod raster;
mod rescale;
mod srs;
mod vector;

use crate::cli::{Cli, Commands};
use crate::config_loader::load_config;
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use geokit_core::config::CliConfigOverrides;
use std::path::Path;

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);

    let strict_rescale = match &cli.command {
        Commands::Rescale(args) if args.padded => Some(false),
        Commands::Rescale(args) if args.strict => Some(true),
        _ => None,
    };
    let overrides = CliConfigOverrides { srs: None, strict_rescale, proj_data: cli.proj_data };
    let config = load_config(cli.config.as_deref(), overrides)?;

    if cli.command.requires_srs() {
        if let Some(dir) = &config.proj_data.value {
            geokit_geo::srs::configure_proj_data(Path::new(dir))?;
        }
        let srs = geokit_geo::ensure_environment()
            .context("PROJ is not usable, run `geokit doctor` for details")?;
        tracing::debug!("SRS environment ready ({})", srs);
    }

    match cli.command {
        Commands::Rescale(args) => rescale::execute(args, &config, &output),
        Commands::Srs(args) => srs::execute(args, &output),
        Commands::Raster(args) => raster::execute(args, &config, &output),
        Commands::Vector(args) => vector::execute(args, &config, &output),
        Commands::Doctor(args) => doctor::execute(args, &config, &output),
    }
}
