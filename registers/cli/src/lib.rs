// Licensed under the Apache-2.0 license

//! Command line front end for the register header generator.

pub mod config;
mod write;

pub use config::{Cli, FileConfig, Settings};
pub use write::write_atomic;

use anyhow::{Context, Result};
use regmap_generator::{generate_header, GenerateOptions};
use regmap_tables::load_register_map;

/// Loads the register map, generates the header and writes it.
///
/// The header is generated completely before the output file is touched.
pub fn run(settings: &Settings) -> Result<()> {
    log::info!("Reading register map: {}", settings.input.display());
    let map = load_register_map(&settings.input, &settings.tables)
        .with_context(|| format!("failed to load {}", settings.input.display()))?;

    let options = GenerateOptions::new(settings.language).header_name(settings.header_name());
    let header = generate_header(&map, &options)?;

    write_atomic(&settings.output, &header)?;
    log::info!("Generated: {}", settings.output.display());
    Ok(())
}
