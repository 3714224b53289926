// Licensed under the Apache-2.0 license

use anyhow::Result;
use clap::Parser;
use regmap_cli::{Cli, FileConfig, Settings};
use simple_logger::SimpleLogger;

fn main() -> Result<()> {
    let cli = Cli::parse();
    SimpleLogger::new().with_level(cli.log_level()).init()?;

    let file = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(&cli, &file)?;
    regmap_cli::run(&settings)
}
