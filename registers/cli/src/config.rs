// Licensed under the Apache-2.0 license

//! Command line and configuration file handling.
//!
//! Settings come from an optional TOML file and from command line flags; a
//! flag always wins over the file. Paths in the file are relative to the
//! file's own directory.
//!
//! ```toml
//! input = "docs/Register Map.ods"
//! output = "include/registers.h"
//! language = "cpp"
//! index_sheet = "Register Map"
//! fields_sheet = "Register Specific"
//! skip_rows = 1
//! ```

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use log::LevelFilter;
use regmap_generator::{Error, TargetLanguage};
use regmap_tables::TableLayout;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug, Default)]
#[command(
    name = "regmap-header",
    author,
    version,
    about = "Generate a register header from a register map spreadsheet"
)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Spreadsheet holding the register index and field breakdown sheets
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Header file to generate
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output language: cpp (default), c or rust
    #[arg(short, long, value_name = "LANG")]
    pub language: Option<String>,

    /// Name of the register index sheet
    #[arg(long, value_name = "NAME")]
    pub index_sheet: Option<String>,

    /// Name of the field breakdown sheet
    #[arg(long, value_name = "NAME")]
    pub fields_sheet: Option<String>,

    /// Rows above the header row in both sheets
    #[arg(long, value_name = "N")]
    pub skip_rows: Option<usize>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        match (self.quiet, self.verbose) {
            (true, _) => LevelFilter::Warn,
            (false, 0) => LevelFilter::Info,
            (false, 1) => LevelFilter::Debug,
            (false, _) => LevelFilter::Trace,
        }
    }
}

/// Contents of a TOML configuration file.
#[derive(Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub language: Option<String>,
    pub index_sheet: Option<String>,
    pub fields_sheet: Option<String>,
    pub skip_rows: Option<usize>,
    /// Directory relative paths are resolved against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl FileConfig {
    /// Parses configuration text; relative paths resolve against `base_dir`.
    pub fn from_toml(text: &str, base_dir: &Path) -> Result<Self> {
        let mut config: FileConfig = toml::from_str(text).context("invalid configuration")?;
        config.base_dir = base_dir.to_path_buf();
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let base_dir = path.parent().unwrap_or(Path::new("")).to_path_buf();
        Self::from_toml(&text, &base_dir)
            .with_context(|| format!("failed to load config {}", path.display()))
    }

    fn path(&self, value: &Option<PathBuf>) -> Option<PathBuf> {
        value.as_ref().map(|p| self.base_dir.join(p))
    }
}

/// Fully resolved settings for one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub input: PathBuf,
    pub output: PathBuf,
    pub language: TargetLanguage,
    pub tables: TableLayout,
}

impl Settings {
    /// Merges command line flags over the configuration file.
    ///
    /// Fails before any I/O when input or output is missing or the language
    /// is unknown.
    pub fn resolve(cli: &Cli, file: &FileConfig) -> Result<Self, Error> {
        let input = cli
            .input
            .clone()
            .or_else(|| file.path(&file.input))
            .ok_or(Error::MissingConfiguration { key: "input" })?;
        let output = cli
            .output
            .clone()
            .or_else(|| file.path(&file.output))
            .ok_or(Error::MissingConfiguration { key: "output" })?;
        let language = match cli.language.as_ref().or(file.language.as_ref()) {
            Some(name) => name.parse()?,
            None => TargetLanguage::default(),
        };

        let defaults = TableLayout::default();
        let tables = TableLayout {
            index_sheet: cli
                .index_sheet
                .clone()
                .or_else(|| file.index_sheet.clone())
                .unwrap_or(defaults.index_sheet),
            fields_sheet: cli
                .fields_sheet
                .clone()
                .or_else(|| file.fields_sheet.clone())
                .unwrap_or(defaults.fields_sheet),
            skip_rows: cli
                .skip_rows
                .or(file.skip_rows)
                .unwrap_or(defaults.skip_rows),
        };

        Ok(Self {
            input,
            output,
            language,
            tables,
        })
    }

    /// Base name of the output file, used for include guards.
    pub fn header_name(&self) -> &str {
        self.output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("registers")
    }
}
