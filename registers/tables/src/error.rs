// Licensed under the Apache-2.0 license

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading the register index and field breakdown tables.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("failed to open workbook {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("failed to read sheet `{sheet}`: {source}")]
    Read {
        sheet: String,
        #[source]
        source: calamine::Error,
    },

    #[error("sheet `{sheet}` not found (available: {})", available.join(", "))]
    MissingSheet {
        sheet: String,
        available: Vec<String>,
    },

    #[error("sheet `{sheet}` has no header row")]
    MissingHeader { sheet: String },

    #[error("sheet `{sheet}` has no `{column}` column")]
    MissingColumn { sheet: String, column: String },

    #[error("sheet `{sheet}`, row {row}: `{value}` is not a valid {column}")]
    MalformedCell {
        sheet: String,
        row: usize,
        column: String,
        value: String,
    },
}

/// Result type for table loading.
pub type Result<T> = std::result::Result<T, TableError>;
