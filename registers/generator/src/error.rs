// Licensed under the Apache-2.0 license

use thiserror::Error;

/// Errors that abort a header generation run.
///
/// Every variant is fatal: the pipeline stops at the first one and no output
/// is written. A register without any field rows is not an error; it takes
/// the placeholder path instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A required configuration key (input or output location) was not given.
    #[error("missing configuration: `{key}` must be set")]
    MissingConfiguration { key: &'static str },

    /// No generation strategy is registered for the requested language.
    #[error("unsupported output language `{0}` (expected one of: cpp, c, rust)")]
    UnsupportedLanguage(String),

    /// A field row's bit locator is not a valid `n` or `hi:lo` within the register.
    #[error("register {register}: malformed bit locator `{locator}`: {reason}")]
    MalformedBitLocator {
        register: String,
        locator: String,
        reason: String,
    },

    /// Two explicit fields claim the same bit.
    #[error("register {register}: field {field} overlaps field {other}")]
    OverlappingFields {
        register: String,
        field: String,
        other: String,
    },

    /// Register width is zero or wider than the widest supported integer.
    #[error("register {register}: unsupported width of {width} bits (expected 1..=64)")]
    InvalidWidth { register: String, width: u32 },

    /// The address cell is not a hexadecimal literal.
    #[error("register {register}: malformed address `{address}`")]
    MalformedAddress { register: String, address: String },

    /// The register index names the same register twice.
    #[error("register {0} appears more than once in the register index")]
    DuplicateRegister(String),

    #[error("failed to format generated output")]
    Format(#[from] std::fmt::Error),
}

/// Result type for generator operations.
pub type Result<T> = std::result::Result<T, Error>;
