// Licensed under the Apache-2.0 license

//! In-memory register map assembled from the two input tables.
//!
//! ```text
//! RegisterMap
//! ├── registers: Vec<RegisterMetadata>   # one per register index row, in row order
//! └── fields:    Vec<FieldRow>           # field breakdown rows, in row order,
//!                                        # joined to registers by name
//! ```
//!
//! Everything here is built fresh for one generation run and dropped once the
//! header text has been produced.

use crate::error::{Error, Result};

/// One row of the register index table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterMetadata {
    /// Register name, also the join key into the field breakdown.
    pub name: String,
    /// Address exactly as written in the table (hexadecimal, prefix optional).
    pub address: String,
    /// Register width in bits.
    pub width_bits: u32,
    /// Reset value, passed through verbatim.
    pub reset_value: String,
    /// Access type (RW, RO, ...), passed through verbatim.
    pub access_type: String,
    /// Free-text description.
    pub description: String,
}

/// One row of the field breakdown table, before its locator is parsed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldRow {
    /// Name of the register this field belongs to.
    pub register: String,
    /// Field mnemonic.
    pub name: String,
    /// Bit locator text: a single index `n` or an inclusive range `hi:lo`.
    pub bit: String,
    /// Free-text description, may be empty.
    pub description: String,
}

/// All registers and field rows of one register map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterMap {
    pub registers: Vec<RegisterMetadata>,
    pub fields: Vec<FieldRow>,
}

impl RegisterMap {
    pub fn new(registers: Vec<RegisterMetadata>, fields: Vec<FieldRow>) -> Self {
        Self { registers, fields }
    }

    /// Field rows belonging to `register`, in table order.
    pub fn fields_for<'a>(&'a self, register: &'a str) -> impl Iterator<Item = &'a FieldRow> + 'a {
        self.fields.iter().filter(move |f| f.register == register)
    }

    /// Field rows whose register does not appear in the register index.
    pub fn orphan_fields(&self) -> impl Iterator<Item = &FieldRow> {
        self.fields
            .iter()
            .filter(|f| !self.registers.iter().any(|r| r.name == f.register))
    }
}

/// A register address parsed from its table text.
///
/// The table convention is a hexadecimal digit string. A `0x`/`0h` prefix or
/// an `h` suffix is tolerated and stripped; the remaining digits are kept as
/// written so the emitted literal matches the spreadsheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Address {
    digits: String,
    value: u64,
}

impl Address {
    pub fn parse(register: &str, text: &str) -> Result<Self> {
        let malformed = || Error::MalformedAddress {
            register: register.to_string(),
            address: text.to_string(),
        };
        let trimmed = text.trim();
        let lower = trimmed.to_ascii_lowercase();
        let digits = if lower.starts_with("0x") || lower.starts_with("0h") {
            &trimmed[2..]
        } else if lower.len() > 1 && lower.ends_with('h') {
            &trimmed[..trimmed.len() - 1]
        } else {
            trimmed
        };
        let digits = digits.replace('_', "");
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(malformed());
        }
        let value = u64::from_str_radix(&digits, 16).map_err(|_| malformed())?;
        Ok(Self { digits, value })
    }

    /// Hex digits without any prefix, as written in the table.
    pub fn digits(&self) -> &str {
        &self.digits
    }

    pub fn value(&self) -> u64 {
        self.value
    }
}
