// Licensed under the Apache-2.0 license

//! Loads a register map from a spreadsheet workbook.
//!
//! The workbook holds two sheets: a register index (`Register Name`,
//! `Address`, `Width (bits)`, `Reset Value`, `Type`, `Description`) and a
//! field breakdown (`Register`, `Mnemonic`, `Bit`, `Description`). Row order in
//! both sheets is preserved in the resulting [`RegisterMap`].
//!
//! [`RegisterMap`]: regmap_generator::RegisterMap

pub mod error;
pub mod rows;
mod workbook;

pub use error::{Result, TableError};
pub use rows::{
    register_map_from_rows, Row, TableLayout, FIELD_BREAKDOWN_SHEET, REGISTER_INDEX_SHEET,
};
pub use workbook::load_register_map;
