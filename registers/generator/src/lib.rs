// Licensed under the Apache-2.0 license

//! Register map to header generator.
//!
//! Converts a register map (a register index plus a per-bit field breakdown,
//! normally maintained as a spreadsheet) into a generated header with one
//! bitfield aggregate per register and an enumeration of register addresses.
//!
//! ## Usage
//!
//! ```
//! use regmap_generator::{
//!     generate_header, FieldRow, GenerateOptions, RegisterMap, RegisterMetadata, TargetLanguage,
//! };
//!
//! let map = RegisterMap::new(
//!     vec![RegisterMetadata {
//!         name: "CTRL".into(),
//!         address: "10".into(),
//!         width_bits: 8,
//!         reset_value: "0x00".into(),
//!         access_type: "RW".into(),
//!         description: "Control".into(),
//!     }],
//!     vec![FieldRow {
//!         register: "CTRL".into(),
//!         name: "EN".into(),
//!         bit: "7".into(),
//!         description: "Enable".into(),
//!     }],
//! );
//! let header = generate_header(&map, &GenerateOptions::new(TargetLanguage::Cpp)).unwrap();
//! assert!(header.contains("struct CTRL {"));
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: register map input data ([`RegisterMap`], [`RegisterMetadata`], [`FieldRow`])
//! - [`layout`]: the bitfield layout engine ([`build_layout`])
//! - [`output`]: per-language emitters behind [`output::HeaderLanguage`]
//! - [`util`]: name conversion and literal formatting

pub mod error;
pub mod layout;
pub mod output;
pub mod types;
pub mod util;

mod codegen;

pub use codegen::{generate_header, GenerateOptions};
pub use error::{Error, Result};
pub use layout::{build_layout, parse_bit_locator, FieldDescriptor, RegisterLayout};
pub use output::{HeaderContext, TargetLanguage, UintType};
pub use types::{Address, FieldRow, RegisterMap, RegisterMetadata};
