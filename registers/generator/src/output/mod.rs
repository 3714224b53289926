// Licensed under the Apache-2.0 license

//! Header emission.
//!
//! Each supported output language implements [`HeaderLanguage`]. The set of
//! languages is closed ([`TargetLanguage`]) so selecting one is an exhaustive
//! match rather than a lookup that can miss.
//!
//! ## Generated header structure
//!
//! ```text
//! prologue                      include guard, fixed-width integer import
//! per register, in table order:
//!   aggregate + decode          when the register has field rows
//!   placeholder                 when it has none
//! address table                 one entry per register, in table order
//! epilogue                      closes the include guard, if any
//! ```

mod c;
mod cpp;
mod rust;

use crate::error::Error;
use crate::layout::{FieldDescriptor, RegisterLayout};
use crate::types::{Address, RegisterMetadata};
use crate::util::{max_len, unique_names};
use std::fmt;
use std::str::FromStr;

pub use c::CHeader;
pub use cpp::CppHeader;
pub use rust::RustModule;

/// Narrowest standard unsigned integer able to hold a register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum UintType {
    U8,
    U16,
    U32,
    U64,
}

impl UintType {
    /// Selects the integer type for a register of `width` bits.
    ///
    /// Total over all widths; anything above 32 bits maps to 64.
    pub fn for_width(width: u32) -> Self {
        match width {
            0..=8 => UintType::U8,
            9..=16 => UintType::U16,
            17..=32 => UintType::U32,
            _ => UintType::U64,
        }
    }

    /// Selects the integer type able to hold `value`.
    pub fn for_value(value: u64) -> Self {
        Self::for_width(u64::BITS - value.leading_zeros())
    }

    pub fn bits(self) -> u32 {
        match self {
            UintType::U8 => 8,
            UintType::U16 => 16,
            UintType::U32 => 32,
            UintType::U64 => 64,
        }
    }

    /// `<stdint.h>` spelling, e.g. `uint16_t`.
    pub fn c_name(self) -> String {
        format!("uint{}_t", self.bits())
    }

    /// Rust primitive spelling, e.g. `u16`.
    pub fn rust_name(self) -> String {
        format!("u{}", self.bits())
    }
}

/// One layout field prepared for emission.
#[derive(Clone, Debug)]
pub struct EmittedField<'a> {
    /// Language identifier, unique within the register.
    pub ident: String,
    pub field: &'a FieldDescriptor,
}

impl EmittedField<'_> {
    /// The shift-and-mask extraction of this field from the raw value `n`.
    pub fn extraction(&self) -> String {
        format!(
            "(n >> {}) & {}",
            self.field.lo,
            crate::util::mask_literal(self.field.mask())
        )
    }
}

/// A register and its layout, with identifiers resolved for one language.
#[derive(Clone, Debug)]
pub struct RegisterView<'a> {
    pub register: &'a RegisterMetadata,
    /// Language identifier of the register's aggregate type.
    pub type_ident: String,
    pub uint: UintType,
    /// Fields in layout order, most significant first.
    pub fields: Vec<EmittedField<'a>>,
    /// Width of the longest identifier, for column alignment.
    pub align: usize,
}

impl<'a> RegisterView<'a> {
    pub fn new(
        language: &dyn HeaderLanguage,
        register: &'a RegisterMetadata,
        layout: &'a RegisterLayout,
    ) -> Self {
        let idents = unique_names(
            layout
                .fields()
                .iter()
                .map(|f| language.field_ident(&f.name)),
            &[],
        );
        let align = max_len(&idents);
        let fields = idents
            .into_iter()
            .zip(layout.fields())
            .map(|(ident, field)| EmittedField { ident, field })
            .collect();
        Self {
            register,
            type_ident: language.type_ident(&register.name),
            uint: UintType::for_width(layout.width()),
            fields,
            align,
        }
    }

    /// Replaces the aggregate type identifier, e.g. with one made unique
    /// across the whole map.
    pub fn with_type_ident(mut self, ident: String) -> Self {
        self.type_ident = ident;
        self
    }
}

/// One entry of the register address table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressEntry {
    pub name: String,
    pub address: Address,
    pub description: String,
}

/// File-level settings shared by prologue and epilogue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderContext {
    /// Base name of the generated file, used for include guards.
    pub header_name: String,
}

impl Default for HeaderContext {
    fn default() -> Self {
        Self {
            header_name: "registers".to_string(),
        }
    }
}

/// Generation strategy for one output language.
pub trait HeaderLanguage {
    /// Identifier used for a layout field name.
    fn field_ident(&self, name: &str) -> String {
        name.to_string()
    }

    /// Identifier used for a register's aggregate type.
    fn type_ident(&self, name: &str) -> String {
        name.to_string()
    }

    /// Type names the header itself declares, which registers must not reuse.
    fn reserved_type_idents(&self) -> &'static [&'static str] {
        &[]
    }

    /// Include guard and integer type imports.
    fn prologue(&self, ctx: &HeaderContext, out: &mut String) -> fmt::Result;

    /// Header comment and aggregate declaration, with its decode procedure
    /// attached wherever the language puts it.
    fn aggregate(&self, view: &RegisterView, out: &mut String) -> fmt::Result;

    /// Raw-to-fields decode: one extraction per field, in layout order.
    fn decode(&self, view: &RegisterView, out: &mut String) -> fmt::Result;

    /// Marker for a register that has no field rows.
    fn placeholder(&self, register: &RegisterMetadata, out: &mut String) -> fmt::Result;

    /// The register address enumeration.
    fn address_table(&self, entries: &[AddressEntry], out: &mut String) -> fmt::Result;

    /// Closes anything the prologue opened.
    fn epilogue(&self, _ctx: &HeaderContext, _out: &mut String) -> fmt::Result {
        Ok(())
    }
}

/// Supported output languages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TargetLanguage {
    #[default]
    Cpp,
    C,
    Rust,
}

impl TargetLanguage {
    pub const ALL: [TargetLanguage; 3] =
        [TargetLanguage::Cpp, TargetLanguage::C, TargetLanguage::Rust];

    pub fn name(self) -> &'static str {
        match self {
            TargetLanguage::Cpp => "cpp",
            TargetLanguage::C => "c",
            TargetLanguage::Rust => "rust",
        }
    }

    pub fn strategy(self) -> &'static dyn HeaderLanguage {
        match self {
            TargetLanguage::Cpp => &CppHeader,
            TargetLanguage::C => &CHeader,
            TargetLanguage::Rust => &RustModule,
        }
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TargetLanguage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cpp" | "c++" | "cxx" => Ok(TargetLanguage::Cpp),
            "c" => Ok(TargetLanguage::C),
            "rust" | "rs" => Ok(TargetLanguage::Rust),
            _ => Err(Error::UnsupportedLanguage(s.to_string())),
        }
    }
}
