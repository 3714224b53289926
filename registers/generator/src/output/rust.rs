// Licensed under the Apache-2.0 license

//! Rust module: one plain struct per register with a `From<uN>` decoder, and
//! a `#[repr]` enum of register addresses.
//!
//! Rust has no bitfield members, so each field is stored in the register's
//! integer type and its bit span is recorded in the field's doc comment.

use super::{AddressEntry, HeaderContext, HeaderLanguage, RegisterView, UintType};
use crate::types::RegisterMetadata;
use crate::util::{camel_case, max_len, snake_case, unique_names};
use std::fmt::{self, Write};

pub struct RustModule;

impl HeaderLanguage for RustModule {
    fn field_ident(&self, name: &str) -> String {
        snake_case(name)
    }

    fn type_ident(&self, name: &str) -> String {
        camel_case(name)
    }

    fn reserved_type_idents(&self) -> &'static [&'static str] {
        &["Register"]
    }

    fn prologue(&self, _ctx: &HeaderContext, out: &mut String) -> fmt::Result {
        writeln!(out, "// Auto-generated register definitions")?;
        writeln!(out)
    }

    fn aggregate(&self, view: &RegisterView, out: &mut String) -> fmt::Result {
        let reg = view.register;
        let ty = view.uint.rust_name();

        writeln!(out, "/// {} ({}): {}", reg.name, reg.address, reg.description)?;
        writeln!(out, "///")?;
        writeln!(
            out,
            "/// Type: {}, Width: {} bits, Reset: {}",
            reg.access_type, reg.width_bits, reg.reset_value
        )?;
        writeln!(out, "#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]")?;
        writeln!(out, "pub struct {} {{", view.type_ident)?;
        for f in &view.fields {
            let span = if f.field.bits() == 1 {
                format!("Bit {}", f.field.lo)
            } else {
                format!("Bits {}:{}", f.field.hi, f.field.lo)
            };
            if f.field.description.is_empty() {
                writeln!(out, "    /// {span}.")?;
            } else {
                writeln!(out, "    /// {span}: {}", f.field.description)?;
            }
            writeln!(out, "    pub {}: {ty},", f.ident)?;
        }
        writeln!(out, "}}")?;
        writeln!(out)?;
        self.decode(view, out)?;
        writeln!(out)
    }

    fn decode(&self, view: &RegisterView, out: &mut String) -> fmt::Result {
        let ty = view.uint.rust_name();
        let align = view.align + 1;
        writeln!(out, "impl From<{ty}> for {} {{", view.type_ident)?;
        writeln!(out, "    #[allow(clippy::identity_op)]")?;
        writeln!(out, "    fn from(n: {ty}) -> Self {{")?;
        writeln!(out, "        Self {{")?;
        for f in &view.fields {
            let label = format!("{}:", f.ident);
            writeln!(out, "            {label:<align$} {},", f.extraction())?;
        }
        writeln!(out, "        }}")?;
        writeln!(out, "    }}")?;
        writeln!(out, "}}")
    }

    fn placeholder(&self, register: &RegisterMetadata, out: &mut String) -> fmt::Result {
        writeln!(out, "// Missing sheet for {}", register.name)?;
        writeln!(out)
    }

    fn address_table(&self, entries: &[AddressEntry], out: &mut String) -> fmt::Result {
        let variants = unique_names(entries.iter().map(|e| camel_case(&e.name)), &[]);
        let align = max_len(&variants);
        let ty = entries
            .iter()
            .map(|e| UintType::for_value(e.address.value()))
            .max()
            .unwrap_or(UintType::U32)
            .max(UintType::U32);

        writeln!(out, "/// Register map enum")?;
        if !entries.is_empty() {
            writeln!(out, "#[repr({})]", ty.rust_name())?;
        }
        writeln!(out, "#[derive(Clone, Copy, Debug, PartialEq, Eq)]")?;
        writeln!(out, "pub enum Register {{")?;
        for (variant, e) in variants.iter().zip(entries) {
            write!(out, "    {variant:<align$} = 0x{},", e.address.digits())?;
            if !e.description.is_empty() {
                write!(out, " // {}", e.description)?;
            }
            writeln!(out)?;
        }
        writeln!(out, "}}")
    }
}
