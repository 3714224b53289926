// Licensed under the Apache-2.0 license

//! C++ header: bitfield structs with an `operator=` decoder and an
//! `enum class Register` address map.

use super::{AddressEntry, HeaderContext, HeaderLanguage, RegisterView, UintType};
use crate::types::RegisterMetadata;
use crate::util::max_len;
use std::fmt::{self, Write};

pub struct CppHeader;

impl HeaderLanguage for CppHeader {
    fn reserved_type_idents(&self) -> &'static [&'static str] {
        &["Register"]
    }

    fn prologue(&self, _ctx: &HeaderContext, out: &mut String) -> fmt::Result {
        writeln!(out, "#pragma once")?;
        writeln!(out, "#include <stdint.h>")?;
        writeln!(out)?;
        writeln!(out, "// Auto-generated register definitions")?;
        writeln!(out)
    }

    fn aggregate(&self, view: &RegisterView, out: &mut String) -> fmt::Result {
        let reg = view.register;
        let ty = view.uint.c_name();
        let align = view.align;

        writeln!(out, "// {} ({}): {}", reg.name, reg.address, reg.description)?;
        writeln!(
            out,
            "// Type: {}, Width: {} bits, Reset: {}",
            reg.access_type, reg.width_bits, reg.reset_value
        )?;
        writeln!(out, "struct {} {{", view.type_ident)?;
        for f in &view.fields {
            write!(out, "    {ty} {:<align$} : {};", f.ident, f.field.bits())?;
            if !f.field.description.is_empty() {
                write!(out, "     // {}", f.field.description)?;
            }
            writeln!(out)?;
        }
        writeln!(out)?;
        writeln!(out, "    {}& operator=({ty} n) {{", view.type_ident)?;
        self.decode(view, out)?;
        writeln!(out, "        return *this;")?;
        writeln!(out, "    }};")?;
        writeln!(out, "}};")?;
        writeln!(out)
    }

    fn decode(&self, view: &RegisterView, out: &mut String) -> fmt::Result {
        let align = view.align;
        for f in &view.fields {
            writeln!(out, "        {:<align$} = {};", f.ident, f.extraction())?;
        }
        Ok(())
    }

    fn placeholder(&self, register: &RegisterMetadata, out: &mut String) -> fmt::Result {
        writeln!(out, "// Missing sheet for {}", register.name)?;
        writeln!(out)
    }

    fn address_table(&self, entries: &[AddressEntry], out: &mut String) -> fmt::Result {
        let ty = entries
            .iter()
            .map(|e| UintType::for_value(e.address.value()))
            .max()
            .unwrap_or(UintType::U32)
            .max(UintType::U32);
        let align = max_len(entries.iter().map(|e| &e.name));

        writeln!(out, "// Register map enum")?;
        writeln!(out, "enum class Register : {} {{", ty.c_name())?;
        for e in entries {
            write!(out, "    {:<align$} = 0x{},", e.name, e.address.digits())?;
            if !e.description.is_empty() {
                write!(out, " // {}", e.description)?;
            }
            writeln!(out)?;
        }
        writeln!(out, "}};")
    }
}
