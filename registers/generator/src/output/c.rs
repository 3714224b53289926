// Licensed under the Apache-2.0 license

//! C header: typedef'd bitfield structs, a `static inline` assign function per
//! register and an `enum register_address`.

use super::{AddressEntry, HeaderContext, HeaderLanguage, RegisterView};
use crate::types::RegisterMetadata;
use crate::util::macro_case;
use std::fmt::{self, Write};

pub struct CHeader;

fn guard(ctx: &HeaderContext) -> String {
    format!("{}_H", macro_case(&ctx.header_name))
}

impl HeaderLanguage for CHeader {
    fn prologue(&self, ctx: &HeaderContext, out: &mut String) -> fmt::Result {
        let guard = guard(ctx);
        writeln!(out, "#ifndef {guard}")?;
        writeln!(out, "#define {guard}")?;
        writeln!(out)?;
        writeln!(out, "#include <stdint.h>")?;
        writeln!(out)?;
        writeln!(out, "/* Auto-generated register definitions */")?;
        writeln!(out)
    }

    fn aggregate(&self, view: &RegisterView, out: &mut String) -> fmt::Result {
        let reg = view.register;
        let ty = view.uint.c_name();
        let align = view.align;

        writeln!(out, "/* {} ({}): {}", reg.name, reg.address, reg.description)?;
        writeln!(
            out,
            " * Type: {}, Width: {} bits, Reset: {} */",
            reg.access_type, reg.width_bits, reg.reset_value
        )?;
        writeln!(out, "typedef struct {{")?;
        for f in &view.fields {
            write!(out, "    {ty} {:<align$} : {};", f.ident, f.field.bits())?;
            if !f.field.description.is_empty() {
                write!(out, " /* {} */", f.field.description)?;
            }
            writeln!(out)?;
        }
        writeln!(out, "}} {};", reg.name)?;
        writeln!(out)?;
        self.decode(view, out)?;
        writeln!(out)
    }

    fn decode(&self, view: &RegisterView, out: &mut String) -> fmt::Result {
        let name = &view.register.name;
        let ty = view.uint.c_name();
        let align = view.align;
        writeln!(
            out,
            "static inline void {name}_assign({name} *r, {ty} n) {{"
        )?;
        for f in &view.fields {
            writeln!(out, "    r->{:<align$} = {};", f.ident, f.extraction())?;
        }
        writeln!(out, "}}")
    }

    fn placeholder(&self, register: &RegisterMetadata, out: &mut String) -> fmt::Result {
        writeln!(out, "/* Missing sheet for {} */", register.name)?;
        writeln!(out)
    }

    fn address_table(&self, entries: &[AddressEntry], out: &mut String) -> fmt::Result {
        let idents: Vec<String> = entries.iter().map(|e| format!("{}_ADDR", e.name)).collect();
        let align = crate::util::max_len(&idents);

        writeln!(out, "/* Register map enum */")?;
        writeln!(out, "enum register_address {{")?;
        for (ident, e) in idents.iter().zip(entries) {
            write!(out, "    {ident:<align$} = 0x{},", e.address.digits())?;
            if !e.description.is_empty() {
                write!(out, " /* {} */", e.description)?;
            }
            writeln!(out)?;
        }
        writeln!(out, "}};")
    }

    fn epilogue(&self, ctx: &HeaderContext, out: &mut String) -> fmt::Result {
        writeln!(out)?;
        writeln!(out, "#endif /* {} */", guard(ctx))
    }
}
