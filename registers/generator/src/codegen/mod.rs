// Licensed under the Apache-2.0 license

//! Header generation pipeline.
//!
//! Walks the register index in row order. Registers with field rows get a
//! layout and an aggregate; registers without get a placeholder. Every
//! register contributes an address table entry. The whole header is built in
//! memory, so any error leaves nothing half-written.

#[cfg(test)]
mod tests;

use crate::error::{Error, Result};
use crate::layout::build_layout;
use crate::output::{AddressEntry, HeaderContext, RegisterView, TargetLanguage};
use crate::types::{Address, FieldRow, RegisterMap};
use crate::util::unique_names;
use std::collections::HashSet;

/// Options for one generation run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    pub language: TargetLanguage,
    pub context: HeaderContext,
}

impl GenerateOptions {
    pub fn new(language: TargetLanguage) -> Self {
        Self {
            language,
            ..Default::default()
        }
    }

    /// Sets the base name used for include guards.
    pub fn header_name(mut self, name: &str) -> Self {
        self.context.header_name = name.to_string();
        self
    }
}

/// Generates the complete header text for `map`.
///
/// Fails on the first malformed register; nothing is returned in that case.
pub fn generate_header(map: &RegisterMap, options: &GenerateOptions) -> Result<String> {
    let lang = options.language.strategy();
    let mut output = String::new();
    let mut entries = Vec::with_capacity(map.registers.len());
    let mut seen = HashSet::new();

    for orphan in map.orphan_fields() {
        log::warn!(
            "field {} references register {} which is not in the register index",
            orphan.name,
            orphan.register
        );
    }

    // Distinct names can still map to one identifier, e.g. `LED-PWM` and
    // `LED_PWM` in Rust.
    let type_idents = unique_names(
        map.registers.iter().map(|r| lang.type_ident(&r.name)),
        lang.reserved_type_idents(),
    );

    lang.prologue(&options.context, &mut output)?;

    for (reg, type_ident) in map.registers.iter().zip(type_idents) {
        if !seen.insert(reg.name.as_str()) {
            return Err(Error::DuplicateRegister(reg.name.clone()));
        }

        let rows: Vec<&FieldRow> = map.fields_for(&reg.name).collect();
        if rows.is_empty() {
            log::warn!("{} has no field definitions", reg.name);
            lang.placeholder(reg, &mut output)?;
        } else {
            let layout = build_layout(&reg.name, reg.width_bits, &rows)?;
            let view = RegisterView::new(lang, reg, &layout).with_type_ident(type_ident);
            lang.aggregate(&view, &mut output)?;
        }

        entries.push(AddressEntry {
            name: reg.name.clone(),
            address: Address::parse(&reg.name, &reg.address)?,
            description: reg.description.clone(),
        });
    }

    lang.address_table(&entries, &mut output)?;
    lang.epilogue(&options.context, &mut output)?;

    log::debug!(
        "generated {} header for {} registers",
        options.language,
        entries.len()
    );
    Ok(output)
}
