// Licensed under the Apache-2.0 license

//! Conversion of raw sheet rows into register map records.
//!
//! Each sheet is a grid of trimmed cell strings. The first `skip_rows` rows
//! (usually a title) are ignored, the next row holds the column headers and
//! every following non-blank row is a record. Columns are found by header
//! name, so their order in the sheet does not matter.

use crate::error::{Result, TableError};
use regmap_generator::{FieldRow, RegisterMap, RegisterMetadata};

/// Default name of the register index sheet.
pub const REGISTER_INDEX_SHEET: &str = "Register Map";

/// Default name of the field breakdown sheet.
pub const FIELD_BREAKDOWN_SHEET: &str = "Register Specific";

/// One sheet row, one string per cell.
pub type Row = Vec<String>;

/// Where the two tables live inside a workbook.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableLayout {
    pub index_sheet: String,
    pub fields_sheet: String,
    /// Rows above the header row.
    pub skip_rows: usize,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            index_sheet: REGISTER_INDEX_SHEET.to_string(),
            fields_sheet: FIELD_BREAKDOWN_SHEET.to_string(),
            skip_rows: 1,
        }
    }
}

/// Column lookup for one sheet.
struct Columns<'a> {
    sheet: &'a str,
    names: Vec<String>,
    /// Spreadsheet row number (1-based) of the header row.
    header_row: usize,
}

fn normalize(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

impl<'a> Columns<'a> {
    fn new(sheet: &'a str, rows: &[Row], skip_rows: usize) -> Result<Self> {
        let header = rows
            .get(skip_rows)
            .filter(|r| r.iter().any(|c| !c.trim().is_empty()))
            .ok_or_else(|| TableError::MissingHeader {
                sheet: sheet.to_string(),
            })?;
        Ok(Self {
            sheet,
            names: header.iter().map(|c| normalize(c)).collect(),
            header_row: skip_rows + 1,
        })
    }

    fn optional(&self, column: &str) -> Option<usize> {
        let column = normalize(column);
        self.names.iter().position(|n| *n == column)
    }

    fn required(&self, column: &str) -> Result<usize> {
        self.optional(column)
            .ok_or_else(|| TableError::MissingColumn {
                sheet: self.sheet.to_string(),
                column: column.to_string(),
            })
    }

    /// Data rows with their spreadsheet row numbers, blank rows dropped.
    fn records<'r>(&self, rows: &'r [Row]) -> impl Iterator<Item = (usize, &'r Row)> + 'r {
        let first = self.header_row;
        rows.iter()
            .enumerate()
            .skip(first)
            .map(|(i, row)| (i + 1, row))
            .filter(|(_, row)| row.iter().any(|c| !c.trim().is_empty()))
    }
}

fn cell(row: &Row, column: Option<usize>) -> String {
    column
        .and_then(|c| row.get(c))
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Reads the register index table.
pub fn parse_register_index(
    sheet: &str,
    rows: &[Row],
    skip_rows: usize,
) -> Result<Vec<RegisterMetadata>> {
    let cols = Columns::new(sheet, rows, skip_rows)?;
    let name = cols.required("Register Name")?;
    let address = cols.required("Address")?;
    let width = cols.required("Width (bits)")?;
    let reset = cols.required("Reset Value")?;
    let access = cols.required("Type")?;
    let description = cols.optional("Description");

    let mut registers = Vec::new();
    for (row_number, row) in cols.records(rows) {
        let reg_name = cell(row, Some(name));
        if reg_name.is_empty() {
            log::warn!("{sheet}: row {row_number} has no register name, skipping");
            continue;
        }
        let width_text = cell(row, Some(width));
        let width_bits = width_text
            .parse::<u32>()
            .map_err(|_| TableError::MalformedCell {
                sheet: sheet.to_string(),
                row: row_number,
                column: "Width (bits)".to_string(),
                value: width_text.clone(),
            })?;
        registers.push(RegisterMetadata {
            name: reg_name,
            address: cell(row, Some(address)),
            width_bits,
            reset_value: cell(row, Some(reset)),
            access_type: cell(row, Some(access)),
            description: cell(row, description),
        });
    }
    Ok(registers)
}

/// Reads the field breakdown table.
pub fn parse_field_breakdown(sheet: &str, rows: &[Row], skip_rows: usize) -> Result<Vec<FieldRow>> {
    let cols = Columns::new(sheet, rows, skip_rows)?;
    let register = cols.required("Register")?;
    let mnemonic = cols.required("Mnemonic")?;
    let bit = cols.required("Bit")?;
    let description = cols.optional("Description");

    let mut fields = Vec::new();
    for (row_number, row) in cols.records(rows) {
        let field = FieldRow {
            register: cell(row, Some(register)),
            name: cell(row, Some(mnemonic)),
            bit: cell(row, Some(bit)),
            description: cell(row, description),
        };
        if field.register.is_empty() || field.name.is_empty() {
            log::warn!("{sheet}: row {row_number} has no register or mnemonic, skipping");
            continue;
        }
        fields.push(field);
    }
    Ok(fields)
}

/// Builds a register map from the raw rows of both sheets.
pub fn register_map_from_rows(
    index_rows: &[Row],
    field_rows: &[Row],
    layout: &TableLayout,
) -> Result<RegisterMap> {
    let registers = parse_register_index(&layout.index_sheet, index_rows, layout.skip_rows)?;
    let fields = parse_field_breakdown(&layout.fields_sheet, field_rows, layout.skip_rows)?;
    log::debug!(
        "loaded {} registers and {} field rows",
        registers.len(),
        fields.len()
    );
    Ok(RegisterMap::new(registers, fields))
}
