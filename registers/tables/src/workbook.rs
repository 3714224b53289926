// Licensed under the Apache-2.0 license

//! Spreadsheet loading (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`).

use crate::error::{Result, TableError};
use crate::rows::{register_map_from_rows, Row, TableLayout};
use calamine::{open_workbook_auto, Data, Reader, Sheets};
use regmap_generator::RegisterMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Loads the register index and field breakdown sheets of a workbook.
pub fn load_register_map(path: &Path, layout: &TableLayout) -> Result<RegisterMap> {
    log::debug!("opening workbook {}", path.display());
    let mut workbook = open_workbook_auto(path).map_err(|source| TableError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let index = read_sheet(&mut workbook, &layout.index_sheet)?;
    let fields = read_sheet(&mut workbook, &layout.fields_sheet)?;
    register_map_from_rows(&index, &fields, layout)
}

/// Reads a whole sheet as rows of cell text.
///
/// Rows above the first used cell are returned as empty rows, so row
/// positions match the sheet.
fn read_sheet(workbook: &mut Sheets<BufReader<File>>, sheet: &str) -> Result<Vec<Row>> {
    let available = workbook.sheet_names();
    if !available.iter().any(|name| name == sheet) {
        return Err(TableError::MissingSheet {
            sheet: sheet.to_string(),
            available,
        });
    }
    let range = workbook
        .worksheet_range(sheet)
        .map_err(|source| TableError::Read {
            sheet: sheet.to_string(),
            source,
        })?;

    let leading = range.start().map_or(0, |(row, _)| row as usize);
    let mut rows: Vec<Row> = vec![Vec::new(); leading];
    rows.extend(
        range
            .rows()
            .map(|cells| cells.iter().map(cell_text).collect::<Row>()),
    );
    log::debug!("{sheet}: {} rows", rows.len());
    Ok(rows)
}

/// Text of one cell. Whole numbers lose their fractional part so that widths
/// and bit indices typed as numbers read back as integers.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string().trim().to_string(),
    }
}
