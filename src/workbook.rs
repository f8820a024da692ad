//! Reading uploaded workbooks into the [`Workbook`] model.
//!
//! Spreadsheet containers (`.xlsx`, `.xlsm`, `.xls`, `.xlsb`, `.ods`) go through
//! calamine, which sniffs the format from the bytes. A `.csv` file is read as a
//! one-sheet workbook named after the file stem, so `파이차트.csv` lands on the
//! pie strategy.

use crate::error::{DashError, Result};
use crate::models::{Cell, Table, Workbook, Worksheet};
use crate::time_axis::parse_date_text;
use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use csv::ReaderBuilder;
use log::{info, warn};
use std::io::Cursor;
use std::path::Path;

/// Load a workbook from a file on disk.
pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Workbook> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let file_name = path.file_name().and_then(|n| n.to_str());
    load_bytes(bytes, file_name)
}

/// Load a workbook from uploaded bytes. `file_name` is only used to recognise CSV
/// uploads and to name their single sheet.
pub fn load_bytes(bytes: Vec<u8>, file_name: Option<&str>) -> Result<Workbook> {
    let csv_stem = file_name.and_then(|name| {
        let p = Path::new(name);
        let is_csv = p
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
        if is_csv {
            p.file_stem().and_then(|s| s.to_str()).map(str::to_string)
        } else {
            None
        }
    });

    let workbook = match csv_stem {
        Some(stem) => load_csv(&bytes, stem)?,
        None => load_spreadsheet(bytes)?,
    };
    info!(
        "loaded workbook {} with {} sheet(s)",
        file_name.unwrap_or("<upload>"),
        workbook.sheets.len()
    );
    Ok(workbook)
}

fn load_spreadsheet(bytes: Vec<u8>) -> Result<Workbook> {
    let mut sheets = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let names = sheets.sheet_names();
    if names.is_empty() {
        return Err(DashError::EmptyWorkbook);
    }

    let mut out = Vec::with_capacity(names.len());
    for name in names {
        let content = match sheets.worksheet_range(&name) {
            Ok(range) => Ok(range_to_table(&range)),
            Err(e) => {
                warn!("sheet '{}' could not be read: {}", name, e);
                Err(e.to_string())
            }
        };
        out.push(Worksheet { name, content });
    }
    Ok(Workbook { sheets: out })
}

fn range_to_table(range: &Range<Data>) -> Table {
    let grid: Vec<Vec<Cell>> = range
        .rows()
        .map(|row| row.iter().map(convert_cell).collect())
        .collect();
    Table::from_grid(grid)
}

fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::String(s) => Cell::from(s.as_str()),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => {
            if dt.is_datetime() {
                dt.as_datetime()
                    .map(Cell::DateTime)
                    .unwrap_or(Cell::Number(dt.as_f64()))
            } else {
                Cell::Number(dt.as_f64())
            }
        }
        Data::DateTimeIso(s) => parse_date_text(s)
            .map(Cell::DateTime)
            .unwrap_or_else(|| Cell::from(s.as_str())),
        Data::DurationIso(s) => Cell::from(s.as_str()),
        Data::Error(e) => Cell::Text(e.to_string()),
    }
}

fn load_csv(bytes: &[u8], sheet_name: String) -> Result<Workbook> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut grid: Vec<Vec<Cell>> = Vec::new();
    for record in rdr.records() {
        let record = record?;
        grid.push(record.iter().map(csv_cell).collect());
    }
    Ok(Workbook {
        sheets: vec![Worksheet {
            name: sheet_name,
            content: Ok(Table::from_grid(grid)),
        }],
    })
}

fn csv_cell(field: &str) -> Cell {
    let t = field.trim();
    if t.is_empty() {
        Cell::Empty
    } else if let Ok(v) = t.parse::<f64>() {
        Cell::Number(v)
    } else {
        Cell::Text(t.to_string())
    }
}
