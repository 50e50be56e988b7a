//! Workbook reader - spreadsheet → cell text

use crate::error::{LangError, LangResult};
use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Read-only handle on a workbook (.xlsx, .xlsm, .xls, .ods)
pub struct WorkbookReader {
    path: PathBuf,
    sheets: Sheets<BufReader<File>>,
}

impl WorkbookReader {
    /// Open the workbook at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> LangResult<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(LangError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Workbook not found: {}", path.display()),
            )));
        }

        let sheets = open_workbook_auto(&path)?;
        Ok(Self { path, sheets })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sheet names in workbook order
    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }

    pub fn has_sheet(&self, name: &str) -> bool {
        self.sheet_names().iter().any(|s| s == name)
    }

    /// Load the cells of a named sheet
    pub fn sheet(&mut self, name: &str) -> LangResult<SheetData> {
        if !self.has_sheet(name) {
            return Err(LangError::SheetNotFound {
                sheet: name.to_string(),
                available: self.sheet_names(),
            });
        }

        let range = self.sheets.worksheet_range(name)?;
        Ok(SheetData::new(name, range))
    }
}

/// Cells of one sheet, addressed from the sheet's top-left corner (A1)
#[derive(Debug, Clone)]
pub struct SheetData {
    name: String,
    range: Range<Data>,
}

impl SheetData {
    pub fn new(name: impl Into<String>, range: Range<Data>) -> Self {
        Self {
            name: name.into(),
            range,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Row count including the header row; leading blank rows count too
    pub fn height(&self) -> u32 {
        self.range.end().map_or(0, |(row, _)| row + 1)
    }

    /// Column count; leading blank columns count too
    pub fn width(&self) -> u32 {
        self.range.end().map_or(0, |(_, col)| col + 1)
    }

    /// Text of a cell. Missing and empty cells read as `""`.
    pub fn cell_text(&self, row: u32, col: u32) -> LangResult<String> {
        match self.range.get_value((row, col)) {
            None => Ok(String::new()),
            Some(cell) => cell_to_string(cell).map_err(|reason| LangError::Cell {
                sheet: self.name.clone(),
                row,
                col,
                reason,
            }),
        }
    }
}

/// Render a cell the way it reads in the sheet.
///
/// Integral floats drop the fraction: spreadsheets store `1` as `1.0`.
pub fn cell_to_string(cell: &Data) -> Result<String, String> {
    match cell {
        Data::Empty => Ok(String::new()),
        Data::String(s) => Ok(s.clone()),
        Data::Int(i) => Ok(i.to_string()),
        Data::Float(f) => Ok(format_float(*f)),
        Data::Bool(b) => Ok(b.to_string()),
        Data::Error(e) => Err(format!("cell holds error value {}", e)),
        other => Ok(other.to_string()),
    }
}

fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        (f as i64).to_string()
    } else {
        f.to_string()
    }
}
