//! # Spreadsheet Reading Module
//!
//! Reads Office Open XML workbooks (`.xlsx`, `.xlsm`) straight from their ZIP
//! container: the workbook structure, cell styles, the shared string table and
//! the worksheet cells. Sheets are selected with [`criteria::Criteria`] and laid
//! out as dense rows by [`sheet::Sheet::rows`].
use crate::error::RustyEtlError;
use crate::spreadsheet::criteria::Criteria;
use crate::spreadsheet::sheet::Sheet;
use crate::spreadsheet::xlsx::XlsxSpreadsheet;
use std::ffi::OsStr;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

pub mod cell;
pub mod criteria;
pub(crate) mod excel;
pub mod range;
pub(crate) mod reference;
pub mod sheet;
pub(crate) mod xlsx;

/// Buffered reader over a local spreadsheet file
pub(crate) type FileReader = BufReader<File>;

/// Errors raised while reading spreadsheet files.
#[derive(Error, Debug)]
pub enum SpreadsheetError {
    /// A required part is missing from the package
    #[error("Missing part '{0}' in spreadsheet package")]
    FileError(String),

    #[error("Spreadsheet '{0}' contains no sheets")]
    SpreadsheetEmptyError(String),

    #[error("Unsupported spreadsheet format '{0}', expected .xlsx or .xlsm")]
    UnsupportedFormatError(String),

    /// File, requested patterns and the sheets the file has
    #[error("No sheet in '{0}' matches '{1}' (sheets: {2})")]
    SheetNotFoundError(String, String, String),

    /// File, sheet, cell reference and message
    #[error("Invalid cell value in '{0}' sheet '{1}' at {2}: {3}")]
    CellValueError(String, String, String, String),

    /// File, sheet and column name
    #[error("Missing column '{2}' in '{0}' sheet '{1}'")]
    MissingColumnError(String, String, String),

    #[error("Sheet '{1}' in '{0}' has no header row")]
    MissingHeaderError(String, String),
}

/// A workbook that can be read sheet by sheet.
pub trait Spreadsheet {
    /// File name of the workbook
    fn name(&self) -> String;

    /// Sheet names in workbook order
    fn sheet_names(&self) -> Vec<String>;

    /// Reads the sheets accepted by the criteria, in workbook order.
    fn read_sheets(&mut self, criteria: &Criteria) -> Result<Vec<Sheet>, RustyEtlError>;
}

/// Opens a spreadsheet, picking the reader from the file extension.
pub fn open_spreadsheet<P: AsRef<Path>>(path: P) -> Result<Box<dyn Spreadsheet>, RustyEtlError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("xlsx") | Some("xlsm") => Ok(Box::new(XlsxSpreadsheet::open(path)?)),
        _ => Err(SpreadsheetError::UnsupportedFormatError(path.to_string_lossy().to_string()))?,
    }
}
