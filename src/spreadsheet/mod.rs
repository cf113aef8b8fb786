//! # Spreadsheet Input Module
//!
//! Cell values, raw sheets and the normalization that finds the data region
//! inside a sheet. Decoding spreadsheet files is left to the host: it hands
//! over each sheet as rows of [`CellValue`] through the [`SheetSource`] trait.
pub mod cell;
pub mod criteria;
pub mod sheet;

pub use cell::CellValue;
pub use criteria::Criteria;
pub use criteria::Thresholds;
pub use sheet::RawSheet;
pub use sheet::Row;
pub use sheet::Sheet;

use thiserror::Error;

/// Errors that make a single sheet unusable.
///
/// Both are terminal for that sheet only; other sheets are unaffected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpreadsheetError {
    /// Fewer than two raw rows
    #[error("Sheet has no data rows")]
    EmptySheet,

    /// Every row after the header (and scale legend) is blank
    #[error("No data found in this sheet")]
    NoDataRows,

    /// The reader could not provide the requested sheet
    #[error("Sheet '{name}' not found")]
    SheetNotFound { name: String },
}

/// Source of raw sheets, implemented by the spreadsheet reader.
pub trait SheetSource {
    /// File name the workbook was loaded from.
    fn file_name(&self) -> &str;

    /// Sheet names in workbook order.
    fn sheet_names(&self) -> Vec<String>;

    /// Returns the decoded cells of one sheet, or `None` if it does not exist.
    fn read_sheet(&self, name: &str) -> Option<RawSheet>;
}

/// A workbook already decoded into memory.
#[derive(Clone, Debug, Default)]
pub struct Workbook {
    /// Source file name
    pub file_name: String,
    /// Sheets in workbook order
    pub sheets: Vec<(String, RawSheet)>,
}

impl Workbook {
    pub fn new(file_name: &str) -> Self {
        Self {
            file_name: file_name.to_owned(),
            sheets: Vec::new(),
        }
    }

    /// Appends a sheet, keeping workbook order.
    pub fn with_sheet(mut self, name: &str, sheet: RawSheet) -> Self {
        self.sheets.push((name.to_owned(), sheet));
        self
    }
}

impl SheetSource for Workbook {
    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.to_owned()).collect()
    }

    fn read_sheet(&self, name: &str) -> Option<RawSheet> {
        self.sheets
            .iter()
            .find(|(sheet_name, _)| sheet_name == name)
            .map(|(_, sheet)| sheet.clone())
    }
}
