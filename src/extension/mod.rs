//! # Entry Points
//!
//! Sheet and workbook processing as seen by the host: `analyze_sheet`
//! processes one raw sheet, `analyze_workbook` every accepted sheet of a
//! workbook into a [`PeriodStore`], and `analyze_sheets` registers a whole
//! workbook under its week number for multi-file trend comparison.
pub mod analyze_sheet;
pub mod analyze_sheets;

pub use analyze_sheet::analyze_sheet;
pub use analyze_sheet::question_trends;
pub use analyze_sheets::analyze_sheets;
pub use analyze_sheets::analyze_workbook;
pub use analyze_sheets::AnalyzeSheetsParameters;

use crate::database::table::Table;
use crate::period::PeriodKey;
use crate::period::PeriodStore;
use crate::spreadsheet::SpreadsheetError;

/// A processed sheet and the period it was registered as.
#[derive(Clone, Debug, PartialEq)]
pub struct SheetAnalysis {
    pub key: PeriodKey,
    pub table: Table,
}

/// A sheet that could not be processed.
#[derive(Clone, Debug, PartialEq)]
pub struct SheetFailure {
    pub sheet: String,
    pub error: SpreadsheetError,
}

/// Outcome of processing every accepted sheet of one workbook.
#[derive(Clone, Debug, PartialEq)]
pub struct WorkbookAnalysis {
    /// Source file name
    pub file_name: String,
    /// Week number in multi-file mode
    pub week: Option<u32>,
    /// Sheets processed successfully, in workbook order
    pub sheets: Vec<SheetAnalysis>,
    /// Sheets that were skipped, in workbook order
    pub failures: Vec<SheetFailure>,
}

impl WorkbookAnalysis {
    /// Finds a processed sheet by name.
    pub fn sheet(&self, name: &str) -> Option<&SheetAnalysis> {
        self.sheets.iter().find(|analysis| analysis.table.name == name)
    }
}

/// Registers each processed sheet's snapshot in `periods`.
fn register_all(periods: &mut PeriodStore, tables: Vec<Table>) -> Vec<SheetAnalysis> {
    tables
        .into_iter()
        .map(|table| SheetAnalysis {
            key: periods.register(&table.name, table.snapshot.clone()),
            table,
        })
        .collect()
}
