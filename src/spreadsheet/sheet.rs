use crate::spreadsheet::cell::CellValue;
use crate::spreadsheet::cell::EMPTY;
use crate::spreadsheet::SpreadsheetError;
use regex::Regex;
use std::sync::LazyLock;

/// One row of cell values. Rows may be shorter than the header row.
pub type Row = Vec<CellValue>;

/// Scale legend such as "1 - very poor ... 5 - excellent" found under the header row.
static SCALE_LEGEND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\d\s*-\s*(very\s+)?poor").expect("Hardcode regex pattern"));

/// Returns the cell at `col`, treating missing trailing cells as empty.
pub fn cell(row: &[CellValue], col: usize) -> &CellValue {
    row.get(col).unwrap_or(&EMPTY)
}

/// Raw sheet content as decoded by the spreadsheet reader.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawSheet {
    /// All rows, header row first
    pub rows: Vec<Row>,
}

impl RawSheet {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Returns the cell at (row, col), empty when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> &CellValue {
        self.rows.get(row).map(|cells| cell(cells, col)).unwrap_or(&EMPTY)
    }
}

/// A sheet reduced to its header row and its non-blank data rows.
#[derive(Clone, Debug, PartialEq)]
pub struct Sheet {
    /// Sheet name
    pub name: String,
    /// Row 0 of the raw sheet
    pub header: Row,
    /// Data rows in sheet order, blank rows removed
    pub rows: Vec<Row>,
    /// Whether row 1 was a scale legend and skipped
    pub has_sub_header: bool,
}

impl Sheet {
    /// Locates the data region of a raw sheet.
    ///
    /// Row 0 is the header. Row 1 is skipped when any of its string cells looks
    /// like a scale legend. Remaining rows where every cell is blank are dropped.
    pub fn normalize(name: &str, raw: &RawSheet) -> Result<Self, SpreadsheetError> {
        if raw.rows.len() < 2 {
            return Err(SpreadsheetError::EmptySheet);
        }
        let has_sub_header = is_sub_header(&raw.rows[1]);
        let data_start = if has_sub_header { 2 } else { 1 };
        let rows: Vec<Row> = raw.rows[data_start..]
            .iter()
            .filter(|row| !is_blank_row(row))
            .cloned()
            .collect();
        if rows.is_empty() {
            return Err(SpreadsheetError::NoDataRows);
        }
        log::debug!(
            "sheet '{}': {} data rows, sub-header {}",
            name,
            rows.len(),
            if has_sub_header { "skipped" } else { "absent" }
        );
        Ok(Sheet {
            name: name.to_owned(),
            header: raw.rows[0].clone(),
            rows,
            has_sub_header,
        })
    }
}

/// Checks whether a row is a scale legend rather than a response.
fn is_sub_header(row: &[CellValue]) -> bool {
    row.iter()
        .filter_map(CellValue::as_str)
        .any(|text| SCALE_LEGEND.is_match(text))
}

/// Checks whether every cell of a row is empty.
fn is_blank_row(row: &[CellValue]) -> bool {
    row.iter().all(CellValue::is_empty)
}
