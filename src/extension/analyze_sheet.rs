use crate::analysis::stats::StatisticKind;
use crate::analysis::trend::find_trend;
use crate::analysis::trend::Trend;
use crate::database::column::ColumnType;
use crate::database::table::Table;
use crate::period::PeriodKey;
use crate::period::Periods;
use crate::spreadsheet::criteria::Thresholds;
use crate::spreadsheet::sheet::RawSheet;
use crate::spreadsheet::sheet::Sheet;
use crate::spreadsheet::SpreadsheetError;

/// Processes one raw sheet into a [`Table`].
///
/// Either the complete table (columns, rows and snapshot) is returned or the
/// reason the sheet is unusable; nothing is registered anywhere.
pub fn analyze_sheet(name: &str, raw: &RawSheet, thresholds: &Thresholds) -> Result<Table, SpreadsheetError> {
    let sheet = Sheet::normalize(name, raw).inspect_err(|e| log::warn!("sheet '{}' skipped: {}", name, e))?;
    let table = Table::new(sheet, thresholds);
    log::debug!(
        "sheet '{}': {} columns, {} statistics",
        name,
        table.columns.len(),
        table.snapshot.len()
    );
    Ok(table)
}

/// Trends of every question column of `table`, registered as `current`.
///
/// Returns `(column index, trend)` pairs for the questions that have one.
pub fn question_trends<P>(table: &Table, periods: &P, current: &PeriodKey, thresholds: &Thresholds) -> Vec<(usize, Trend)>
where
    P: Periods + ?Sized,
{
    table
        .columns
        .iter()
        .filter_map(|column| {
            let kind = match column.kind {
                ColumnType::Rating => StatisticKind::Rating,
                ColumnType::YesNo => StatisticKind::YesNo,
                _ => return None,
            };
            find_trend(periods, &column.header, current, kind, thresholds).map(|trend| (column.index, trend))
        })
        .collect()
}
