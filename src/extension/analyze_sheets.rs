use crate::error::ResultMessage;
use crate::error::SurveySheetError;
use crate::extension::analyze_sheet::analyze_sheet;
use crate::extension::register_all;
use crate::extension::SheetFailure;
use crate::extension::WorkbookAnalysis;
use crate::period::registry::WorkbookEntry;
use crate::period::registry::WorkbookRegistry;
use crate::period::resolve_week_number;
use crate::period::PeriodStore;
use crate::spreadsheet::criteria::Criteria;
use crate::spreadsheet::criteria::Thresholds;
use crate::spreadsheet::SheetSource;
use crate::spreadsheet::SpreadsheetError;

/// Options for loading a workbook in multi-file mode.
#[derive(Clone, Debug, Default)]
pub struct AnalyzeSheetsParameters {
    /// Week number used when the file name does not carry one
    pub fallback_week: Option<u32>,
    pub criteria: Criteria,
    pub thresholds: Thresholds,
}

/// Processes every sheet of `source` accepted by `criteria`, registering the
/// snapshot of each successful sheet in `periods`.
///
/// A sheet that fails never aborts the workbook: it is reported in
/// [`WorkbookAnalysis::failures`] and nothing is registered for it.
pub fn analyze_workbook<S>(
    source: &S,
    periods: &mut PeriodStore,
    criteria: &Criteria,
    thresholds: &Thresholds,
) -> WorkbookAnalysis
where
    S: SheetSource + ?Sized,
{
    let sheet_names = source.sheet_names();
    let mut tables = Vec::new();
    let mut failures = Vec::new();

    for name in criteria.select(&sheet_names) {
        let result = source
            .read_sheet(name)
            .ok_or_else(|| SpreadsheetError::SheetNotFound { name: name.to_owned() })
            .and_then(|raw| analyze_sheet(name, &raw, thresholds));
        match result {
            Ok(table) => tables.push(table),
            Err(error) => failures.push(SheetFailure {
                sheet: name.to_owned(),
                error,
            }),
        }
    }

    log::info!(
        "'{}': {} sheets processed, {} skipped",
        source.file_name(),
        tables.len(),
        failures.len()
    );
    WorkbookAnalysis {
        file_name: source.file_name().to_owned(),
        week: periods.week(),
        sheets: register_all(periods, tables),
        failures,
    }
}

/// Loads a workbook into the registry under its week number.
///
/// The week comes from the file name (`Week 3.xlsx`, `week_12.xlsx`) or the
/// fallback in `parameters`. A workbook already registered for the same week
/// is replaced together with its periods.
pub fn analyze_sheets<S>(
    registry: &mut WorkbookRegistry,
    source: &S,
    parameters: &AnalyzeSheetsParameters,
) -> Result<WorkbookAnalysis, SurveySheetError>
where
    S: SheetSource + ?Sized,
{
    let file_name = source.file_name();
    let week = resolve_week_number(file_name, parameters.fallback_week)
        .map_err(SurveySheetError::from)
        .with_prefix(file_name)?;

    let mut entry = WorkbookEntry::new(week, file_name, source.sheet_names());
    let analysis = analyze_workbook(source, &mut entry.periods, &parameters.criteria, &parameters.thresholds);
    registry.register(entry);
    Ok(analysis)
}
