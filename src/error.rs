use thiserror::Error;

/// Main error type for the survey sheet library.
/// Aggregates errors from the spreadsheet and period modules.
#[derive(Error, Debug)]
pub enum SurveySheetError {
    #[error("{0}")]
    WithContextError(String),

    // Third-party library errors
    #[error("{0}")]
    PatternError(#[from] glob::PatternError),

    // Spreadsheet module errors
    #[error("{0}")]
    SpreadsheetError(#[from] crate::spreadsheet::SpreadsheetError),

    // Period module errors
    #[error("{0}")]
    PeriodError(#[from] crate::period::PeriodError),
}

pub trait ResultMessage {
    fn with_prefix(self, message: &str) -> Self;
}

impl<T> ResultMessage for Result<T, SurveySheetError> {
    fn with_prefix(self, message: &str) -> Self {
        self.map_err(|e| SurveySheetError::WithContextError(format!("{}: {}", message, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spreadsheet::SpreadsheetError;

    #[test]
    fn prefix_names_the_sheet() {
        let result: Result<(), SurveySheetError> = Err(SpreadsheetError::NoDataRows.into());
        let message = result.with_prefix("Week 3").unwrap_err().to_string();
        assert_eq!(message, "Week 3: No data found in this sheet");
    }
}
