//! # Survey Sheet
//!
//! Turns raw survey spreadsheet sheets into per-question statistics,
//! respondent comments and week-over-week trends.
//!
//! ## Features
//!
//! - **Sheet normalization**: Header detection, legend sub-header skipping and
//!   blank row removal
//! - **Column classification**: Date, name, client, job coach, 1-5 rating,
//!   yes/no and free text columns, with reason/action annotation linking
//! - **Statistics**: Rating means and distributions, yes percentages, status
//!   classes and a KPI strip per period
//! - **Comments**: Reason and action text per question with low-score badges
//! - **Trends**: Comparison with the nearest earlier period holding the same
//!   question, within one workbook or across weekly workbooks
//! - **Response table**: Stable column sorting and text filtering
//!
//! ## Entry Points
//!
//! - [`analyze_sheet`]: Process one raw sheet into a [`Table`]
//! - [`analyze_workbook`]: Process every accepted sheet of a workbook into a [`PeriodStore`]
//! - [`analyze_sheets`]: Register a weekly workbook in a [`WorkbookRegistry`]
pub mod analysis;
pub mod database;
pub mod error;
pub mod extension;
pub mod period;
pub mod spreadsheet;

pub use crate::analysis::find_trend;
pub use crate::database::Table;
pub use crate::error::SurveySheetError;
pub use crate::extension::analyze_sheet;
pub use crate::extension::analyze_sheets;
pub use crate::extension::analyze_workbook;
pub use crate::extension::AnalyzeSheetsParameters;
pub use crate::extension::WorkbookAnalysis;
pub use crate::period::registry::WorkbookRegistry;
pub use crate::period::PeriodKey;
pub use crate::period::PeriodStore;
pub use crate::spreadsheet::Criteria;
pub use crate::spreadsheet::RawSheet;
pub use crate::spreadsheet::SheetSource;
pub use crate::spreadsheet::Thresholds;
pub use crate::spreadsheet::Workbook;
